use time::OffsetDateTime;

use crate::{
    constants::{is_forbidden_context, DEDUP_THRESHOLD, DEDUP_WINDOW},
    error::StoreError,
    models::{AddOutcome, NewQuote, Rejection, ScoredQuote},
    similarity::rank_against,
    store::Store,
};

/// columns of a scored quote, to be followed by a `FROM quotes q ... JOIN votes v` clause
/// and a `GROUP BY q.id`.
pub(crate) const SCORED_QUOTE_COLUMNS: &str = r#"
    q.id,
    q.content,
    q.context,
    q.author,
    q.created_at,
    q.deleted_at,
    q.is_active,
    COALESCE(SUM(v.value), 0) AS score
"#;

impl Store {
    /// stores a new quote unless its context is forbidden or it looks like one of the
    /// latest quotes.
    #[tracing::instrument(skip(self, quote), fields(context = %quote.context, author = %quote.author))]
    pub async fn add(&self, quote: &NewQuote) -> Result<AddOutcome, StoreError> {
        if is_forbidden_context(&quote.context) {
            tracing::info!("rejected quote with forbidden context");

            return Ok(AddOutcome::Rejected(Rejection::ForbiddenContext {
                context: quote.context.clone(),
            }));
        }

        self.bounded("add", async {
            let recent = self.latest_contents(DEDUP_WINDOW).await?;
            let ranking = rank_against(
                &quote.content,
                recent.iter().map(|(id, content)| (*id, content.as_str())),
                DEDUP_THRESHOLD,
            );

            if let (Some(similar_to), Some(similarity)) = (ranking.best_id, ranking.best_score()) {
                tracing::info!(similar_to, similarity, "rejected near-duplicate quote");

                return Ok(AddOutcome::Rejected(Rejection::Duplicate {
                    similar_to,
                    similarity,
                }));
            }

            let (id,) = sqlx::query_as::<_, (i64,)>(
                r#"
                    INSERT INTO
                        quotes (content, context, author, created_at, is_active)
                    VALUES
                        ($1, $2, $3, $4, 1)
                    RETURNING id;
                "#,
            )
            .bind(&quote.content)
            .bind(&quote.context)
            .bind(&quote.author)
            .bind(OffsetDateTime::now_utc())
            .fetch_one(&self.pool)
            .await
            .inspect_err(|e| tracing::error!(err = ?e, "an error occurred when adding quote"))?;

            tracing::info!(id, "added quote");

            Ok::<_, StoreError>(AddOutcome::Added { id })
        })
        .await
    }

    /// hides a quote from every query. deleting twice re-stamps `deleted_at`.
    #[tracing::instrument(skip(self))]
    pub async fn soft_delete(&self, id: i64) -> Result<(), StoreError> {
        let result = self
            .bounded("soft_delete", async {
                sqlx::query(
                    r#"
                        UPDATE quotes
                        SET is_active = 0, deleted_at = $1
                        WHERE id = $2;
                    "#,
                )
                .bind(OffsetDateTime::now_utc())
                .bind(id)
                .execute(&self.pool)
                .await
                .inspect_err(
                    |e| tracing::error!(err = ?e, "an error occurred when deleting quote"),
                )
                .map_err(StoreError::from)
            })
            .await?;

        tracing::debug!(rows = result.rows_affected(), "soft-deleted quote");

        Ok(())
    }

    /// active quotes among `ids`, with their scores, in no particular order.
    #[tracing::instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn get_by_ids(&self, ids: &[i64]) -> Result<Vec<ScoredQuote>, StoreError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        // bound as a single JSON array; SQLite caps the number of variables per statement.
        let ids = serde_json::Value::from(ids.to_vec()).to_string();
        let sql = format!(
            r#"
                SELECT {SCORED_QUOTE_COLUMNS}
                FROM quotes q
                LEFT JOIN votes v ON q.id = v.quote_id
                WHERE q.is_active = 1 AND q.id IN (SELECT value FROM json_each($1))
                GROUP BY q.id;
            "#
        );

        let quotes = sqlx::query_as::<_, ScoredQuote>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .inspect_err(
                |e| tracing::error!(err = ?e, "an error occurred when fetching quotes by id"),
            )?;

        Ok(quotes)
    }

    /// (id, content) of the `n` most recent active quotes, newest first.
    pub(crate) async fn latest_contents(&self, n: i64) -> Result<Vec<(i64, String)>, StoreError> {
        let rows = sqlx::query_as::<_, (i64, String)>(
            r#"
                SELECT id, content
                FROM quotes
                WHERE is_active = 1
                ORDER BY id DESC
                LIMIT $1;
            "#,
        )
        .bind(n)
        .fetch_all(&self.pool)
        .await
        .inspect_err(
            |e| tracing::error!(err = ?e, "an error occurred when fetching latest quotes"),
        )?;

        Ok(rows)
    }

    /// (id, content) of every active quote, oldest first.
    pub(crate) async fn active_contents(&self) -> Result<Vec<(i64, String)>, StoreError> {
        let rows = sqlx::query_as::<_, (i64, String)>(
            r#"
                SELECT id, content
                FROM quotes
                WHERE is_active = 1
                ORDER BY id;
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .inspect_err(
            |e| tracing::error!(err = ?e, "an error occurred when fetching quote contents"),
        )?;

        Ok(rows)
    }
}
