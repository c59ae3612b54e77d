//! read paths over active quotes. every result carries the quote's score.

use std::collections::HashMap;

use crate::{
    constants::FUZZY_THRESHOLD,
    error::StoreError,
    models::ScoredQuote,
    quotes::SCORED_QUOTE_COLUMNS,
    similarity::rank_against,
    store::Store,
};

/// escapes LIKE wildcards so `expression` only matches itself.
fn like_pattern(expression: &str) -> String {
    let mut pattern = String::with_capacity(expression.len() + 2);
    pattern.push('%');
    for c in expression.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

impl Store {
    /// the `n` newest active quotes, newest first.
    #[tracing::instrument(skip(self))]
    pub async fn last(&self, n: u32) -> Result<Vec<ScoredQuote>, StoreError> {
        let sql = format!(
            r#"
                SELECT {SCORED_QUOTE_COLUMNS}
                FROM quotes q
                LEFT JOIN votes v ON q.id = v.quote_id
                WHERE q.is_active = 1
                GROUP BY q.id
                ORDER BY q.id DESC
                LIMIT $1;
            "#
        );

        let quotes = sqlx::query_as::<_, ScoredQuote>(&sql)
            .bind(n)
            .fetch_all(&self.pool)
            .await
            .inspect_err(
                |e| tracing::error!(err = ?e, "an error occurred when fetching last quotes"),
            )?;

        Ok(quotes)
    }

    /// `n` active quotes picked at random.
    #[tracing::instrument(skip(self))]
    pub async fn random(&self, n: u32) -> Result<Vec<ScoredQuote>, StoreError> {
        let sql = format!(
            r#"
                SELECT {SCORED_QUOTE_COLUMNS}
                FROM quotes q
                LEFT JOIN votes v ON q.id = v.quote_id
                WHERE q.is_active = 1
                GROUP BY q.id
                ORDER BY RANDOM()
                LIMIT $1;
            "#
        );

        let quotes = sqlx::query_as::<_, ScoredQuote>(&sql)
            .bind(n)
            .fetch_all(&self.pool)
            .await
            .inspect_err(
                |e| tracing::error!(err = ?e, "an error occurred when fetching random quotes"),
            )?;

        Ok(quotes)
    }

    /// voted quotes with a score of zero or more, best first.
    #[tracing::instrument(skip(self))]
    pub async fn top(&self, n: u32) -> Result<Vec<ScoredQuote>, StoreError> {
        let sql = format!(
            r#"
                SELECT {SCORED_QUOTE_COLUMNS}
                FROM quotes q
                JOIN votes v ON q.id = v.quote_id
                WHERE q.is_active = 1
                GROUP BY q.id
                HAVING SUM(v.value) >= 0
                ORDER BY SUM(v.value) DESC, q.id DESC
                LIMIT $1;
            "#
        );

        let quotes = sqlx::query_as::<_, ScoredQuote>(&sql)
            .bind(n)
            .fetch_all(&self.pool)
            .await
            .inspect_err(
                |e| tracing::error!(err = ?e, "an error occurred when fetching top quotes"),
            )?;

        Ok(quotes)
    }

    /// voted quotes with a score of zero or less, worst first.
    #[tracing::instrument(skip(self))]
    pub async fn flop(&self, n: u32) -> Result<Vec<ScoredQuote>, StoreError> {
        let sql = format!(
            r#"
                SELECT {SCORED_QUOTE_COLUMNS}
                FROM quotes q
                JOIN votes v ON q.id = v.quote_id
                WHERE q.is_active = 1
                GROUP BY q.id
                HAVING SUM(v.value) <= 0
                ORDER BY SUM(v.value) ASC, q.id DESC
                LIMIT $1;
            "#
        );

        let quotes = sqlx::query_as::<_, ScoredQuote>(&sql)
            .bind(n)
            .fetch_all(&self.pool)
            .await
            .inspect_err(
                |e| tracing::error!(err = ?e, "an error occurred when fetching flop quotes"),
            )?;

        Ok(quotes)
    }

    /// up to `n` active quotes containing `expression`, ignoring ASCII case, in random
    /// order.
    #[tracing::instrument(skip(self))]
    pub async fn search_substring(
        &self,
        expression: &str,
        n: u32,
    ) -> Result<Vec<ScoredQuote>, StoreError> {
        let sql = format!(
            r#"
                SELECT {SCORED_QUOTE_COLUMNS}
                FROM quotes q
                LEFT JOIN votes v ON q.id = v.quote_id
                WHERE q.is_active = 1 AND q.content LIKE $1 ESCAPE '\'
                GROUP BY q.id
                ORDER BY RANDOM()
                LIMIT $2;
            "#
        );

        let quotes = sqlx::query_as::<_, ScoredQuote>(&sql)
            .bind(like_pattern(expression))
            .bind(n)
            .fetch_all(&self.pool)
            .await
            .inspect_err(
                |e| tracing::error!(err = ?e, "an error occurred when searching quotes"),
            )?;

        Ok(quotes)
    }

    /// up to `n` active quotes whose content resembles `expression`, most similar first.
    ///
    /// scans every active quote, which is fine for a few tens of thousands of them.
    #[tracing::instrument(skip(self))]
    pub async fn search_fuzzy(
        &self,
        expression: &str,
        n: u32,
    ) -> Result<Vec<ScoredQuote>, StoreError> {
        let corpus = self.active_contents().await?;
        let ranking = rank_against(
            expression,
            corpus.iter().map(|(id, content)| (*id, content.as_str())),
            FUZZY_THRESHOLD,
        );

        let ids = ranking.top(n as usize);
        tracing::debug!(matches = ids.len(), "ranked quotes");

        let rank: HashMap<i64, usize> = ids.iter().enumerate().map(|(pos, id)| (*id, pos)).collect();

        let mut quotes = self.get_by_ids(&ids).await?;
        // get_by_ids comes back in store order.
        quotes.sort_by_key(|q| rank.get(&q.quote.id).copied().unwrap_or(usize::MAX));

        Ok(quotes)
    }
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn like_pattern_wraps_expression() {
        assert_eq!(like_pattern("hello"), "%hello%");
        assert_eq!(like_pattern(""), "%%");
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("snake_case"), "%snake\\_case%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
