use crate::{
    error::StoreError,
    models::{Vote, VoteValue},
    store::Store,
};

impl Store {
    /// records `voter_id`'s stance on a quote, replacing any earlier vote of theirs.
    ///
    /// the delete and the insert share one transaction, so a voter never ends up
    /// with zero or two votes on the same quote.
    #[tracing::instrument(skip(self))]
    pub async fn cast_vote(
        &self,
        quote_id: i64,
        voter_id: i64,
        value: VoteValue,
    ) -> Result<(), StoreError> {
        self.bounded("cast_vote", async {
            let mut tx = self.pool.begin().await?;

            sqlx::query(
                r#"
                    DELETE FROM votes
                    WHERE quote_id = $1 AND voter_id = $2;
                "#,
            )
            .bind(quote_id)
            .bind(voter_id)
            .execute(&mut *tx)
            .await
            .inspect_err(
                |e| tracing::error!(err = ?e, "an error occurred when clearing previous vote"),
            )?;

            sqlx::query(
                r#"
                    INSERT INTO
                        votes (quote_id, voter_id, value)
                    VALUES
                        ($1, $2, $3);
                "#,
            )
            .bind(quote_id)
            .bind(voter_id)
            .bind(value.as_i64())
            .execute(&mut *tx)
            .await
            .inspect_err(|e| tracing::error!(err = ?e, "an error occurred when casting vote"))?;

            tx.commit().await?;

            Ok::<_, StoreError>(())
        })
        .await
    }

    pub async fn up_vote(&self, quote_id: i64, voter_id: i64) -> Result<(), StoreError> {
        self.cast_vote(quote_id, voter_id, VoteValue::Up).await
    }

    pub async fn down_vote(&self, quote_id: i64, voter_id: i64) -> Result<(), StoreError> {
        self.cast_vote(quote_id, voter_id, VoteValue::Down).await
    }

    /// withdraws a vote. nothing happens if the voter never voted.
    #[tracing::instrument(skip(self))]
    pub async fn remove_vote(&self, quote_id: i64, voter_id: i64) -> Result<(), StoreError> {
        self.bounded("remove_vote", async {
            sqlx::query(
                r#"
                    DELETE FROM votes
                    WHERE quote_id = $1 AND voter_id = $2;
                "#,
            )
            .bind(quote_id)
            .bind(voter_id)
            .execute(&self.pool)
            .await
            .inspect_err(|e| tracing::error!(err = ?e, "an error occurred when removing vote"))?;

            Ok::<_, StoreError>(())
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn vote_of(
        &self,
        quote_id: i64,
        voter_id: i64,
    ) -> Result<Option<VoteValue>, StoreError> {
        let value = sqlx::query_as::<_, (i64,)>(
            r#"
                SELECT value
                FROM votes
                WHERE quote_id = $1 AND voter_id = $2;
            "#,
        )
        .bind(quote_id)
        .bind(voter_id)
        .fetch_optional(&self.pool)
        .await
        .inspect_err(|e| tracing::error!(err = ?e, "an error occurred when fetching vote"))?;

        Ok(value.and_then(|(value,)| VoteValue::from_i64(value)))
    }

    /// every vote cast on a quote, oldest first.
    #[tracing::instrument(skip(self))]
    pub async fn votes_for(&self, quote_id: i64) -> Result<Vec<Vote>, StoreError> {
        let votes = sqlx::query_as::<_, Vote>(
            r#"
                SELECT id, quote_id, voter_id, value
                FROM votes
                WHERE quote_id = $1
                ORDER BY id;
            "#,
        )
        .bind(quote_id)
        .fetch_all(&self.pool)
        .await
        .inspect_err(|e| tracing::error!(err = ?e, "an error occurred when fetching votes"))?;

        Ok(votes)
    }
}
