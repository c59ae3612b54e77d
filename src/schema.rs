use crate::{constants::RESERVED_QUOTE_IDS, error::StoreError, store::Store};

impl Store {
    /// creates both tables if they are missing. safe to call repeatedly.
    #[tracing::instrument(skip_all)]
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        self.create_quotes_table().await?;
        self.create_votes_table().await?;

        Ok(())
    }

    #[tracing::instrument(skip_all)]
    pub async fn create_quotes_table(&self) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
                CREATE TABLE IF NOT EXISTS quotes (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    content VARCHAR(512) NOT NULL CHECK (length(content) <= 512),
                    context VARCHAR(255) NOT NULL CHECK (length(context) <= 255),
                    author VARCHAR(255) NOT NULL CHECK (length(author) <= 255),
                    created_at DATETIME NOT NULL,
                    deleted_at DATETIME DEFAULT NULL,
                    is_active BOOLEAN NOT NULL DEFAULT 1
                );
            "#,
        )
        .execute(&mut *tx)
        .await
        .inspect_err(|e| tracing::error!(err = ?e, "an error occurred when creating quotes table"))?;

        // sqlite_sequence exists once any AUTOINCREMENT table does.
        sqlx::query(
            r#"
                INSERT INTO sqlite_sequence (name, seq)
                SELECT 'quotes', $1
                WHERE NOT EXISTS (SELECT 1 FROM sqlite_sequence WHERE name = 'quotes');
            "#,
        )
        .bind(RESERVED_QUOTE_IDS)
        .execute(&mut *tx)
        .await
        .inspect_err(
            |e| tracing::error!(err = ?e, "an error occurred when reserving low quote ids"),
        )?;

        tx.commit().await?;

        Ok(())
    }

    #[tracing::instrument(skip_all)]
    pub async fn create_votes_table(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
                CREATE TABLE IF NOT EXISTS votes (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    quote_id INTEGER NOT NULL REFERENCES quotes (id),
                    voter_id INTEGER NOT NULL,
                    value INTEGER NOT NULL CHECK (value IN (-1, 1)),
                    UNIQUE (quote_id, voter_id)
                );
            "#,
        )
        .execute(&self.pool)
        .await
        .inspect_err(|e| tracing::error!(err = ?e, "an error occurred when creating votes table"))?;

        Ok(())
    }

    #[tracing::instrument(skip_all)]
    pub async fn drop_quotes_table(&self) -> Result<(), StoreError> {
        sqlx::query("DROP TABLE IF EXISTS quotes;")
            .execute(&self.pool)
            .await
            .inspect_err(
                |e| tracing::error!(err = ?e, "an error occurred when dropping quotes table"),
            )?;

        Ok(())
    }

    #[tracing::instrument(skip_all)]
    pub async fn drop_votes_table(&self) -> Result<(), StoreError> {
        sqlx::query("DROP TABLE IF EXISTS votes;")
            .execute(&self.pool)
            .await
            .inspect_err(
                |e| tracing::error!(err = ?e, "an error occurred when dropping votes table"),
            )?;

        Ok(())
    }

    /// drops every quote and vote and recreates empty tables.
    #[tracing::instrument(skip_all)]
    pub async fn reset(&self) -> Result<(), StoreError> {
        tracing::warn!("dropping all quotes and votes");

        // votes reference quotes, so they go first.
        self.drop_votes_table().await?;
        self.drop_quotes_table().await?;
        self.ensure_schema().await
    }
}
