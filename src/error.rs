use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(sqlx::Error),

    #[error("{operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    /// a row came back in a shape that doesn't match the schema.
    #[error("unexpected row shape: {0}")]
    RowShape(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnIndexOutOfBounds { .. }
            | sqlx::Error::Decode(_) => {
                tracing::error!(err = ?err, "row does not match the quotes schema");
                StoreError::RowShape(err)
            }
            err => StoreError::Database(err),
        }
    }
}

impl StoreError {
    /// true for failures a caller may reasonably retry.
    pub fn is_transient(&self) -> bool {
        match self {
            StoreError::Timeout { .. } => true,
            StoreError::Database(sqlx::Error::PoolTimedOut)
            | StoreError::Database(sqlx::Error::PoolClosed)
            | StoreError::Database(sqlx::Error::Io(_)) => true,
            StoreError::Database(sqlx::Error::Database(e)) => e
                .code()
                .and_then(|code| code.parse::<i32>().ok())
                .is_some_and(is_busy_or_locked),
            _ => false,
        }
    }
}

/// SQLITE_BUSY (5) and SQLITE_LOCKED (6), including their extended codes.
fn is_busy_or_locked(code: i32) -> bool {
    matches!(code & 0xff, 5 | 6)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {var}")]
    Invalid { var: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_is_transient() {
        let err = StoreError::Timeout {
            operation: "add",
            after: Duration::from_secs(5),
        };

        assert!(err.is_transient());
        assert_eq!(err.to_string(), "add timed out after 5s");
    }

    #[test]
    fn decode_failures_become_row_shape_errors() {
        let err: StoreError = sqlx::Error::ColumnNotFound("score".to_string()).into();

        assert!(matches!(err, StoreError::RowShape(_)));
        assert!(!err.is_transient());
    }

    #[test]
    fn other_sqlx_errors_stay_database_errors() {
        let err: StoreError = sqlx::Error::RowNotFound.into();

        assert!(matches!(err, StoreError::Database(_)));
    }

    #[test]
    fn busy_and_locked_codes_are_recognized() {
        assert!(is_busy_or_locked(5));
        assert!(is_busy_or_locked(6));
        // SQLITE_BUSY_SNAPSHOT, SQLITE_LOCKED_SHAREDCACHE
        assert!(is_busy_or_locked(517));
        assert!(is_busy_or_locked(262));

        // SQLITE_CONSTRAINT_CHECK, SQLITE_ERROR
        assert!(!is_busy_or_locked(275));
        assert!(!is_busy_or_locked(1));
    }

    #[test]
    fn config_error_messages() {
        assert_eq!(
            ConfigError::Missing("DATABASE_URL").to_string(),
            "missing environment variable DATABASE_URL"
        );
        assert_eq!(
            ConfigError::Invalid {
                var: "QUOTEBOOK_MAX_CONNECTIONS",
                value: "many".to_string(),
            }
            .to_string(),
            "invalid value \"many\" for QUOTEBOOK_MAX_CONNECTIONS"
        );
    }
}
