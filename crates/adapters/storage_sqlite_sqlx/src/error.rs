//! Storage-specific error type wrapping sqlx errors.

use ticketing_domain::error::{ContentionError, TicketingError};

/// Primary `SQLite` result code for "database is locked by another connection".
const SQLITE_BUSY: i32 = 5;
/// Primary `SQLite` result code for "table is locked" (shared-cache databases).
const SQLITE_LOCKED: i32 = 6;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl StorageError {
    /// Whether this error means a lock or connection could not be obtained
    /// within the configured timeout.
    #[must_use]
    pub fn is_lock_timeout(&self) -> bool {
        match self {
            Self::Database(sqlx::Error::PoolTimedOut) => true,
            Self::Database(sqlx::Error::Database(err)) => err
                .code()
                .and_then(|code| code.parse::<i32>().ok())
                // extended result codes keep the primary code in the low byte
                .is_some_and(|code| matches!(code & 0xff, SQLITE_BUSY | SQLITE_LOCKED)),
            _ => false,
        }
    }
}

impl From<StorageError> for TicketingError {
    fn from(err: StorageError) -> Self {
        if err.is_lock_timeout() {
            tracing::warn!(error = %err, "timed out waiting for database lock");
            return Self::Contention(ContentionError);
        }
        Self::Storage(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_classify_pool_timeout_as_contention() {
        let err = StorageError::from(sqlx::Error::PoolTimedOut);
        assert!(err.is_lock_timeout());
        assert!(matches!(
            TicketingError::from(err),
            TicketingError::Contention(_)
        ));
    }

    #[test]
    fn should_classify_row_not_found_as_storage_failure() {
        let err = StorageError::from(sqlx::Error::RowNotFound);
        assert!(!err.is_lock_timeout());
        assert!(matches!(
            TicketingError::from(err),
            TicketingError::Storage(_)
        ));
    }
}
