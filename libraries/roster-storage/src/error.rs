/// Storage-specific errors
use roster_core::{RosterError, UserId};
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// No row matches the identifier
    #[error("user not found: {id}")]
    NotFound { id: UserId },

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StorageError {
    /// Create a not found error
    pub fn not_found(id: UserId) -> Self {
        Self::NotFound { id }
    }
}

impl From<StorageError> for RosterError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { id } => RosterError::not_found(id),
            other => RosterError::storage(other.to_string()),
        }
    }
}
