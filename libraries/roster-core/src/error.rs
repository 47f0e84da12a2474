//! Core error types for Roster

use crate::types::UserId;
use thiserror::Error;

/// Result type alias using `RosterError`
pub type Result<T> = std::result::Result<T, RosterError>;

/// Core error type for Roster
///
/// The validation variants and `NotFound` are sentinels the HTTP layer
/// classifies into status codes; `Storage` carries detail that is logged
/// but never returned to clients.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    /// Identifier is zero or negative
    #[error("id must be greater than 0")]
    InvalidId,

    /// Name is empty or shorter than the minimum length
    #[error("name must be at least 5 characters long")]
    InvalidName,

    /// Email does not match the accepted pattern
    #[error("invalid email format")]
    InvalidEmail,

    /// No user row matches the identifier
    #[error("user not found")]
    NotFound {
        /// Identifier that was looked up
        id: UserId,
    },

    /// Connectivity or query failure in the persistence gateway
    #[error("Storage error: {0}")]
    Storage(String),
}

impl RosterError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a not found error
    pub fn not_found(id: UserId) -> Self {
        Self::NotFound { id }
    }

    /// Whether this error rejects caller input (HTTP 400 family)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidId | Self::InvalidName | Self::InvalidEmail
        )
    }

    /// Whether this error means the user does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
