//! Roster Core
//!
//! Domain types, validation rules and the persistence port for the Roster
//! user service.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `User`, `NewUser`
//! - **Core Traits**: `UserRepository`, implemented by the storage gateway
//! - **Error Handling**: Unified `RosterError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use roster_core::types::{NewUser, User};
//!
//! // Validate a creation candidate
//! let candidate = NewUser::new("Alice Smith", "alice@example.com").unwrap();
//! assert_eq!(candidate.name(), "Alice Smith");
//!
//! // Reconstruct an already persisted user
//! let user = User::new(1, "Alice Smith", "alice@example.com").unwrap();
//! assert_eq!(user.created_at, user.updated_at);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod repository;
pub mod types;

// Re-export commonly used types
pub use error::{Result, RosterError};
pub use repository::UserRepository;
pub use types::{NewUser, User, UserId};

#[cfg(feature = "mock")]
pub use repository::MockUserRepository;
