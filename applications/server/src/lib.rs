//! Roster Server Library
//!
//! HTTP service exposing CRUD operations over the user resource.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use routes::{cors_layer, router};
pub use services::UserService;
pub use state::AppState;
