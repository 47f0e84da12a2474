//! Persistence port for users

use crate::error::Result;
use crate::types::{NewUser, User, UserId};
use async_trait::async_trait;

/// Durable storage of user rows
///
/// The gateway is the only writer of `id`, `created_at` and `updated_at`.
/// Every write touches exactly one row and each call auto-commits on its own.
///
/// Implementations report a missing row with [`RosterError::NotFound`] and
/// any connectivity or query failure with [`RosterError::Storage`].
///
/// [`RosterError::NotFound`]: crate::RosterError::NotFound
/// [`RosterError::Storage`]: crate::RosterError::Storage
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users ordered by id ascending; empty when there are none
    async fn find_all(&self) -> Result<Vec<User>>;

    /// The user with the given id
    async fn find_by_id(&self, id: UserId) -> Result<User>;

    /// Insert a user and return the id the store assigned
    async fn save(&self, candidate: &NewUser) -> Result<UserId>;

    /// Persist `name` and `email` for the row matching `user.id` and bump `updated_at`
    async fn update(&self, user: &User) -> Result<()>;

    /// Remove the row with the given id
    async fn delete(&self, id: UserId) -> Result<()>;
}
