/// User application service - orchestrates validation and persistence
use roster_core::{
    error::Result,
    repository::UserRepository,
    types::{NewUser, User, UserId},
};
use std::sync::Arc;

/// Use cases over the user resource
///
/// Holds no state of its own beyond the injected repository, so one
/// instance is shared by every request.
#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// All users, ordered by id
    pub async fn get_all_users(&self) -> Result<Vec<User>> {
        self.repository.find_all().await
    }

    pub async fn get_user_by_id(&self, id: UserId) -> Result<User> {
        self.repository.find_by_id(id).await
    }

    /// Validate, insert, then re-read the row so the caller sees the
    /// store-assigned id and timestamps
    pub async fn create_user(&self, name: &str, email: &str) -> Result<User> {
        let candidate = NewUser::new(name, email)?;
        let id = self.repository.save(&candidate).await?;
        tracing::info!(user_id = id, "User created");

        self.repository.find_by_id(id).await
    }

    /// Validate the new fields, overwrite them on the stored user, then re-read it
    ///
    /// Validation runs before the lookup, so invalid input on a missing id
    /// reports the validation error.
    pub async fn update_user(&self, id: UserId, name: &str, email: &str) -> Result<User> {
        let changes = NewUser::new(name, email)?;

        let mut user = self.repository.find_by_id(id).await?;
        user.apply(changes);
        self.repository.update(&user).await?;
        tracing::info!(user_id = id, "User updated");

        self.repository.find_by_id(id).await
    }

    pub async fn delete_user(&self, id: UserId) -> Result<()> {
        self.repository.delete(id).await?;
        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }
}
