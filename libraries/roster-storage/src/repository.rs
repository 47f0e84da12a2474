use crate::users;
use async_trait::async_trait;
use roster_core::{
    error::Result,
    repository::UserRepository,
    types::{NewUser, User, UserId},
};
use sqlx::PgPool;

/// User repository backed by a PostgreSQL pool
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_all(&self) -> Result<Vec<User>> {
        Ok(users::get_all(&self.pool).await?)
    }

    async fn find_by_id(&self, id: UserId) -> Result<User> {
        Ok(users::get_by_id(&self.pool, id).await?)
    }

    async fn save(&self, candidate: &NewUser) -> Result<UserId> {
        Ok(users::insert(&self.pool, candidate).await?)
    }

    async fn update(&self, user: &User) -> Result<()> {
        Ok(users::update(&self.pool, user).await?)
    }

    async fn delete(&self, id: UserId) -> Result<()> {
        Ok(users::delete(&self.pool, id).await?)
    }
}
