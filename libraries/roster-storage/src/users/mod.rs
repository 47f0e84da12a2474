//! User queries

use crate::error::{Result, StorageError};
use chrono::{DateTime, Utc};
use roster_core::types::{NewUser, User, UserId};
use sqlx::PgPool;

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Get all users, ordered by id
pub async fn get_all(pool: &PgPool) -> Result<Vec<User>> {
    let rows = sqlx::query_as::<_, UserRow>(
        "SELECT id, name, email, created_at, updated_at
         FROM users
         ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(User::from).collect())
}

/// Get a user by id
///
/// Returns [`StorageError::NotFound`] when no row matches.
pub async fn get_by_id(pool: &PgPool, id: UserId) -> Result<User> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, name, email, created_at, updated_at
         FROM users
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| StorageError::not_found(id))?;

    Ok(row.into())
}

/// Insert a user and return the assigned id
///
/// Both timestamps are set here to the same UTC instant.
pub async fn insert(pool: &PgPool, candidate: &NewUser) -> Result<UserId> {
    let now = Utc::now();

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO users (name, email, created_at, updated_at)
         VALUES ($1, $2, $3, $3)
         RETURNING id",
    )
    .bind(candidate.name())
    .bind(candidate.email())
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Update name and email of an existing user and bump `updated_at`
pub async fn update(pool: &PgPool, user: &User) -> Result<()> {
    let result = sqlx::query(
        "UPDATE users
         SET name = $1, email = $2, updated_at = $3
         WHERE id = $4",
    )
    .bind(&user.name)
    .bind(&user.email)
    .bind(Utc::now())
    .bind(user.id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::not_found(user.id));
    }

    Ok(())
}

/// Delete a user
pub async fn delete(pool: &PgPool, id: UserId) -> Result<()> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StorageError::not_found(id));
    }

    Ok(())
}
