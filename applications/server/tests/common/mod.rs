//! Common test utilities and fixtures
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use roster_core::{NewUser, Result, RosterError, User, UserId, UserRepository};
use roster_server::{config::CorsSettings, routes, services::UserService, state::AppState};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// In-memory stand-in for the PostgreSQL gateway
///
/// Assigns ids from 1 upwards and owns the timestamps the same way the
/// real gateway does.
#[derive(Default)]
pub struct InMemoryUserRepository {
    state: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    next_id: UserId,
    rows: BTreeMap<UserId, User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self) -> Result<Vec<User>> {
        Ok(self.state.lock().unwrap().rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: UserId) -> Result<User> {
        self.state
            .lock()
            .unwrap()
            .rows
            .get(&id)
            .cloned()
            .ok_or(RosterError::NotFound { id })
    }

    async fn save(&self, candidate: &NewUser) -> Result<UserId> {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = state.next_id;
        let now = Utc::now();

        state.rows.insert(
            id,
            User {
                id,
                name: candidate.name().to_string(),
                email: candidate.email().to_string(),
                created_at: now,
                updated_at: now,
            },
        );
        Ok(id)
    }

    async fn update(&self, user: &User) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let row = state
            .rows
            .get_mut(&user.id)
            .ok_or(RosterError::NotFound { id: user.id })?;

        row.name = user.name.clone();
        row.email = user.email.clone();
        row.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<()> {
        self.state
            .lock()
            .unwrap()
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(RosterError::NotFound { id })
    }
}

/// Service over a fresh in-memory repository
pub fn create_test_service() -> (Arc<UserService>, Arc<InMemoryUserRepository>) {
    let repository = Arc::new(InMemoryUserRepository::new());
    let service = Arc::new(UserService::new(repository.clone()));
    (service, repository)
}

/// Router wired exactly like the binary, over the given repository
pub fn create_test_app(repository: Arc<dyn UserRepository>) -> axum::Router {
    let service = Arc::new(UserService::new(repository));
    let cors = routes::cors_layer(&CorsSettings {
        origins: "*".to_string(),
    })
    .unwrap();
    routes::router(AppState::new(service), cors)
}

/// Test user data
pub mod fixtures {
    pub const ALICE_NAME: &str = "Alice Smith";
    pub const ALICE_EMAIL: &str = "alice@example.com";

    pub const JOHN_NAME: &str = "John Doe";
    pub const JOHN_EMAIL: &str = "john@doe.com";
}
