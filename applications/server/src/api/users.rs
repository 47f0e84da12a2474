/// Users API routes
use crate::{
    api::extract::{JsonBody, UserIdParam},
    error::{Result, ServerError},
    state::AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use regex::Regex;
use roster_core::types::{User, NAME_MIN_CHARS};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

static EMAIL_SHAPE_RE: OnceLock<Regex> = OnceLock::new();

fn email_shape_regex() -> &'static Regex {
    EMAIL_SHAPE_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
            .unwrap_or_else(|error| panic!("email shape regex failed to compile: {error}"))
    })
}

/// Body of `POST /api/v1/users` and `PUT /api/v1/users/:id`
#[derive(Debug, Deserialize)]
pub struct UserPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl UserPayload {
    /// Request-binding checks: both fields present, name long enough,
    /// email shaped like an address. Case is not checked here.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(ServerError::BadRequest("name is required".to_string()));
        }
        if self.name.chars().count() < NAME_MIN_CHARS {
            return Err(ServerError::BadRequest(format!(
                "name must be at least {NAME_MIN_CHARS} characters"
            )));
        }
        if self.email.is_empty() {
            return Err(ServerError::BadRequest("email is required".to_string()));
        }
        if !email_shape_regex().is_match(&self.email) {
            return Err(ServerError::BadRequest(
                "email must be a valid email address".to_string(),
            ));
        }
        Ok(())
    }
}

/// `{"data": ...}` envelope used by the read endpoints
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// POST /api/v1/users
/// Create a user; responds with the bare stored user
pub async fn create_user(
    State(app_state): State<AppState>,
    JsonBody(req): JsonBody<UserPayload>,
) -> Result<(StatusCode, Json<User>)> {
    req.validate()?;

    let user = app_state.users.create_user(&req.name, &req.email).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/v1/users
pub async fn list_users(
    State(app_state): State<AppState>,
) -> Result<Json<DataResponse<Vec<User>>>> {
    let users = app_state.users.get_all_users().await?;
    Ok(Json(DataResponse { data: users }))
}

/// GET /api/v1/users/:id
pub async fn get_user(
    UserIdParam(id): UserIdParam,
    State(app_state): State<AppState>,
) -> Result<Json<DataResponse<User>>> {
    let user = app_state.users.get_user_by_id(id).await?;
    Ok(Json(DataResponse { data: user }))
}

/// PUT /api/v1/users/:id
/// Replace name and email
pub async fn update_user(
    UserIdParam(id): UserIdParam,
    State(app_state): State<AppState>,
    JsonBody(req): JsonBody<UserPayload>,
) -> Result<Json<DataResponse<User>>> {
    req.validate()?;

    let user = app_state
        .users
        .update_user(id, &req.name, &req.email)
        .await?;
    Ok(Json(DataResponse { data: user }))
}

/// DELETE /api/v1/users/:id
pub async fn delete_user(
    UserIdParam(id): UserIdParam,
    State(app_state): State<AppState>,
) -> Result<StatusCode> {
    app_state.users.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
