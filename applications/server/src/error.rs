/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use roster_core::RosterError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Domain(#[from] RosterError),
}

impl ServerError {
    /// HTTP status this error is reported with
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Domain(e) if e.is_validation() => StatusCode::BAD_REQUEST,
            ServerError::Domain(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            ServerError::Domain(_) | ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            ServerError::BadRequest(msg) => msg,
            ServerError::Domain(ref e) if status != StatusCode::INTERNAL_SERVER_ERROR => {
                e.to_string()
            }
            ServerError::Domain(ref e) => {
                tracing::error!("Database error: {}", e);
                "Internal server error".to_string()
            }
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                "Internal server error".to_string()
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
