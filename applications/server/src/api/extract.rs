/// Request extractors
use crate::error::ServerError;
use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use roster_core::types::UserId;
use serde::de::DeserializeOwned;

/// JSON body whose rejections (syntax, missing fields, wrong content type)
/// are reported as `400 {"error": ...}`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ServerError::BadRequest(rejection.body_text()))?;

        Ok(Self(value))
    }
}

/// `:id` path segment parsed as a user id
///
/// Undecodable segments and non-integers are both `400 {"error": ...}`.
#[derive(Debug, Clone, Copy)]
pub struct UserIdParam(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for UserIdParam
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ServerError::BadRequest(rejection.body_text()))?;

        parse_id(&raw).map(Self)
    }
}

fn parse_id(raw: &str) -> Result<UserId, ServerError> {
    raw.parse::<UserId>()
        .map_err(|_| ServerError::BadRequest("invalid id".to_string()))
}
