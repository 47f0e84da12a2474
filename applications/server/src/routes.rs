/// Router assembly: user routes, CORS and request tracing
use crate::{
    api,
    config::CorsSettings,
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::{any::Any, time::Duration};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, Any as AnyOrigin, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};

const CORS_MAX_AGE: Duration = Duration::from_secs(12 * 60 * 60);

/// Build the CORS policy for the configured origins
///
/// Credentials are only allowed for an explicit origin list; browsers
/// refuse credentialed responses with a wildcard origin.
pub fn cors_layer(settings: &CorsSettings) -> Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::HEAD,
        ])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers([header::CONTENT_LENGTH])
        .max_age(CORS_MAX_AGE);

    if settings.allows_any() {
        return Ok(layer.allow_origin(AnyOrigin));
    }

    let origins = settings
        .origin_list()
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|_| ServerError::Config(format!("Invalid CORS origin: {origin}")))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(layer
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true))
}

/// All HTTP routes of the service
pub fn router(app_state: AppState, cors: CorsLayer) -> Router {
    let user_routes = Router::new()
        .route(
            "/api/v1/users",
            get(api::users::list_users).post(api::users::create_user),
        )
        .route(
            "/api/v1/users/:id",
            get(api::users::get_user)
                .put(api::users::update_user)
                .delete(api::users::delete_user),
        );

    user_routes
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .layer(cors)
        .with_state(app_state)
}

/// A panicking handler becomes a logged `500 {"error": ...}`
#[allow(clippy::needless_pass_by_value)]
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    tracing::error!("Handler panicked: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error" })),
    )
        .into_response()
}
