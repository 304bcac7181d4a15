pub mod cors;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::extraction::handlers::{handle_index, handle_parse_resumes};
use crate::state::AppState;

async fn method_not_allowed() -> Result<(), AppError> {
    Err(AppError::MethodNotAllowed)
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}

/// Routing table:
///
/// | method  | path      | handler                         |
/// |---------|-----------|---------------------------------|
/// | OPTIONS | any       | 204 (cors middleware)           |
/// | GET     | /         | upload page                     |
/// | POST    | /, /parse | batch extraction                |
/// | GET     | /health   | status                          |
/// | other   | known     | 405 JSON                        |
/// | any     | unknown   | 404 plain text                  |
pub fn build_router(state: AppState) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        .route(
            "/",
            get(handle_index)
                .post(handle_parse_resumes)
                .fallback(method_not_allowed),
        )
        .route(
            "/parse",
            post(handle_parse_resumes).fallback(method_not_allowed),
        )
        .route(
            "/health",
            get(health::health_handler).fallback(method_not_allowed),
        )
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(middleware::from_fn(cors::cors))
        .with_state(state)
}
