use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Batch-level error type: anything that aborts the whole request before or
/// outside the per-file loop. Per-file problems never surface here; they are
/// recorded in the result array instead.
///
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("GEMINI_API_KEY environment variable not set")]
    MissingApiKey,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("{0}")]
    Validation(String),

    #[error("Failed to read form data: {0}")]
    Form(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::MissingApiKey => {
                tracing::error!(
                    "GEMINI_API_KEY is not set; check the .env file or environment variables"
                );
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Form(msg) => {
                tracing::error!("Form error: {msg}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_missing_api_key_is_500_with_message() {
        let (status, body) = body_json(AppError::MissingApiKey).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "GEMINI_API_KEY environment variable not set");
    }

    #[tokio::test]
    async fn test_validation_is_400_and_only_carries_error_field() {
        let (status, body) =
            body_json(AppError::Validation("No PDF files provided".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "No PDF files provided" }));
    }

    #[tokio::test]
    async fn test_method_not_allowed_is_405() {
        let (status, body) = body_json(AppError::MethodNotAllowed).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["error"], "Method not allowed");
    }
}
