//! Axum route handlers for the resume extraction API.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::errors::AppError;
use crate::extraction::models::ExtractedRecord;
use crate::extraction::processor::process_batch;
use crate::extraction::upload::read_upload_parts;
use crate::state::AppState;

/// POST / (also mounted at POST /parse)
///
/// Accepts `multipart/form-data` with one or more `file` parts and returns one
/// record per uploaded file. The credential is checked before the body is read.
pub async fn handle_parse_resumes(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Vec<ExtractedRecord>>, AppError> {
    let api_key = state
        .config
        .gemini_api_key
        .as_deref()
        .ok_or(AppError::MissingApiKey)?;

    let mut multipart = multipart.map_err(|e| AppError::Form(e.to_string()))?;
    let parts = read_upload_parts(&mut multipart).await?;

    if parts.is_empty() {
        return Err(AppError::Validation("No PDF files provided".to_string()));
    }

    let records = process_batch(
        parts,
        api_key,
        state.extractor.as_ref(),
        state.llm.as_ref(),
    )
    .await;

    Ok(Json(records))
}

/// GET /
///
/// Serves the upload page. Read per request so the page can be edited
/// without a restart.
pub async fn handle_index(State(state): State<AppState>) -> Response {
    match tokio::fs::read_to_string(&state.config.index_html_path).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!(
                "Failed to read {}: {e}",
                state.config.index_html_path.display()
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error loading index.html",
            )
                .into_response()
        }
    }
}
