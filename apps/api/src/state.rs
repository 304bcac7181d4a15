use std::sync::Arc;

use crate::config::Config;
use crate::extraction::pdf::TextExtractor;
use crate::llm_client::LanguageModel;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Immutable after startup; concurrent requests share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// PDF text extraction collaborator. Default: `PdfTextExtractor`.
    pub extractor: Arc<dyn TextExtractor>,
    /// Model collaborator. Default: `GeminiClient`.
    pub llm: Arc<dyn LanguageModel>,
}
