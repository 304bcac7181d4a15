//! Resume batch processing — the per-file loop.
//!
//! Flow per file: PDF check → text extraction → prompt → model call →
//! fence-tolerant JSON parse. Files are handled strictly one after another.
//! A failure in any step becomes an error record for that file and the loop
//! moves on; nothing here fails the batch.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::extraction::models::{ExtractedRecord, FailedRecord, FileEntry, UploadPart};
use crate::extraction::pdf::{ExtractionError, TextExtractor};
use crate::extraction::prompts::build_extraction_prompt;
use crate::extraction::reply::{parse_reply, ReplyError};
use crate::llm_client::{LanguageModel, LlmError};

const GENERIC_FAILURE_MESSAGE: &str = "An error occurred during processing.";

/// Why a single file produced an error record.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("File is not a PDF and was skipped.")]
    NotPdf,

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Model(#[from] LlmError),

    #[error("Failed to parse model response as JSON")]
    Parse { raw: String, source: ReplyError },

    /// A collaborator panicked; carries the panic message when it had one.
    #[error("{0}")]
    Panicked(String),
}

impl FileError {
    fn into_record(self, file_name: &str) -> ExtractedRecord {
        let mut message = self.to_string();
        if message.trim().is_empty() {
            message = GENERIC_FAILURE_MESSAGE.to_string();
        }
        match self {
            FileError::Parse { raw, .. } => ExtractedRecord::Failed(FailedRecord {
                file_name: file_name.to_string(),
                error: message,
                raw_model_response: Some(raw),
            }),
            _ => ExtractedRecord::failed(file_name, message),
        }
    }
}

/// Processes every uploaded part in submission order.
///
/// Returns one record per `UploadPart::File`; `UploadPart::Other` values are
/// logged and dropped.
pub async fn process_batch(
    parts: Vec<UploadPart>,
    api_key: &str,
    extractor: &dyn TextExtractor,
    model: &dyn LanguageModel,
) -> Vec<ExtractedRecord> {
    let batch_id = Uuid::new_v4();
    let span = info_span!("resume_batch", %batch_id, parts = parts.len());

    async move {
        let mut records = Vec::with_capacity(parts.len());

        for part in parts {
            let entry = match part {
                UploadPart::File(entry) => entry,
                UploadPart::Other { name } => {
                    warn!("Skipping non-file entry '{name}' in multipart form data");
                    continue;
                }
            };

            let outcome = AssertUnwindSafe(process_file(&entry, api_key, extractor, model))
                .catch_unwind()
                .await
                .unwrap_or_else(|panic| Err(FileError::Panicked(panic_message(panic))));

            let record = match outcome {
                Ok(object) => {
                    info!(file = %entry.name, "Resume parsed");
                    ExtractedRecord::parsed(&entry.name, object)
                }
                Err(FileError::NotPdf) => {
                    warn!(
                        "Skipping non-PDF file: {} (Type: {})",
                        entry.name, entry.declared_type
                    );
                    FileError::NotPdf.into_record(&entry.name)
                }
                Err(e) => {
                    warn!(file = %entry.name, "Error processing file: {e}");
                    e.into_record(&entry.name)
                }
            };
            records.push(record);
        }

        let failed = records.iter().filter(|r| r.is_error()).count();
        info!(records = records.len(), failed, "Batch complete");
        records
    }
    .instrument(span)
    .await
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        String::new()
    }
}

async fn process_file(
    entry: &FileEntry,
    api_key: &str,
    extractor: &dyn TextExtractor,
    model: &dyn LanguageModel,
) -> Result<Map<String, Value>, FileError> {
    if !entry.is_pdf() {
        return Err(FileError::NotPdf);
    }

    let resume_text = extractor.extract_text(entry.bytes.clone()).await?;
    let prompt = build_extraction_prompt(&resume_text);
    let reply = model.generate(api_key, &prompt).await?;

    parse_reply(&reply).map_err(|source| FileError::Parse { raw: reply, source })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
