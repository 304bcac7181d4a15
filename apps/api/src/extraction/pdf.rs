//! PDF text extraction collaborator.
//!
//! `pdf-extract` is synchronous and CPU-bound, so the default extractor runs
//! it on the blocking pool. A panic inside the library surfaces as a join
//! error and is reported as an ordinary extraction failure.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Failed to extract text from PDF: {0}")]
    Pdf(String),

    #[error("Could not extract text from PDF. It might be an image-only PDF or empty.")]
    NoText,

    #[error("PDF extraction task failed: {0}")]
    Task(String),
}

/// Turns raw PDF bytes into plain text.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, bytes: Bytes) -> Result<String, ExtractionError>;
}

/// Default extractor backed by `pdf_extract::extract_text_from_mem`.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract_text(&self, bytes: Bytes) -> Result<String, ExtractionError> {
        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| ExtractionError::Task(e.to_string()))?
            .map_err(|e| ExtractionError::Pdf(e.to_string()))?;

        if text.trim().is_empty() {
            return Err(ExtractionError::NoText);
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_garbage_bytes_fail_without_panicking() {
        let result = PdfTextExtractor
            .extract_text(Bytes::from_static(b"definitely not a pdf"))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_empty_payload_fails() {
        assert!(PdfTextExtractor.extract_text(Bytes::new()).await.is_err());
    }

    #[test]
    fn test_no_text_message_is_user_facing() {
        assert_eq!(
            ExtractionError::NoText.to_string(),
            "Could not extract text from PDF. It might be an image-only PDF or empty."
        );
    }
}
