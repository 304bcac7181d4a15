use axum::extract::Multipart;
use tracing::debug;

use crate::errors::AppError;
use crate::extraction::models::{FileEntry, UploadPart};

/// Form field that carries resume uploads.
pub const FILE_FIELD: &str = "file";

/// Reads every part of the form and keeps, in order, those named `file`.
///
/// A part with a filename becomes `UploadPart::File`; one without becomes
/// `UploadPart::Other`. Parts under any other name are ignored. A malformed
/// body aborts the whole batch.
pub async fn read_upload_parts(multipart: &mut Multipart) -> Result<Vec<UploadPart>, AppError> {
    let mut parts = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Form(e.to_string()))?
    {
        let field_name = field.name().unwrap_or_default().to_string();
        if field_name != FILE_FIELD {
            debug!("Ignoring form field '{field_name}'");
            continue;
        }

        let file_name = field.file_name().map(String::from);
        let declared_type = field.content_type().unwrap_or_default().to_string();

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Form(e.to_string()))?;

        match file_name {
            Some(name) => parts.push(UploadPart::File(FileEntry {
                name,
                declared_type,
                bytes,
            })),
            None => parts.push(UploadPart::Other { name: field_name }),
        }
    }

    Ok(parts)
}
