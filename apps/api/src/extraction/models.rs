use bytes::Bytes;
use serde::Serialize;
use serde_json::{Map, Value};

// ────────────────────────────────────────────────────────────────────────────
// Upload side
// ────────────────────────────────────────────────────────────────────────────

/// One uploaded file. Only lives for the duration of a request.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Client-supplied file name. Not unique, not sanitized.
    pub name: String,
    /// Declared content type of the part; empty when the client sent none.
    pub declared_type: String,
    pub bytes: Bytes,
}

impl FileEntry {
    pub fn is_pdf(&self) -> bool {
        self.declared_type.to_ascii_lowercase().contains("pdf")
    }
}

/// A `file` part of the multipart form, classified when the form is read.
#[derive(Debug, Clone)]
pub enum UploadPart {
    File(FileEntry),
    /// A plain form value submitted under the `file` name. Dropped from the
    /// result set with a log line.
    Other { name: String },
}

// ────────────────────────────────────────────────────────────────────────────
// Result side
// ────────────────────────────────────────────────────────────────────────────

/// One element of the response array.
///
/// `Parsed` is whatever JSON object the model produced, with `fileName`
/// overwritten by the real upload name. Its fields are not validated against
/// the schema the prompt asks for.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ExtractedRecord {
    Parsed(Map<String, Value>),
    Failed(FailedRecord),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FailedRecord {
    pub file_name: String,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_model_response: Option<String>,
}

impl ExtractedRecord {
    /// Builds a success record, stamping the true upload name over whatever
    /// `fileName` the model emitted.
    pub fn parsed(file_name: &str, mut object: Map<String, Value>) -> Self {
        object.insert("fileName".to_string(), Value::String(file_name.to_string()));
        ExtractedRecord::Parsed(object)
    }

    pub fn failed(file_name: &str, error: impl Into<String>) -> Self {
        ExtractedRecord::Failed(FailedRecord {
            file_name: file_name.to_string(),
            error: error.into(),
            raw_model_response: None,
        })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ExtractedRecord::Failed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(declared_type: &str) -> FileEntry {
        FileEntry {
            name: "resume.pdf".to_string(),
            declared_type: declared_type.to_string(),
            bytes: Bytes::new(),
        }
    }

    #[test]
    fn test_is_pdf_matches_declared_type_substring() {
        assert!(entry("application/pdf").is_pdf());
        assert!(entry("application/x-pdf").is_pdf());
        assert!(entry("Application/PDF").is_pdf());
        assert!(!entry("text/plain").is_pdf());
        assert!(!entry("").is_pdf());
    }

    #[test]
    fn test_parsed_overwrites_model_file_name() {
        let object = json!({"fileName": "JohnDoe_Resume.pdf", "name": "Jane Roe"})
            .as_object()
            .cloned()
            .unwrap();
        let record = ExtractedRecord::parsed("jane.pdf", object);
        assert!(!record.is_error());
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["fileName"], "jane.pdf");
        assert_eq!(value["name"], "Jane Roe");
    }

    #[test]
    fn test_failed_record_omits_raw_response_when_absent() {
        let record = ExtractedRecord::failed("notes.txt", "File is not a PDF and was skipped.");
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"fileName": "notes.txt", "error": "File is not a PDF and was skipped."})
        );
    }

    #[test]
    fn test_failed_record_serializes_raw_response_in_camel_case() {
        let record = ExtractedRecord::Failed(FailedRecord {
            file_name: "a.pdf".to_string(),
            error: "Failed to parse model response as JSON".to_string(),
            raw_model_response: Some("not json".to_string()),
        });
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["rawModelResponse"], "not json");
        assert_eq!(value["fileName"], "a.pdf");
    }

    #[test]
    fn test_parsed_record_serializes_as_plain_object() {
        let object = json!({"name": "Ada", "keySkills": ["Rust"]})
            .as_object()
            .cloned()
            .unwrap();
        let value = serde_json::to_value(ExtractedRecord::parsed("ada.pdf", object)).unwrap();
        assert_eq!(
            value,
            json!({"name": "Ada", "keySkills": ["Rust"], "fileName": "ada.pdf"})
        );
    }
}
