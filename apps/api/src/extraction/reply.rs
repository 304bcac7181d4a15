//! Turns a model's free-text reply into a JSON object.
//!
//! Models often wrap JSON in markdown fences even when told not to. The
//! lookup order is: a block fenced as `json`, then any fenced block, then
//! the whole reply. A closing fence only counts at the start of a line, so
//! backticks inside JSON strings do not end the block.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("reply is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("reply is JSON but not an object")]
    NotAnObject,
}

fn json_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)```[ \t]*json[ \t]*\r?\n(.*?)\r?\n[ \t]*```").expect("valid regex")
    })
}

fn any_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)```[ \t]*[A-Za-z0-9_+-]*[ \t]*\r?\n(.*?)\r?\n[ \t]*```")
            .expect("valid regex")
    })
}

/// Same-line form (```json {...}```), tried only when no line-anchored fence
/// is present.
fn inline_json_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```[ \t]*json(.*?)```").expect("valid regex"))
}

/// Returns the text that should be handed to the JSON parser.
pub fn json_payload(reply: &str) -> &str {
    json_fence()
        .captures(reply)
        .or_else(|| any_fence().captures(reply))
        .or_else(|| inline_json_fence().captures(reply))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(reply)
        .trim()
}

/// Parses the reply into a JSON object.
pub fn parse_reply(reply: &str) -> Result<Map<String, Value>, ReplyError> {
    match serde_json::from_str::<Value>(json_payload(reply))? {
        Value::Object(object) => Ok(object),
        _ => Err(ReplyError::NotAnObject),
    }
}
