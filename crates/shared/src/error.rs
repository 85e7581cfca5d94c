use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("credits target {value} is outside {min}..={max}")]
    CreditsOutOfRange { value: i64, min: u8, max: u8 },
    #[error("invalid credits target: {0:?}")]
    InvalidCredits(String),
    #[error("unknown track: {0:?}")]
    UnknownTrack(String),
}

/// Error body returned by the advisory service on non-2xx responses.
///
/// `detail` is either a plain message or a list of validation entries
/// carrying a `msg` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Value,
}

impl ErrorBody {
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
            Value::Array(entries) => {
                let messages: Vec<&str> = entries
                    .iter()
                    .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
                    .collect();
                if messages.is_empty() {
                    None
                } else {
                    Some(messages.join("; "))
                }
            }
            _ => None,
        }
    }
}
