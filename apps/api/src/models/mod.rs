use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use item::{Item, ScoredItem};

mod item;

/// Body of `/recommend`
///
/// `preferences` is kept untyped so a missing, null or non-string value is
/// reported as a validation error rather than a body decoding error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub preferences: Option<Value>,
}

impl RecommendationRequest {
    /// The preferences text, if it is a non-empty string.
    pub fn preferences_text(&self) -> Option<&str> {
        match &self.preferences {
            Some(Value::String(text)) if !text.is_empty() => Some(text),
            _ => None,
        }
    }
}

/// Body of `/process_data`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessDataRequest {
    #[serde(default)]
    pub message: Option<Value>,
}

impl ProcessDataRequest {
    /// The message to echo; non-string values render as JSON text.
    pub fn message_text(&self, default: &str) -> String {
        match &self.message {
            None => default.to_string(),
            Some(Value::String(message)) => message.clone(),
            Some(other) => other.to_string(),
        }
    }
}

/// Successful reply of the `/process_data` echo endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ProcessDataResponse {
    pub status: &'static str,
    pub processed_message: String,
}

impl ProcessDataResponse {
    pub fn success(processed_message: String) -> Self {
        Self {
            status: "success",
            processed_message,
        }
    }
}
