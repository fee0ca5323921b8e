//! Shared API Models

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Standard JSON message envelope used by simple responses and errors
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Deserialize a request body, accepting only JSON objects. Serde's derived
/// deserializers also accept sequences, so an array body whose arity lines up
/// would otherwise slip past field validation.
pub fn parse_object<T: DeserializeOwned>(value: Value) -> Option<T> {
    if !value.is_object() {
        return None;
    }
    serde_json::from_value(value).ok()
}
