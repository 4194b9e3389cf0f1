//! GraphQL response wire types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FetchError, Result};

/// Decoded response body: `{ "data"?: any, "errors"?: [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphQlResponse {
    /// Result payload; a JSON `null` decodes as absent.
    #[serde(default)]
    pub data: Option<Value>,

    /// Error entries; an empty array counts as no errors.
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

/// One entry of the `errors` array.
///
/// Only `message` is used; the remaining fields are kept for callers that
/// want them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphQlError {
    #[serde(default)]
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

impl GraphQlError {
    /// Creates an error entry with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }
}

impl GraphQlResponse {
    /// Decodes a response body.
    pub fn from_body(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| FetchError::decode(e.to_string()))
    }

    /// Returns the joined error message if the `errors` array is non-empty.
    pub fn error_message(&self) -> Option<String> {
        self.errors
            .as_deref()
            .filter(|errors| !errors.is_empty())
            .map(join_error_messages)
    }
}

/// Joins error messages with `,` in their original order.
pub fn join_error_messages(errors: &[GraphQlError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join(",")
}
