use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by the wallet API on non-OK responses.
///
/// Every field is optional; the wallet does not guarantee a shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// Parses a raw response body, yielding the trimmed message if one is present.
    pub fn message_from_bytes(raw: &[u8]) -> Option<String> {
        let body: ApiErrorBody = serde_json::from_slice(raw).ok()?;
        body.message
            .map(|message| message.trim().to_string())
            .filter(|message| !message.is_empty())
    }
}

#[derive(Debug, Clone, Error)]
#[error("wallet api returned status {status}: {message}")]
pub struct ApiException {
    pub status: u16,
    pub message: String,
}

impl ApiException {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}
