//! Wire types for the assistant backend

use serde::Deserialize;
use serde_json::Value;

/// Successful chat reply
///
/// Text chat returns only `response`; image chat adds `image_info` and
/// `filename`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub image_info: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
}

/// Error body returned with non-2xx statuses
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    detail: Option<Value>,
}

/// Placeholder detail when the server supplies none
pub(crate) const UNKNOWN_ERROR_DETAIL: &str = "Unknown error";

impl ErrorBody {
    /// Extract the server's detail from a raw error body.
    ///
    /// String details are used as-is; structured ones (validation errors) are
    /// rendered as JSON. Anything else falls back to "Unknown error".
    pub(crate) fn detail_from(body: &str) -> String {
        let detail = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.detail);
        match detail {
            Some(Value::String(s)) if !s.is_empty() => s,
            Some(Value::Null | Value::String(_)) | None => UNKNOWN_ERROR_DETAIL.to_string(),
            Some(other) => other.to_string(),
        }
    }
}

/// Backend health report
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub models: Vec<String>,
}
