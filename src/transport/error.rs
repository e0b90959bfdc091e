//! Transport failure types

use std::time::Duration;
use thiserror::Error;

/// Prefix of every failure shown in the transcript
const DISPLAY_PREFIX: &str = "❌ Error: ";

/// Detail fragment the backend uses when it cannot decode an upload
const UNDECODABLE_IMAGE_MARKER: &str = "cannot identify image";

/// Anything that went wrong reaching the backend or reading its answer
///
/// `Display` is the user-facing sentence; [`TransportFailure::display_text`]
/// adds the transcript prefix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportFailure {
    /// Non-2xx status with the server's detail
    #[error("HTTP {status}: {detail}")]
    HttpError { status: u16, detail: String },

    /// No response could be obtained from the backend
    #[error("Cannot connect to backend at {endpoint}. Make sure the backend server is running.")]
    Unreachable { endpoint: String },

    /// The backend could not decode the uploaded image
    #[error("Image format not supported. Please try uploading a JPEG, PNG, or GIF image.")]
    UnsupportedImageFormat { detail: String },

    /// Client-side timeout elapsed before the backend answered
    #[error("Request to {endpoint} timed out after {}s.", .timeout.as_secs())]
    TimedOut { endpoint: String, timeout: Duration },

    /// 2xx status but the body was not a chat reply
    #[error("Invalid response from backend: {0}")]
    InvalidResponse(String),

    /// The request could not be assembled
    #[error("Could not build request: {0}")]
    InvalidRequest(String),
}

impl TransportFailure {
    /// Classify a non-2xx response
    pub fn from_status(status: u16, detail: String) -> Self {
        if detail.contains(UNDECODABLE_IMAGE_MARKER) {
            TransportFailure::UnsupportedImageFormat { detail }
        } else {
            TransportFailure::HttpError { status, detail }
        }
    }

    /// Text appended to the transcript for this failure
    pub fn display_text(&self) -> String {
        format!("{DISPLAY_PREFIX}{self}")
    }

    /// Short label used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            TransportFailure::HttpError { .. } => "http_error",
            TransportFailure::Unreachable { .. } => "unreachable",
            TransportFailure::UnsupportedImageFormat { .. } => "unsupported_image_format",
            TransportFailure::TimedOut { .. } => "timed_out",
            TransportFailure::InvalidResponse(_) => "invalid_response",
            TransportFailure::InvalidRequest(_) => "invalid_request",
        }
    }
}
