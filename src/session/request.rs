//! Outbound request construction
//!
//! Turns a draft snapshot into the request the transport should send. No I/O;
//! the same draft always yields the same request.

use super::attachment::Attachment;
use super::draft::DraftInput;
use serde::Serialize;

/// Path of the text chat endpoint, relative to the backend base address
pub const TEXT_CHAT_PATH: &str = "/chat";
/// Path of the image chat endpoint
pub const IMAGE_CHAT_PATH: &str = "/chat/image";
/// Multipart field carrying the image content
pub const FILE_FIELD: &str = "file";
/// Multipart field carrying the optional caption
pub const CAPTION_FIELD: &str = "message";

/// JSON body of a text chat request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextChatBody {
    pub message: String,
}

/// A fully-formed request, ready for the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundRequest {
    /// JSON `{"message": ...}` to [`TEXT_CHAT_PATH`]
    Text { body: TextChatBody },
    /// Multipart upload to [`IMAGE_CHAT_PATH`]
    Image {
        attachment: Attachment,
        caption: Option<String>,
    },
}

impl OutboundRequest {
    pub fn path(&self) -> &'static str {
        match self {
            OutboundRequest::Text { .. } => TEXT_CHAT_PATH,
            OutboundRequest::Image { .. } => IMAGE_CHAT_PATH,
        }
    }

    /// Short label used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            OutboundRequest::Text { .. } => "text",
            OutboundRequest::Image { .. } => "image",
        }
    }
}

/// Build the request for a draft.
///
/// The caption is included only when the text is not blank, and is sent
/// verbatim.
pub fn build_request(draft: &DraftInput) -> OutboundRequest {
    match &draft.attachment {
        None => OutboundRequest::Text {
            body: TextChatBody {
                message: draft.text.clone(),
            },
        },
        Some(attachment) => OutboundRequest::Image {
            attachment: attachment.clone(),
            caption: draft.has_text().then(|| draft.text.clone()),
        },
    }
}
