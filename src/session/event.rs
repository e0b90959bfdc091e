//! Events that can occur in a session

use super::attachment::Attachment;
use crate::transport::{ChatReply, TransportFailure};

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    // Draft edits, accepted in every phase
    EditText {
        text: String,
    },
    AttachmentSelected {
        attachment: Attachment,
    },
    AttachmentCleared,

    // Submission lifecycle
    Submit,
    Resolved {
        outcome: Result<ChatReply, TransportFailure>,
    },
    /// Runtime finished applying the resolution's effects
    Settled,
}

impl Event {
    /// Short label used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Event::EditText { .. } => "edit_text",
            Event::AttachmentSelected { .. } => "attachment_selected",
            Event::AttachmentCleared => "attachment_cleared",
            Event::Submit => "submit",
            Event::Resolved { .. } => "resolved",
            Event::Settled => "settled",
        }
    }
}
