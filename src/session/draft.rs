//! The in-progress user input

use super::attachment::Attachment;

/// Text and optional attachment being composed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftInput {
    pub text: String,
    pub attachment: Option<Attachment>,
}

impl DraftInput {
    #[cfg(test)]
    pub fn new(text: impl Into<String>, attachment: Option<Attachment>) -> Self {
        Self {
            text: text.into(),
            attachment,
        }
    }

    /// Whether the text holds anything besides whitespace
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// A draft can be sent when it has non-blank text or an attachment
    pub fn is_submittable(&self) -> bool {
        self.has_text() || self.attachment.is_some()
    }
}
