//! Attachment validation
//!
//! A file picked by the user becomes an [`Attachment`] only after passing the
//! type and size checks here. Validation is pure; callers decide how to show
//! a rejection.

use bytes::Bytes;
use thiserror::Error;

/// Largest attachment accepted, inclusive (10 MiB)
pub const MAX_ATTACHMENT_BYTES: u64 = 10 * 1024 * 1024;

/// MIME prefix every attachment must carry
const IMAGE_MIME_PREFIX: &str = "image/";

/// A file the user picked, before validation
#[derive(Debug, Clone)]
pub struct FileCandidate {
    pub name: String,
    pub mime_type: String,
    pub bytes: Bytes,
}

impl FileCandidate {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn byte_size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// A validated image staged for submission
///
/// Cloning is cheap: the content is a shared [`Bytes`] buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    name: String,
    mime_type: String,
    bytes: Bytes,
}

impl Attachment {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn byte_size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn summary(&self) -> AttachmentSummary {
        AttachmentSummary {
            name: self.name.clone(),
            mime_type: self.mime_type.clone(),
            byte_size: self.byte_size(),
        }
    }
}

/// Display-only description of the staged attachment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentSummary {
    pub name: String,
    pub mime_type: String,
    pub byte_size: u64,
}

impl AttachmentSummary {
    /// Size in kilobytes with one decimal, e.g. `12.3KB`
    pub fn size_label(&self) -> String {
        let tenths = (self.byte_size * 10 + 512) / 1024;
        format!("{}.{}KB", tenths / 10, tenths % 10)
    }
}

/// Why a candidate file was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectionReason {
    #[error("Please select an image file (JPEG, PNG, GIF, etc.)")]
    UnsupportedType,
    #[error("File size too large. Please select an image smaller than 10MB.")]
    TooLarge,
}

/// Check a candidate file and wrap it as an [`Attachment`].
///
/// The type check runs first, so an oversized non-image reports
/// `UnsupportedType`.
pub fn validate(file: FileCandidate) -> Result<Attachment, RejectionReason> {
    if !file.mime_type.starts_with(IMAGE_MIME_PREFIX) {
        return Err(RejectionReason::UnsupportedType);
    }
    if file.byte_size() > MAX_ATTACHMENT_BYTES {
        return Err(RejectionReason::TooLarge);
    }
    Ok(Attachment {
        name: file.name,
        mime_type: file.mime_type,
        bytes: file.bytes,
    })
}
