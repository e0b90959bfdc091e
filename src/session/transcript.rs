//! Ordered, append-only message history

use super::attachment::Attachment;
use chrono::{DateTime, Utc};
use std::fmt;

/// Who produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// Opaque reference to displayable image data
///
/// Created by the presentation layer; the session only stores and hands it
/// back.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageHandle(String);

impl ImageHandle {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[cfg(test)]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Turns attachment bytes into something the presentation layer can show
pub trait ImageHandleFactory: Send + Sync {
    fn create(&self, attachment: &Attachment) -> ImageHandle;
}

/// An entry as produced by a transition, before it is stamped and stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub role: Role,
    pub content: String,
    /// Source of the image handle for user entries that carried an attachment
    pub image: Option<Attachment>,
    pub metadata: Option<String>,
}

impl NewEntry {
    pub fn user(content: impl Into<String>, image: Option<Attachment>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            image,
            metadata: None,
        }
    }

    pub fn assistant(content: impl Into<String>, metadata: Option<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            image: None,
            metadata,
        }
    }
}

/// A message in the transcript. Never changes once stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEntry {
    pub role: Role,
    pub content: String,
    pub image_ref: Option<ImageHandle>,
    pub metadata: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Append-only log of [`MessageEntry`] values in insertion order
#[derive(Debug, Default)]
pub struct TranscriptStore {
    entries: Vec<MessageEntry>,
}

impl TranscriptStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: MessageEntry) {
        self.entries.push(entry);
    }

    /// Copy of the history; mutating it does not touch the store
    pub fn snapshot(&self) -> Vec<MessageEntry> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)] // Pairs with len()
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
