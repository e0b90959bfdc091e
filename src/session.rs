//! Conversation session core
//!
//! Attachment validation, draft handling, request construction, the
//! transcript, and the submission state machine. The state machine follows
//! the Elm Architecture: `transition` is pure and returns effects for the
//! runtime to execute.

pub mod attachment;
pub mod draft;
mod effect;
pub mod event;
pub mod request;
pub mod state;
pub mod transcript;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use attachment::{validate, Attachment, AttachmentSummary, FileCandidate, RejectionReason};
pub use effect::Effect;
pub use event::Event;
pub use request::OutboundRequest;
pub use state::SessionState;
pub use transcript::{ImageHandle, ImageHandleFactory, MessageEntry, Role, TranscriptStore};
pub use transition::{transition, TransitionError};
