//! Session state types

use super::draft::DraftInput;

/// Where the session is in the submission lifecycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Phase {
    /// Ready to accept a submission
    #[default]
    Idle,

    /// One request in flight
    Submitting {
        /// The draft as it was when the request was dispatched
        draft: DraftInput,
    },

    /// Outcome received, transcript appends being applied by the runtime
    Resolving,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Submitting { .. } => "submitting",
            Phase::Resolving => "resolving",
        }
    }
}

/// Everything the transition function reads and rewrites
///
/// The transcript is not part of this: transitions emit append effects and
/// the runtime owns the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub phase: Phase,
    pub draft: DraftInput,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True from dispatch until every append of the resolution has landed
    pub fn busy(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    /// Status line for the outstanding request, if any
    pub fn pending_label(&self) -> Option<&'static str> {
        match &self.phase {
            Phase::Idle | Phase::Resolving => None,
            Phase::Submitting { draft } if draft.attachment.is_some() => Some("Analyzing image..."),
            Phase::Submitting { .. } => Some("Thinking..."),
        }
    }
}
