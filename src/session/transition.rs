//! Pure state transition function

use super::draft::DraftInput;
use super::request::build_request;
use super::state::{Phase, SessionState};
use super::transcript::NewEntry;
use super::{Effect, Event};
use crate::transport::{ChatReply, TransportFailure};
use thiserror::Error;

/// User entry text for an image sent without a caption
pub const IMAGE_PLACEHOLDER: &str = "Uploaded an image";

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: SessionState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: SessionState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }
}

/// Reasons an event was not applied. The runtime treats all of them as
/// ignored input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("A submission is already in flight")]
    Busy,
    #[error("Nothing to send: draft has no text and no attachment")]
    EmptyDraft,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function
///
/// Given the same inputs it always produces the same outputs, with no I/O and
/// no clock reads.
pub fn transition(state: &SessionState, event: Event) -> Result<TransitionResult, TransitionError> {
    match (&state.phase, event) {
        // ============================================================
        // Draft edits (any phase)
        // ============================================================
        (_, Event::EditText { text }) => {
            let mut next = state.clone();
            next.draft.text = text;
            Ok(TransitionResult::new(next))
        }

        (_, Event::AttachmentSelected { attachment }) => {
            let mut next = state.clone();
            next.draft.attachment = Some(attachment);
            Ok(TransitionResult::new(next))
        }

        (_, Event::AttachmentCleared) => {
            let mut next = state.clone();
            next.draft.attachment = None;
            Ok(TransitionResult::new(next))
        }

        // ============================================================
        // Submission
        // ============================================================

        // Idle + Submit -> Submitting
        (Phase::Idle, Event::Submit) => {
            if !state.draft.is_submittable() {
                return Err(TransitionError::EmptyDraft);
            }
            let request = build_request(&state.draft);
            let next = SessionState {
                phase: Phase::Submitting {
                    draft: state.draft.clone(),
                },
                draft: state.draft.clone(),
            };
            Ok(TransitionResult::new(next).with_effect(Effect::Dispatch { request }))
        }

        // Busy + Submit -> Reject
        (Phase::Submitting { .. } | Phase::Resolving, Event::Submit) => Err(TransitionError::Busy),

        // ============================================================
        // Resolution
        // ============================================================

        // Submitting + success -> Resolving, draft cleared
        (Phase::Submitting { draft: sent }, Event::Resolved { outcome: Ok(reply) }) => {
            let next = SessionState {
                phase: Phase::Resolving,
                draft: DraftInput::default(),
            };
            Ok(TransitionResult::new(next).with_effects(success_effects(sent, reply)))
        }

        // Submitting + failure -> Resolving, draft kept for resubmission
        (Phase::Submitting { .. }, Event::Resolved { outcome: Err(failure) }) => {
            let next = SessionState {
                phase: Phase::Resolving,
                draft: state.draft.clone(),
            };
            Ok(TransitionResult::new(next).with_effects(failure_effects(&failure)))
        }

        // Resolving + Settled -> Idle
        (Phase::Resolving, Event::Settled) => Ok(TransitionResult::new(SessionState {
            phase: Phase::Idle,
            draft: state.draft.clone(),
        })),

        (phase, event) => Err(TransitionError::InvalidTransition(format!(
            "{} in phase {}",
            event.name(),
            phase.as_str()
        ))),
    }
}

/// Text shown for the user's side of a successful exchange
fn user_echo(sent: &DraftInput) -> String {
    if sent.attachment.is_some() && !sent.has_text() {
        IMAGE_PLACEHOLDER.to_string()
    } else {
        sent.text.clone()
    }
}

fn success_effects(sent: &DraftInput, reply: ChatReply) -> [Effect; 3] {
    [
        Effect::append(NewEntry::user(user_echo(sent), sent.attachment.clone())),
        Effect::append(NewEntry::assistant(reply.response, reply.image_info)),
        Effect::Settle,
    ]
}

fn failure_effects(failure: &TransportFailure) -> [Effect; 2] {
    [
        Effect::append(NewEntry::assistant(failure.display_text(), None)),
        Effect::Settle,
    ]
}
