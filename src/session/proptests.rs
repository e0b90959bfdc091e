//! Property-based tests for the session state machine
//!
//! These tests verify key invariants hold across arbitrary event sequences.

use super::attachment::{validate, Attachment, FileCandidate};
use super::draft::DraftInput;
use super::state::*;
use super::transcript::NewEntry;
use super::*;
use crate::transport::{ChatReply, TransportFailure};
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_attachment() -> impl Strategy<Value = Attachment> {
    ("[a-z]{1,8}", prop_oneof![Just("image/png"), Just("image/jpeg"), Just("image/gif")], 0usize..64)
        .prop_map(|(name, mime, size)| {
            validate(FileCandidate::new(format!("{name}.img"), mime, vec![0u8; size]))
                .expect("generated attachment is a small image")
        })
}

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), Just("  ".to_string()), "[a-zA-Z ]{1,20}"]
}

fn arb_reply() -> impl Strategy<Value = ChatReply> {
    ("[a-zA-Z ]{1,30}", proptest::option::of("[0-9x]{3,9}")).prop_map(|(response, image_info)| {
        ChatReply {
            response,
            image_info,
            filename: None,
        }
    })
}

fn arb_failure() -> impl Strategy<Value = TransportFailure> {
    prop_oneof![
        (400u16..600, "[a-z ]{0,20}")
            .prop_map(|(status, detail)| TransportFailure::HttpError { status, detail }),
        Just(TransportFailure::Unreachable {
            endpoint: "http://localhost:8000".to_string()
        }),
        Just(TransportFailure::UnsupportedImageFormat {
            detail: "cannot identify image file".to_string()
        }),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        arb_text().prop_map(|text| Event::EditText { text }),
        arb_attachment().prop_map(|attachment| Event::AttachmentSelected { attachment }),
        Just(Event::AttachmentCleared),
        Just(Event::Submit),
        Just(Event::Submit),
        arb_reply().prop_map(|reply| Event::Resolved { outcome: Ok(reply) }),
        arb_failure().prop_map(|failure| Event::Resolved {
            outcome: Err(failure)
        }),
        Just(Event::Settled),
    ]
}

// ============================================================================
// Model
// ============================================================================

/// Drives `transition` the way the runtime does, keeping a model transcript
struct Harness {
    state: SessionState,
    transcript: Vec<NewEntry>,
    outstanding: usize,
}

impl Harness {
    fn new() -> Self {
        Self {
            state: SessionState::new(),
            transcript: Vec::new(),
            outstanding: 0,
        }
    }

    fn apply(&mut self, event: Event) -> Result<Vec<Effect>, TransitionError> {
        let result = transition(&self.state, event)?;
        self.state = result.new_state;
        for effect in &result.effects {
            match effect {
                Effect::Dispatch { .. } => self.outstanding += 1,
                Effect::Append { entry } => self.transcript.push(entry.clone()),
                Effect::Settle => {}
            }
        }
        if matches!(self.state.phase, Phase::Resolving) && self.outstanding > 0 {
            self.outstanding -= 1;
        }
        Ok(result.effects)
    }
}

fn dispatch_count(effects: &[Effect]) -> usize {
    effects
        .iter()
        .filter(|e| matches!(e, Effect::Dispatch { .. }))
        .count()
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // At most one request is ever outstanding, and busy mirrors it
    #[test]
    fn prop_at_most_one_outstanding(events in proptest::collection::vec(arb_event(), 0..40)) {
        let mut harness = Harness::new();
        for event in events {
            let _ = harness.apply(event);
            prop_assert!(harness.outstanding <= 1);
            if harness.outstanding == 1 {
                prop_assert!(harness.state.busy());
            }
        }
    }

    // Submit while busy changes nothing and dispatches nothing
    #[test]
    fn prop_busy_submit_is_inert(
        setup in proptest::collection::vec(arb_event(), 0..20),
        text in "[a-z]{1,10}",
    ) {
        let mut harness = Harness::new();
        for event in setup {
            let _ = harness.apply(event);
        }
        let _ = harness.apply(Event::EditText { text });
        let _ = harness.apply(Event::Submit);
        prop_assume!(harness.state.busy());

        let before_state = harness.state.clone();
        let before_len = harness.transcript.len();
        let result = harness.apply(Event::Submit);

        prop_assert_eq!(result, Err(TransitionError::Busy));
        prop_assert_eq!(&harness.state, &before_state);
        prop_assert_eq!(harness.transcript.len(), before_len);
    }

    // An empty draft never dispatches and never touches the transcript
    #[test]
    fn prop_empty_draft_never_dispatches(blank in prop_oneof![Just(""), Just(" "), Just("\t\n")]) {
        let mut harness = Harness::new();
        let _ = harness.apply(Event::EditText { text: blank.to_string() });
        let result = harness.apply(Event::Submit);

        prop_assert_eq!(result, Err(TransitionError::EmptyDraft));
        prop_assert!(!harness.state.busy());
        prop_assert!(harness.transcript.is_empty());
    }

    // Transcript only grows; earlier entries never change
    #[test]
    fn prop_transcript_append_only(events in proptest::collection::vec(arb_event(), 0..40)) {
        let mut harness = Harness::new();
        let mut previous: Vec<NewEntry> = Vec::new();
        for event in events {
            if let Ok(effects) = harness.apply(event) {
                prop_assert!(dispatch_count(&effects) <= 1);
            }
            prop_assert!(harness.transcript.len() >= previous.len());
            prop_assert_eq!(&harness.transcript[..previous.len()], &previous[..]);
            previous = harness.transcript.clone();
        }
    }

    // A failed submission leaves the draft exactly as it was
    #[test]
    fn prop_failure_preserves_draft(
        text in "[a-zA-Z]{1,12}",
        attachment in proptest::option::of(arb_attachment()),
        failure in arb_failure(),
    ) {
        let mut harness = Harness::new();
        let _ = harness.apply(Event::EditText { text: text.clone() });
        if let Some(a) = attachment.clone() {
            let _ = harness.apply(Event::AttachmentSelected { attachment: a });
        }
        prop_assert!(harness.apply(Event::Submit).is_ok());
        let resolved = harness.apply(Event::Resolved { outcome: Err(failure) });
        prop_assert!(resolved.is_ok());
        prop_assert!(harness.apply(Event::Settled).is_ok());

        prop_assert_eq!(harness.state.draft.clone(), DraftInput::new(text, attachment));
        prop_assert!(!harness.state.busy());
        prop_assert_eq!(harness.transcript.len(), 1);
    }
}
