//! Session controller executor

use super::{Intent, SessionView};
use crate::session::transcript::NewEntry;
use crate::session::{
    transition, Effect, Event, ImageHandleFactory, MessageEntry, SessionState, TransitionError,
    TranscriptStore,
};
use crate::transport::TransportClient;
use chrono::Utc;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

/// Owns the session state and transcript; the only writer of either
pub struct SessionController<T>
where
    T: TransportClient + 'static,
{
    state: SessionState,
    transcript: TranscriptStore,
    transport: Arc<T>,
    image_handles: Arc<dyn ImageHandleFactory>,
    intent_rx: mpsc::Receiver<Intent>,
    /// Outcomes of dispatched requests come back through here
    outcome_tx: mpsc::Sender<Event>,
    outcome_rx: mpsc::Receiver<Event>,
    view_tx: watch::Sender<SessionView>,
}

impl<T> SessionController<T>
where
    T: TransportClient + 'static,
{
    pub fn new(
        transport: T,
        image_handles: Arc<dyn ImageHandleFactory>,
        intent_rx: mpsc::Receiver<Intent>,
        view_tx: watch::Sender<SessionView>,
    ) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::channel(1);
        Self {
            state: SessionState::new(),
            transcript: TranscriptStore::new(),
            transport: Arc::new(transport),
            image_handles,
            intent_rx,
            outcome_tx,
            outcome_rx,
            view_tx,
        }
    }

    pub async fn run(mut self) {
        tracing::info!(endpoint = %self.transport.endpoint(), "Starting session controller");

        loop {
            tokio::select! {
                intent = self.intent_rx.recv() => {
                    let Some(Intent { event, applied }) = intent else {
                        break;
                    };
                    let accepted = self.process_event(event);
                    // Caller may have stopped waiting; nothing to do then
                    let _ = applied.send(accepted);
                }
                Some(outcome) = self.outcome_rx.recv() => {
                    self.process_event(outcome);
                }
            }
        }

        if self.state.busy() {
            tracing::warn!("Session closed with a request in flight; its outcome will be discarded");
        }
        tracing::info!(entries = self.transcript.len(), "Session controller stopped");
    }

    /// Apply an event and everything it chains into, then publish the view.
    ///
    /// Returns whether the initial event was accepted.
    fn process_event(&mut self, event: Event) -> bool {
        let mut events = VecDeque::from([event]);
        let mut accepted = None;

        while let Some(current) = events.pop_front() {
            let name = current.name();
            let applied = match transition(&self.state, current) {
                Ok(result) => {
                    self.state = result.new_state;
                    for effect in result.effects {
                        if let Some(next) = self.execute_effect(effect) {
                            events.push_back(next);
                        }
                    }
                    true
                }
                Err(e @ (TransitionError::Busy | TransitionError::EmptyDraft)) => {
                    tracing::debug!(event = name, reason = %e, "Ignoring submission");
                    false
                }
                Err(e) => {
                    tracing::warn!(event = name, error = %e, "Dropping event");
                    false
                }
            };
            accepted.get_or_insert(applied);
        }

        let accepted = accepted.unwrap_or(false);
        if accepted {
            self.publish();
        }
        accepted
    }

    fn execute_effect(&mut self, effect: Effect) -> Option<Event> {
        match effect {
            Effect::Dispatch { request } => {
                tracing::info!(kind = request.kind(), path = request.path(), "Dispatching request");
                let transport = Arc::clone(&self.transport);
                let outcome_tx = self.outcome_tx.clone();
                tokio::spawn(async move {
                    let outcome = transport.send(&request).await;
                    // Controller gone means the session was closed mid-flight
                    let _ = outcome_tx.send(Event::Resolved { outcome }).await;
                });
                None
            }
            Effect::Append { entry } => {
                let entry = self.stamp(entry);
                tracing::debug!(role = entry.role.as_str(), index = self.transcript.len(), "Appending entry");
                self.transcript.append(entry);
                None
            }
            Effect::Settle => Some(Event::Settled),
        }
    }

    /// Assign timestamp and image handle. The attachment bytes are dropped here.
    fn stamp(&self, entry: NewEntry) -> MessageEntry {
        let NewEntry {
            role,
            content,
            image,
            metadata,
        } = entry;
        MessageEntry {
            role,
            content,
            image_ref: image.as_ref().map(|a| self.image_handles.create(a)),
            metadata,
            created_at: Utc::now(),
        }
    }

    fn publish(&self) {
        self.view_tx.send_replace(SessionView {
            transcript: self.transcript.snapshot(),
            draft_text: self.state.draft.text.clone(),
            attachment: self.state.draft.attachment.as_ref().map(|a| a.summary()),
            busy: self.state.busy(),
            pending_label: self.state.pending_label(),
        });
    }
}
