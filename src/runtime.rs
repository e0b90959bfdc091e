//! Runtime for driving a chat session
//!
//! The controller runs as a tokio task. The presentation layer talks to it
//! through a [`SessionHandle`]: intents go in over a channel, and a read-only
//! [`SessionView`] comes back on a watch channel after every change.

mod controller;


pub use controller::SessionController;

use crate::session::{
    validate, AttachmentSummary, Event, FileCandidate, ImageHandleFactory, MessageEntry,
    RejectionReason,
};
use crate::transport::TransportClient;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};

/// Snapshot of everything the presentation layer renders
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionView {
    pub transcript: Vec<MessageEntry>,
    pub draft_text: String,
    pub attachment: Option<AttachmentSummary>,
    pub busy: bool,
    /// "Thinking..." or "Analyzing image..." while a request is out
    pub pending_label: Option<&'static str>,
}

/// An event from the handle plus a reply slot saying whether it was applied
#[derive(Debug)]
pub struct Intent {
    pub event: Event,
    pub applied: oneshot::Sender<bool>,
}

/// Errors surfaced to the presentation layer
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Rejected(#[from] RejectionReason),
    #[error("Session is closed")]
    Closed,
}

/// Handle to interact with a running session
#[derive(Clone)]
pub struct SessionHandle {
    intent_tx: mpsc::Sender<Intent>,
    view_rx: watch::Receiver<SessionView>,
}

impl SessionHandle {
    /// Replace the draft text. Allowed while busy.
    pub async fn edit_text(&self, text: impl Into<String>) -> Result<(), SessionError> {
        self.send(Event::EditText { text: text.into() }).await.map(|_| ())
    }

    /// Validate a picked file and stage it. On rejection the draft is left alone.
    pub async fn select_attachment(&self, file: FileCandidate) -> Result<AttachmentSummary, SessionError> {
        let attachment = validate(file)?;
        let summary = attachment.summary();
        self.send(Event::AttachmentSelected { attachment }).await?;
        Ok(summary)
    }

    pub async fn clear_attachment(&self) -> Result<(), SessionError> {
        self.send(Event::AttachmentCleared).await.map(|_| ())
    }

    /// Submit the current draft.
    ///
    /// Returns `false` when the submission was ignored because the draft is
    /// empty or another request is still outstanding.
    pub async fn submit(&self) -> Result<bool, SessionError> {
        self.send(Event::Submit).await
    }

    /// Latest published view
    pub fn view(&self) -> SessionView {
        self.view_rx.borrow().clone()
    }

    #[allow(dead_code)] // For observers that render on every change
    pub fn subscribe(&self) -> watch::Receiver<SessionView> {
        self.view_rx.clone()
    }

    /// Wait until the view satisfies `predicate`, checking the current view first
    pub async fn wait_for(
        &self,
        predicate: impl FnMut(&SessionView) -> bool,
    ) -> Result<SessionView, SessionError> {
        let mut rx = self.view_rx.clone();
        let view = rx.wait_for(predicate).await.map_err(|_| SessionError::Closed)?;
        Ok(view.clone())
    }

    async fn send(&self, event: Event) -> Result<bool, SessionError> {
        let (applied, applied_rx) = oneshot::channel();
        self.intent_tx
            .send(Intent { event, applied })
            .await
            .map_err(|_| SessionError::Closed)?;
        applied_rx.await.map_err(|_| SessionError::Closed)
    }
}

/// Start a session controller on the current tokio runtime.
///
/// The controller stops once every handle has been dropped.
pub fn spawn_session<T>(transport: T, image_handles: Arc<dyn ImageHandleFactory>) -> SessionHandle
where
    T: TransportClient + 'static,
{
    let (intent_tx, intent_rx) = mpsc::channel(32);
    let (view_tx, view_rx) = watch::channel(SessionView::default());
    let controller = SessionController::new(transport, image_handles, intent_rx, view_tx);
    tokio::spawn(controller.run());
    SessionHandle { intent_tx, view_rx }
}
