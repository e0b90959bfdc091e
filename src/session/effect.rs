//! Effects produced by state transitions

use super::request::OutboundRequest;
use super::transcript::NewEntry;

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the request (spawns as background task)
    Dispatch { request: OutboundRequest },

    /// Stamp and append an entry to the transcript
    Append { entry: NewEntry },

    /// All appends for the current resolution are queued
    Settle,
}

impl Effect {
    pub fn append(entry: NewEntry) -> Self {
        Effect::Append { entry }
    }
}
