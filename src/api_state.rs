//! Shared message API state
//!
//! Used by both WASM and native API clients.

use crate::core::Message;

/// Message API connection state
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiState {
    /// No base URL configured; messages live in memory
    Offline,
    Loading,
    Ready,
    Error(String),
}

impl ApiState {
    pub fn is_ready(&self) -> bool {
        matches!(self, ApiState::Ready)
    }
}

/// Completed request, handed back to the UI loop
#[derive(Debug)]
pub enum ApiEvent {
    /// Result of the initial list fetch
    Loaded(Vec<Message>),
    /// Server-completed record of a posted draft
    Posted(Message),
}
