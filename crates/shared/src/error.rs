//! Error taxonomy for widget collaborator calls.

use thiserror::Error;

/// Failures reaching the backend collaborators.
///
/// The session controller treats every variant the same way (fixed fallback
/// message, flags reset); the split exists so logs and tests can tell a dead
/// network from a backend rejection.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// Network-level failure: connection refused, DNS, timeout.
    #[error("transport error: {0}")]
    Transport(String),

    /// Backend answered with a non-2xx status.
    #[error("backend error: {status} {body}")]
    Backend { status: u16, body: String },

    /// A required platform capability is missing (e.g. speech recognition).
    #[error("capability unavailable: {0}")]
    Unavailable(String),
}
