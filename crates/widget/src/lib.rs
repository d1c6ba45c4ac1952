//! Conversational assistant session controller.
//!
//! The controller owns the message log and session flags, talks to the
//! remote assistant, strips machine-readable directives out of its replies,
//! runs the email capture sub-protocol, sanitizes assistant markup before it
//! reaches the renderer, and drives an optional voice input session. The
//! satellite modules (`history`, `directives`, `sanitize`) are pure; only
//! [`controller::SessionController`] mutates session state.

pub mod capture;
pub mod controller;
pub mod directives;
pub mod history;
pub mod sanitize;
pub mod voice;

pub use controller::{Navigator, SessionController};
pub use voice::{SpeechBackend, SpeechEvent, VoiceAdapter};
