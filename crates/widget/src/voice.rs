//! Voice input adapter.
//!
//! Wraps a platform speech-recognition capability as a single-session
//! `Idle <-> Listening` adapter. The platform backend lives behind
//! [`SpeechBackend`] and reports through an event channel; the rest of the
//! widget never sees the platform's own types. A recognized transcript
//! replaces the composer content, it does not append.

use std::sync::mpsc::{channel, Receiver, Sender};

/// Events a speech backend delivers during one utterance session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    /// Final transcript of the utterance.
    Transcript(String),
    /// Recognition failed; the session is over.
    Error(String),
    /// The session ended (end of speech or cancelled).
    Ended,
}

/// Platform speech-recognition capability.
pub trait SpeechBackend: Send {
    /// Whether the platform offers speech recognition at all.
    fn is_available(&self) -> bool;

    /// Begin a single, non-continuous utterance session. Events arrive on
    /// `events` until `Ended` or `Error`.
    fn start_utterance(&mut self, events: Sender<SpeechEvent>) -> anyhow::Result<()>;

    /// Abort the session in progress, if any.
    fn cancel(&mut self);
}

/// Backend for platforms without speech support. `start` on it produces the
/// one-time capability notice instead of a session.
pub struct UnsupportedBackend;

impl SpeechBackend for UnsupportedBackend {
    fn is_available(&self) -> bool {
        false
    }

    fn start_utterance(&mut self, _events: Sender<SpeechEvent>) -> anyhow::Result<()> {
        Err(shared::error::WidgetError::Unavailable("speech recognition".into()).into())
    }

    fn cancel(&mut self) {}
}

/// User-visible notice produced by the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceNotice {
    /// No speech capability on this platform; shown once per attempt.
    Unsupported,
}

pub struct VoiceAdapter {
    backend: Box<dyn SpeechBackend>,
    listening: bool,
    events: Option<Receiver<SpeechEvent>>,
}

impl VoiceAdapter {
    pub fn new(backend: Box<dyn SpeechBackend>) -> Self {
        Self {
            backend,
            listening: false,
            events: None,
        }
    }

    pub fn unsupported() -> Self {
        Self::new(Box::new(UnsupportedBackend))
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Single toggle control: start when idle, stop when listening.
    pub fn toggle(&mut self) -> Option<VoiceNotice> {
        if self.listening {
            self.stop();
            None
        } else {
            self.start()
        }
    }

    /// Start a listening session. No-op while already listening; returns a
    /// capability notice when the platform has no recognizer.
    pub fn start(&mut self) -> Option<VoiceNotice> {
        if self.listening {
            return None;
        }
        if !self.backend.is_available() {
            tracing::warn!("voice input requested but no speech backend available");
            return Some(VoiceNotice::Unsupported);
        }
        let (tx, rx) = channel();
        match self.backend.start_utterance(tx) {
            Ok(()) => {
                self.events = Some(rx);
                self.listening = true;
                None
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to start speech session");
                None
            }
        }
    }

    pub fn stop(&mut self) {
        if self.listening {
            self.backend.cancel();
        }
        self.listening = false;
        self.events = None;
    }

    /// Drain pending backend events. Returns the transcript that should
    /// replace the composer content, if one arrived. Errors end the session
    /// with a diagnostic log only, never a user-facing error.
    pub fn poll_transcript(&mut self) -> Option<String> {
        let rx = self.events.take()?;
        let mut transcript = None;
        let mut ended = false;
        while let Ok(event) = rx.try_recv() {
            match event {
                SpeechEvent::Transcript(text) => transcript = Some(text),
                SpeechEvent::Error(reason) => {
                    tracing::error!(%reason, "speech recognition error");
                    ended = true;
                }
                SpeechEvent::Ended => ended = true,
            }
        }
        if ended {
            self.listening = false;
        } else {
            self.events = Some(rx);
        }
        transcript
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scripted backend: plays back a fixed event sequence on start.
    struct ScriptedBackend {
        script: Vec<SpeechEvent>,
        cancelled: bool,
    }

    impl ScriptedBackend {
        fn new(script: Vec<SpeechEvent>) -> Self {
            Self {
                script,
                cancelled: false,
            }
        }
    }

    impl SpeechBackend for ScriptedBackend {
        fn is_available(&self) -> bool {
            true
        }

        fn start_utterance(&mut self, events: Sender<SpeechEvent>) -> anyhow::Result<()> {
            for event in self.script.drain(..) {
                let _ = events.send(event);
            }
            Ok(())
        }

        fn cancel(&mut self) {
            self.cancelled = true;
        }
    }

    #[test]
    fn unsupported_platform_yields_notice_not_session() {
        let mut adapter = VoiceAdapter::unsupported();
        assert_eq!(adapter.toggle(), Some(VoiceNotice::Unsupported));
        assert!(!adapter.is_listening());
    }

    #[test]
    fn transcript_ends_session_and_is_delivered_once() {
        let backend = ScriptedBackend::new(vec![
            SpeechEvent::Transcript("show me the events page".into()),
            SpeechEvent::Ended,
        ]);
        let mut adapter = VoiceAdapter::new(Box::new(backend));
        assert_eq!(adapter.toggle(), None);
        assert!(adapter.is_listening());

        assert_eq!(
            adapter.poll_transcript(),
            Some("show me the events page".into())
        );
        assert!(!adapter.is_listening());
        assert_eq!(adapter.poll_transcript(), None);
    }

    #[test]
    fn recognition_error_returns_to_idle_silently() {
        let backend = ScriptedBackend::new(vec![SpeechEvent::Error("no-speech".into())]);
        let mut adapter = VoiceAdapter::new(Box::new(backend));
        adapter.start();
        assert_eq!(adapter.poll_transcript(), None);
        assert!(!adapter.is_listening());
    }

    #[test]
    fn toggle_while_listening_stops() {
        let backend = ScriptedBackend::new(vec![]);
        let mut adapter = VoiceAdapter::new(Box::new(backend));
        adapter.toggle();
        assert!(adapter.is_listening());
        adapter.toggle();
        assert!(!adapter.is_listening());
    }
}
