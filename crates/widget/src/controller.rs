//! Session controller: single mutation authority over session state and the
//! message log.

use std::sync::Arc;
use std::time::Duration;

use providers::{AssistantClient, EmailDispatcher};
use shared::identity::Identity;
use shared::message::{Message, MessageLog};
use shared::settings::WidgetSettings;

use crate::capture::{self, ArmReason, CaptureState};
use crate::directives;
use crate::history;
use crate::sanitize::Sanitizer;
use crate::voice::{SpeechBackend, VoiceAdapter, VoiceNotice};

/// Navigation collaborator owned by the hosting application.
pub trait Navigator: Send + Sync {
    fn current_route(&self) -> String;
    fn navigate_to(&self, route: &str);
}

/// Starter prompts the presentation layer offers while only the greeting is
/// in the log. Submitting one goes through the normal `submit` path.
pub const SUGGESTED_PROMPTS: &[&str] = &[
    "What is FED?",
    "Who is the president?",
    "Tell me about FED events",
    "Show me FED blogs",
];

const EMAIL_INSTRUCTION: &str = "📧 Sure! Please type your message in the next chat. I will send it exactly as you write it to fedkiit@gmail.com.\n\n**Note:** Your message will be sent exactly as you type it - no changes will be made.";
const EMAIL_SENT: &str = "✅ Your message has been sent to FED! The team will get back to you soon. 📧";
const EMAIL_FAILED: &str = "❌ Sorry, there was an error sending your email. Please try again later.";
const CONNECTION_FALLBACK: &str = "Sorry, I'm having trouble connecting. Please try again later.";
const AUTH_PROMPT_FALLBACK: &str = "🔐 Please sign in to access this feature.";
const RESPONSE_ERROR: &str = "Sorry, I encountered an error. Please try again.";

fn greeting(assistant_name: &str, identity: &Identity) -> String {
    match identity.first_name() {
        Some(first) => format!(
            "Hi **{first}**! I'm **{assistant_name}**, your personal assistant for FED KIIT. 🚀 I'm here to help you with anything related to FED!"
        ),
        None => format!(
            "Hello! I'm **{assistant_name}**, your personal assistant for FED KIIT. 🚀 I'm here to help you with anything related to FED!"
        ),
    }
}

pub struct SessionController {
    settings: WidgetSettings,
    identity: Identity,
    assistant: Arc<dyn AssistantClient>,
    email: Arc<dyn EmailDispatcher>,
    navigator: Arc<dyn Navigator>,
    sanitizer: Sanitizer,
    voice: VoiceAdapter,

    log: MessageLog,
    capture: CaptureState,
    composer: String,
    is_open: bool,
    is_typing: bool,
    show_auth_prompt: bool,
}

impl SessionController {
    /// Create a session seeded with the greeting. State lives for the
    /// lifetime of the widget instance; nothing persists across mounts.
    pub fn new(
        settings: WidgetSettings,
        identity: Identity,
        assistant: Arc<dyn AssistantClient>,
        email: Arc<dyn EmailDispatcher>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let mut log = MessageLog::new();
        log.push_assistant(greeting(&settings.assistant_name, &identity));
        Self {
            settings,
            identity,
            assistant,
            email,
            navigator,
            sanitizer: Sanitizer::new(),
            voice: VoiceAdapter::unsupported(),
            log,
            capture: CaptureState::Idle,
            composer: String::new(),
            is_open: false,
            is_typing: false,
            show_auth_prompt: false,
        }
    }

    pub fn with_voice_backend(mut self, backend: Box<dyn SpeechBackend>) -> Self {
        self.voice = VoiceAdapter::new(backend);
        self
    }

    // Observable state

    pub fn messages(&self) -> &[Message] {
        self.log.entries()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_typing(&self) -> bool {
        self.is_typing
    }

    pub fn is_listening(&self) -> bool {
        self.voice.is_listening()
    }

    pub fn show_auth_prompt(&self) -> bool {
        self.show_auth_prompt
    }

    pub fn awaiting_email_body(&self) -> bool {
        self.capture.is_armed()
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn composer(&self) -> &str {
        &self.composer
    }

    pub fn set_composer(&mut self, text: impl Into<String>) {
        self.composer = text.into();
    }

    pub fn toggle_open(&mut self) {
        self.is_open = !self.is_open;
    }

    // Voice input

    pub fn toggle_voice(&mut self) -> Option<VoiceNotice> {
        self.voice.toggle()
    }

    /// Apply any finished voice transcript: it replaces the composer.
    pub fn poll_voice(&mut self) {
        if let Some(transcript) = self.voice.poll_transcript() {
            self.composer = transcript;
        }
    }

    /// Submit the current composer content.
    pub async fn submit_composer(&mut self) {
        let text = std::mem::take(&mut self.composer);
        self.submit(&text).await;
    }

    /// Handle one user turn.
    ///
    /// `is_typing` is a display flag, not a lock: a second `submit` while a
    /// previous assistant call is outstanding starts a second call, and
    /// turns interleave in arrival order. Hosts wanting exclusivity disable
    /// the input control while `is_typing` is true.
    pub async fn submit(&mut self, raw_text: &str) {
        if raw_text.trim().is_empty() {
            return;
        }

        // History is captured before the append: the new turn travels in
        // the `message` field, not in the window.
        let window = history::context_window(self.log.entries());

        self.log.push_user(raw_text);
        self.composer.clear();
        self.is_typing = true;
        self.show_auth_prompt = false;

        if self.capture.is_armed() {
            self.complete_email_capture(raw_text).await;
            self.is_typing = false;
            return;
        }

        if capture::detect_email_intent(raw_text) {
            self.capture.arm(ArmReason::UserIntent);
            self.log.push_assistant(EMAIL_INSTRUCTION);
            self.is_typing = false;
            return;
        }

        match self.assistant.send_message(raw_text, &window).await {
            Ok(resp) if resp.requires_auth => {
                self.show_auth_prompt = true;
                let text = resp
                    .message
                    .unwrap_or_else(|| AUTH_PROMPT_FALLBACK.to_string());
                self.log.push_auth_prompt(text);
            }
            Ok(resp) => {
                let raw = if resp.success {
                    resp.response.unwrap_or_default()
                } else {
                    RESPONSE_ERROR.to_string()
                };

                let (raw, triggered) = directives::strip_email_trigger(&raw);
                if triggered {
                    self.capture.arm(ArmReason::AssistantDirective);
                    tracing::info!("email trigger detected - next message will be sent as email");
                }

                let (raw, route) = directives::extract_navigation(&raw);
                if let Some(route) = route {
                    self.schedule_navigation(route);
                }

                self.log.push_assistant(self.sanitizer.clean(&raw));
            }
            Err(e) => {
                tracing::error!(error = %e, "assistant call failed");
                self.capture.disarm();
                self.log.push_assistant(CONNECTION_FALLBACK);
            }
        }

        self.is_typing = false;
    }

    /// Forward the just-submitted text verbatim to the email dispatcher.
    /// Capture mode exits before the call resolves; success and failure
    /// both land back in `Idle` after exactly one submit.
    async fn complete_email_capture(&mut self, content: &str) {
        self.capture.disarm();

        let sender_name = self
            .identity
            .first_name()
            .unwrap_or("Anonymous")
            .to_string();
        let sender_email = self.identity.email.clone();

        let sent = match self
            .email
            .send_email(content, Some(&sender_name), sender_email.as_deref())
            .await
        {
            Ok(resp) => resp.success,
            Err(e) => {
                tracing::error!(error = %e, "email dispatch failed");
                false
            }
        };

        self.log
            .push_assistant(if sent { EMAIL_SENT } else { EMAIL_FAILED });
    }

    /// Fire-and-forget navigation after a short delay so the message
    /// finishes rendering first. Repeating a directive for the page already
    /// shown is a no-op.
    fn schedule_navigation(&self, route: &str) {
        if self.navigator.current_route() == route {
            return;
        }
        let navigator = Arc::clone(&self.navigator);
        let delay = Duration::from_millis(self.settings.nav_delay_ms);
        let route = route.to_string();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tracing::debug!(%route, "navigating from assistant directive");
            navigator.navigate_to(&route);
        });
    }
}
