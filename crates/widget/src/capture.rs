//! Email capture sub-protocol state.
//!
//! `Idle -> Armed -> Idle`. While armed, the next raw user message is
//! forwarded verbatim to the email dispatcher instead of being treated as a
//! chat turn. Two distinct paths arm the protocol; both land in the same
//! state and exactly one subsequent submit clears it.

/// How capture mode was armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmReason {
    /// The user's own message matched the intent lexicon.
    UserIntent,
    /// The assistant embedded the reserved trigger token in its reply.
    AssistantDirective,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    Armed(ArmReason),
}

impl CaptureState {
    pub fn is_armed(&self) -> bool {
        matches!(self, CaptureState::Armed(_))
    }

    /// Arm capture mode. Arming while already armed keeps the original
    /// reason.
    pub fn arm(&mut self, reason: ArmReason) {
        if let CaptureState::Idle = self {
            *self = CaptureState::Armed(reason);
        }
    }

    pub fn disarm(&mut self) {
        *self = CaptureState::Idle;
    }
}

/// Phrases that locally signal the user wants to send an email. Matched
/// case-insensitively as substrings.
pub const EMAIL_INTENT_PHRASES: &[&str] = &[
    "send email",
    "send mail",
    "email fed",
    "contact fed",
    "message fed",
    "reach out",
    "send a message",
];

pub fn detect_email_intent(text: &str) -> bool {
    let lower = text.to_lowercase();
    EMAIL_INTENT_PHRASES.iter().any(|p| lower.contains(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arming_is_idempotent_and_keeps_first_reason() {
        let mut state = CaptureState::default();
        assert!(!state.is_armed());

        state.arm(ArmReason::UserIntent);
        assert_eq!(state, CaptureState::Armed(ArmReason::UserIntent));

        state.arm(ArmReason::AssistantDirective);
        assert_eq!(state, CaptureState::Armed(ArmReason::UserIntent));

        state.disarm();
        assert_eq!(state, CaptureState::Idle);
    }

    #[test]
    fn intent_lexicon_matches_substrings_case_insensitively() {
        assert!(detect_email_intent("I want to Send Email to the team"));
        assert!(detect_email_intent("how do I CONTACT FED?"));
        assert!(detect_email_intent("can I reach out about sponsorship"));
        assert!(!detect_email_intent("tell me about upcoming events"));
        assert!(!detect_email_intent("what is your mailing address"));
    }
}
