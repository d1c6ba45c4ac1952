pub mod error;
pub mod message;

pub mod settings {
    use serde::{Deserialize, Serialize};

    fn default_nav_delay_ms() -> u64 {
        500
    }

    fn default_timeout_secs() -> u64 {
        45
    }

    /// Widget-level configuration.
    ///
    /// Everything here has a sensible default so the widget can run against a
    /// local backend with zero setup.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct WidgetSettings {
        /// Backend base URL, e.g. "https://api.fedkiit.com"
        pub api_base_url: String,
        /// Display name of the assistant, shown in the greeting
        pub assistant_name: String,
        /// Delay before a scheduled navigation fires, so the message
        /// finishes rendering before the view changes
        #[serde(default = "default_nav_delay_ms")]
        pub nav_delay_ms: u64,
        /// Per-request HTTP timeout
        #[serde(default = "default_timeout_secs")]
        pub request_timeout_secs: u64,
    }

    impl Default for WidgetSettings {
        fn default() -> Self {
            Self {
                api_base_url: "http://localhost:4000".into(),
                assistant_name: "AskFED".into(),
                nav_delay_ms: default_nav_delay_ms(),
                request_timeout_secs: default_timeout_secs(),
            }
        }
    }

    impl WidgetSettings {
        /// Load settings from the environment, falling back to defaults.
        pub fn from_env() -> Self {
            let defaults = Self::default();
            Self {
                api_base_url: std::env::var("CHATBOT_API_BASE")
                    .unwrap_or(defaults.api_base_url),
                assistant_name: std::env::var("CHATBOT_NAME")
                    .unwrap_or(defaults.assistant_name),
                nav_delay_ms: std::env::var("CHATBOT_NAV_DELAY_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.nav_delay_ms),
                request_timeout_secs: std::env::var("CHATBOT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.request_timeout_secs),
            }
        }
    }
}

pub mod identity {
    /// Read-only view of the hosting application's auth state.
    ///
    /// The widget never mutates identity; it only reads it to personalize
    /// the greeting, populate email sender fields, and decide whether a
    /// sign-in affordance is meaningful.
    #[derive(Debug, Clone, Default)]
    pub struct Identity {
        pub logged_in: bool,
        pub name: Option<String>,
        pub email: Option<String>,
    }

    impl Identity {
        pub fn anonymous() -> Self {
            Self::default()
        }

        /// First word of the display name, for the personalized greeting.
        pub fn first_name(&self) -> Option<&str> {
            if !self.logged_in {
                return None;
            }
            self.name
                .as_deref()
                .and_then(|n| n.split_whitespace().next())
        }
    }
}

pub mod chat_api {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    pub struct ChatMessage {
        pub role: String, // "user" | "model"
        pub content: String,
    }

    /// Body of POST /api/chatbot/message
    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AssistantRequest {
        pub message: String,
        pub conversation_history: Vec<ChatMessage>,
    }

    /// Response of POST /api/chatbot/message
    #[derive(Debug, Clone, Deserialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct AssistantResponse {
        pub success: bool,
        #[serde(default)]
        pub response: Option<String>,
        #[serde(default)]
        pub requires_auth: bool,
        #[serde(default)]
        pub message: Option<String>,
    }

    /// Body of POST /api/chatbot/send-email
    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct EmailRequest {
        pub content: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub sender_name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub sender_email: Option<String>,
    }

    /// Response of POST /api/chatbot/send-email
    #[derive(Debug, Clone, Deserialize, Default)]
    pub struct EmailResponse {
        pub success: bool,
        #[serde(default)]
        pub message: Option<String>,
    }
}

#[cfg(test)]
mod tests {
    use super::chat_api::*;
    use super::identity::Identity;

    #[test]
    fn first_name_splits_display_name() {
        let id = Identity {
            logged_in: true,
            name: Some("Asha Mohanty".into()),
            email: Some("asha@example.com".into()),
        };
        assert_eq!(id.first_name(), Some("Asha"));
    }

    #[test]
    fn first_name_requires_login() {
        let id = Identity {
            logged_in: false,
            name: Some("Asha Mohanty".into()),
            email: None,
        };
        assert_eq!(id.first_name(), None);
        assert_eq!(Identity::anonymous().first_name(), None);
    }

    #[test]
    fn assistant_request_uses_backend_field_names() {
        let req = AssistantRequest {
            message: "hi".into(),
            conversation_history: vec![ChatMessage {
                role: "user".into(),
                content: "hello".into(),
            }],
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("conversationHistory").is_some());
        assert!(json.get("conversation_history").is_none());
    }

    #[test]
    fn assistant_response_defaults_optional_fields() {
        let resp: AssistantResponse =
            serde_json::from_str(r#"{"success": true, "response": "hi"}"#).unwrap();
        assert!(resp.success);
        assert!(!resp.requires_auth);
        assert!(resp.message.is_none());
    }

    #[test]
    fn email_request_omits_absent_sender_fields() {
        let req = EmailRequest {
            content: "body".into(),
            sender_name: None,
            sender_email: None,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("senderName"));
        assert!(!json.contains("senderEmail"));
    }
}
