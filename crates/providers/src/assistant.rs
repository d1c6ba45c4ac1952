//! HTTP client for the remote assistant backend.

use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use shared::chat_api::{AssistantRequest, AssistantResponse, ChatMessage};
use shared::error::WidgetError;
use shared::settings::WidgetSettings;

/// Remote assistant collaborator.
///
/// Object-safe so the session controller can be driven by mocks in tests.
#[async_trait::async_trait]
pub trait AssistantClient: Send + Sync {
    /// Send one user turn plus the trailing context window.
    ///
    /// `Err` means transport failure (network error or non-2xx without a
    /// structured body); the controller maps it to its fixed fallback
    /// message. Auth-required responses come back as `Ok` with
    /// `requires_auth` set — that is a first-class branch, not an error.
    async fn send_message(
        &self,
        message: &str,
        history: &[ChatMessage],
    ) -> Result<AssistantResponse>;
}

#[derive(Debug, Deserialize)]
struct HealthStatus {
    status: String,
}

pub struct HttpAssistantClient {
    http: Client,
    base_url: String,
}

impl HttpAssistantClient {
    pub fn new(settings: &WidgetSettings) -> Result<Self> {
        Ok(Self {
            http: Client::builder()
                .timeout(Duration::from_secs(settings.request_timeout_secs))
                .build()?,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Probe GET /api/chatbot/health. Used by hosts at startup; a failed
    /// probe is informational, the widget still works turn by turn.
    pub async fn check_health(&self) -> Result<bool> {
        let url = format!("{}/api/chatbot/health", self.base_url);
        let resp = self.http.get(&url).send().await?;
        if !resp.status().is_success() {
            return Ok(false);
        }
        let body: HealthStatus = resp.json().await?;
        Ok(body.status == "ok" || body.status == "healthy")
    }
}

#[async_trait::async_trait]
impl AssistantClient for HttpAssistantClient {
    async fn send_message(
        &self,
        message: &str,
        history: &[ChatMessage],
    ) -> Result<AssistantResponse> {
        let url = format!("{}/api/chatbot/message", self.base_url);
        let req = AssistantRequest {
            message: message.to_string(),
            conversation_history: history.to_vec(),
        };

        let resp = self
            .http
            .post(&url)
            .json(&req)
            .send()
            .await
            .map_err(|e| WidgetError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            // The backend signals auth-required through an error status with
            // a structured body. Surface that as a normal response; anything
            // else is a transport-level failure.
            let body = resp.text().await.unwrap_or_default();
            if let Ok(parsed) = serde_json::from_str::<AssistantResponse>(&body) {
                if parsed.requires_auth {
                    return Ok(parsed);
                }
            }
            let body = if body.len() > 800 {
                format!("{}...", &body[..800])
            } else {
                body
            };
            tracing::warn!(status = %status, "assistant backend error");
            return Err(WidgetError::Backend {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let body: AssistantResponse = resp
            .json()
            .await
            .map_err(|e| WidgetError::Transport(e.to_string()))?;
        Ok(body)
    }
}
