//! Email dispatch through the chatbot backend.
//!
//! Best-effort, single attempt: the controller reports success or failure
//! from one call and never retries.

use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use shared::chat_api::{EmailRequest, EmailResponse};
use shared::error::WidgetError;
use shared::settings::WidgetSettings;

/// Outbound email collaborator.
#[async_trait::async_trait]
pub trait EmailDispatcher: Send + Sync {
    /// Forward `content` exactly as the user typed it. Returns whether the
    /// backend accepted the dispatch; `Err` covers transport failure and is
    /// treated the same as `success: false` by the controller.
    async fn send_email(
        &self,
        content: &str,
        sender_name: Option<&str>,
        sender_email: Option<&str>,
    ) -> Result<EmailResponse>;
}

pub struct HttpEmailDispatcher {
    http: Client,
    base_url: String,
}

impl HttpEmailDispatcher {
    pub fn new(settings: &WidgetSettings) -> Result<Self> {
        Ok(Self {
            http: Client::builder()
                .timeout(Duration::from_secs(settings.request_timeout_secs))
                .build()?,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait::async_trait]
impl EmailDispatcher for HttpEmailDispatcher {
    async fn send_email(
        &self,
        content: &str,
        sender_name: Option<&str>,
        sender_email: Option<&str>,
    ) -> Result<EmailResponse> {
        let url = format!("{}/api/chatbot/send-email", self.base_url);
        let req = EmailRequest {
            content: content.to_string(),
            sender_name: sender_name.map(str::to_string),
            sender_email: sender_email.map(str::to_string),
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
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "email dispatch rejected");
            return Err(WidgetError::Backend {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let body: EmailResponse = resp
            .json()
            .await
            .map_err(|e| WidgetError::Transport(e.to_string()))?;
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatcher_builds_from_settings() {
        let settings = WidgetSettings::default();
        let d = HttpEmailDispatcher::new(&settings).unwrap();
        assert!(d.base_url.starts_with("http://"));
    }
}
