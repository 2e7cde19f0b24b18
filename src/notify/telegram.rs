use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::config::TelegramConfig;
use crate::errors::{NotifyError, NotifyResult};
use crate::notify::{Destination, Notifier};

/// Body of a `sendMessage` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendMessagePayload<'a> {
    pub chat_id: &'a str,
    pub text: &'a str,
    pub parse_mode: &'static str,
}

impl<'a> SendMessagePayload<'a> {
    pub fn markdown(chat_id: &'a str, text: &'a str) -> Self {
        Self {
            chat_id,
            text,
            parse_mode: "markdown",
        }
    }
}

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    #[serde(default)]
    ok: bool,
}

/// Bot-style messaging client
pub struct TelegramNotifier {
    client: Client,
    api_base: String,
    bot_id: String,
    recipient_id: String,
    log_id: String,
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig) -> NotifyResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            bot_id: config.bot_id.clone(),
            recipient_id: config.recipient_id.clone(),
            log_id: config.log_id.clone(),
        })
    }

    pub fn chat_id(&self, destination: Destination) -> &str {
        match destination {
            Destination::Primary => &self.recipient_id,
            Destination::Log => &self.log_id,
        }
    }

    pub fn send_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.bot_id)
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, destination: Destination, text: &str) -> NotifyResult<()> {
        let payload = SendMessagePayload::markdown(self.chat_id(destination), text);
        let body = serde_json::to_vec(&payload)?;

        let response = self
            .client
            .post(self.send_url())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("sendMessage to {} answered {}: {}", destination, status, body);

        let accepted = serde_json::from_str::<SendMessageResponse>(&body)
            .map(|r| r.ok)
            .unwrap_or(false);
        if !status.is_success() || !accepted {
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}
