use crate::config::EmailConfig;
use crate::util::email::{EmailError, EmailMessage, EmailSender, SendReceipt};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, instrument};

#[derive(Debug, Serialize)]
struct ResendEmailRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ResendEmailResponse {
    id: Option<String>,
}

/// Sends email through the Resend HTTP API.
pub struct ResendEmailService {
    client: reqwest::Client,
    api_key: Option<String>,
    emails_url: String,
}

impl ResendEmailService {
    #[instrument(skip(config), fields(url = %config.resend_api_url))]
    pub fn new(config: &EmailConfig) -> Result<Self, EmailError> {
        info!("Initializing Resend email service");
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| EmailError::ConfigError(format!("HTTP client error: {}", e)))?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: reqwest::Client, config: &EmailConfig) -> Self {
        Self {
            client,
            api_key: config.resend_api_key.clone(),
            emails_url: config.resend_emails_url(),
        }
    }
}

#[async_trait]
impl EmailSender for ResendEmailService {
    fn ensure_ready(&self) -> Result<(), EmailError> {
        match &self.api_key {
            Some(_) => Ok(()),
            None => Err(EmailError::ConfigError("Missing RESEND_API_KEY".to_string())),
        }
    }

    #[instrument(skip(self, message), fields(to = ?message.to, subject = %message.subject))]
    async fn send(&self, message: EmailMessage) -> Result<SendReceipt, EmailError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| EmailError::ConfigError("Missing RESEND_API_KEY".to_string()))?;

        let body = ResendEmailRequest {
            from: &message.from,
            to: &message.to,
            subject: &message.subject,
            html: message.html_body.as_deref(),
            text: message.text_body.as_deref(),
            reply_to: message.reply_to.as_deref(),
        };

        debug!("Posting email to {}", self.emails_url);
        let response = self
            .client
            .post(&self.emails_url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Resend request failed: {}", e);
                EmailError::Transport(format!("Resend request failed: {}", e))
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| EmailError::Transport(format!("Failed to read Resend response: {}", e)))?;

        if !status.is_success() {
            error!("Resend returned {}: {}", status, text);
            let payload = serde_json::from_str::<serde_json::Value>(&text)
                .unwrap_or_else(|_| serde_json::Value::String(format!("Resend returned {}: {}", status, text)));
            return Err(EmailError::Provider { payload });
        }

        let parsed: ResendEmailResponse = serde_json::from_str(&text)
            .map_err(|e| EmailError::Transport(format!("Unexpected Resend response: {}", e)))?;
        info!(id = ?parsed.id, "Email accepted by Resend");
        Ok(SendReceipt { id: parsed.id })
    }
}
