use async_trait::async_trait;
use tracing::{debug, error, instrument};

use crate::config::ClientConfig;
use crate::dto::quote_dto::{RelayAck, RelayErrorBody};
use crate::model::quote::QuoteRequest;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Relay answered {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Unreadable relay response: {0}")]
    Decode(String),
}

/// Delivers a validated quote to the mail relay.
#[async_trait]
pub trait QuoteTransport: Send + Sync {
    async fn post_quote(&self, quote: &QuoteRequest) -> Result<RelayAck, TransportError>;
}

/// POSTs the quote as JSON with `reqwest`. No client-side timeout is set.
pub struct HttpQuoteTransport {
    client: reqwest::Client,
    endpoint_url: String,
}

impl HttpQuoteTransport {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: &ClientConfig) -> Self {
        Self {
            client,
            endpoint_url: config.endpoint_url.clone(),
        }
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }
}

fn rejection_message(body: &str) -> String {
    match serde_json::from_str::<RelayErrorBody>(body) {
        Ok(RelayErrorBody { error: serde_json::Value::String(s) }) => s,
        Ok(RelayErrorBody { error }) => error.to_string(),
        Err(_) if body.trim().is_empty() => "empty response".to_string(),
        Err(_) => body.to_string(),
    }
}

#[async_trait]
impl QuoteTransport for HttpQuoteTransport {
    #[instrument(skip(self, quote), fields(url = %self.endpoint_url))]
    async fn post_quote(&self, quote: &QuoteRequest) -> Result<RelayAck, TransportError> {
        debug!("Posting quote request");
        let response = self
            .client
            .post(&self.endpoint_url)
            .json(quote)
            .send()
            .await
            .map_err(|e| {
                error!("Quote request could not be delivered: {}", e);
                TransportError::Network(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = rejection_message(&body);
            error!("Relay rejected quote request with {}: {}", status, message);
            return Err(TransportError::Rejected { status: status.as_u16(), message });
        }

        serde_json::from_str::<RelayAck>(&body).map_err(|e| TransportError::Decode(e.to_string()))
    }
}
