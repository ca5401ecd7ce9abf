use std::env;
use tracing::{debug, warn};

use crate::config::ConfigError;

pub const DEFAULT_QUOTE_ENDPOINT: &str = "http://127.0.0.1:8080/send-contact-email";

/// Where the quote form posts its payload.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint_url: String,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let endpoint_url = env::var("QUOTE_ENDPOINT_URL").unwrap_or_else(|_| {
            warn!("QUOTE_ENDPOINT_URL not set, using {}", DEFAULT_QUOTE_ENDPOINT);
            DEFAULT_QUOTE_ENDPOINT.to_string()
        });
        debug!("Quote endpoint: {}", endpoint_url);
        let config = ClientConfig { endpoint_url };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.endpoint_url.starts_with("http://") || self.endpoint_url.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "Quote endpoint must be an http(s) URL: {}",
                self.endpoint_url
            )));
        }
        Ok(())
    }
}
