use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

/// SMTP transport settings, used when `EMAIL_PROVIDER=smtp`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    /// Empty username means an unauthenticated relay
    pub username: String,
    pub password: String,
    pub use_tls: bool,
    pub use_starttls: bool,
    pub connection_timeout_secs: u64,
}

fn env_bool(key: &str, default: bool) -> bool {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<bool>().ok())
        .unwrap_or_else(|| {
            debug!("{} not set or invalid, defaulting to {}", key, default);
            default
        })
}

impl SmtpConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading SMTP configuration from environment variables");

        let host = env::var("SMTP_HOST").map_err(|_| {
            error!("SMTP_HOST environment variable not found");
            ConfigError::EnvVarNotFound("SMTP_HOST".to_string())
        })?;
        debug!("SMTP host: {}", host);

        let port = env::var("SMTP_PORT")
            .unwrap_or_else(|_| {
                warn!("SMTP_PORT not set, defaulting to 587");
                "587".to_string()
            })
            .parse::<u16>()
            .map_err(|_| {
                error!("Invalid SMTP_PORT value");
                ConfigError::InvalidValue("Invalid SMTP_PORT value".to_string())
            })?;

        let username = env::var("SMTP_USERNAME").unwrap_or_default();
        let password = env::var("SMTP_PASSWORD").unwrap_or_default();
        debug!("SMTP username: {}, password: [REDACTED]", username);

        let connection_timeout_secs = env::var("SMTP_CONNECTION_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        let config = SmtpConfig {
            host,
            port,
            username,
            password,
            use_tls: env_bool("SMTP_USE_TLS", true),
            use_starttls: env_bool("SMTP_USE_STARTTLS", true),
            connection_timeout_secs,
        };

        config.validate()?;
        info!("SMTP configuration loaded successfully");
        Ok(config)
    }

    /// Local catcher such as mailpit on 1025
    pub fn from_test_env() -> Self {
        SmtpConfig {
            host: "localhost".to_string(),
            port: 1025,
            username: String::new(),
            password: String::new(),
            use_tls: false,
            use_starttls: false,
            connection_timeout_secs: 10,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::ValidationError("SMTP host cannot be empty".to_string()));
        }
        if self.port == 0 {
            return Err(ConfigError::ValidationError("SMTP port cannot be 0".to_string()));
        }
        if self.username.is_empty() != self.password.is_empty() {
            return Err(ConfigError::ValidationError(
                "SMTP username and password must be set together".to_string(),
            ));
        }
        if self.connection_timeout_secs == 0 {
            return Err(ConfigError::ValidationError("Connection timeout cannot be 0".to_string()));
        }
        Ok(())
    }

    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}
