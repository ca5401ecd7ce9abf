use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

pub const DEFAULT_FROM_EMAIL: &str = "NEGOT Cleaning <onboarding@resend.dev>";
pub const DEFAULT_TO_EMAIL: &str = "burin7oils@gmail.com";
pub const DEFAULT_RESEND_API_URL: &str = "https://api.resend.com";

/// Which backend relays quote emails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    Resend,
    Smtp,
}

impl FromStr for EmailProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "resend" => Ok(EmailProvider::Resend),
            "smtp" => Ok(EmailProvider::Smtp),
            other => Err(ConfigError::InvalidValue(format!("Unknown EMAIL_PROVIDER: {}", other))),
        }
    }
}

impl fmt::Display for EmailProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmailProvider::Resend => write!(f, "resend"),
            EmailProvider::Smtp => write!(f, "smtp"),
        }
    }
}

/// Mail relay configuration: who the quote emails come from, where they go,
/// and how to reach the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Backend used to deliver the email
    pub provider: EmailProvider,
    /// Sender identity, either `addr` or `Name <addr>`
    pub from_email: String,
    /// Business inbox receiving quote requests
    pub to_email: String,
    /// Resend API credential; the relay refuses requests without it
    pub resend_api_key: Option<String>,
    /// Resend API base URL
    pub resend_api_url: String,
    /// HTTP timeout towards the provider in seconds
    pub request_timeout_secs: u64,
}

impl EmailConfig {
    /// Create EmailConfig from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading email configuration from environment variables");

        let provider = match env::var("EMAIL_PROVIDER") {
            Ok(v) => v.parse::<EmailProvider>()?,
            Err(_) => {
                debug!("EMAIL_PROVIDER not set, defaulting to resend");
                EmailProvider::Resend
            }
        };
        debug!("Email provider: {}", provider);

        let resend_api_key = env::var("RESEND_API_KEY").ok().filter(|k| !k.trim().is_empty());
        match &resend_api_key {
            Some(_) => debug!("Resend API key: [REDACTED]"),
            None if provider == EmailProvider::Resend => error!("Missing RESEND_API_KEY secret"),
            None => debug!("RESEND_API_KEY not set"),
        }

        let resend_api_url = env::var("RESEND_API_URL").unwrap_or_else(|_| DEFAULT_RESEND_API_URL.to_string());
        debug!("Resend API url: {}", resend_api_url);

        let from_email = env::var("FROM_EMAIL").unwrap_or_else(|_| {
            warn!("FROM_EMAIL not set, using default sender");
            DEFAULT_FROM_EMAIL.to_string()
        });
        debug!("From email: {}", from_email);

        let to_email = env::var("TO_EMAIL").unwrap_or_else(|_| {
            warn!("TO_EMAIL not set, using default inbox");
            DEFAULT_TO_EMAIL.to_string()
        });
        debug!("To email: {}", to_email);

        let request_timeout_secs = env::var("RESEND_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .map_err(|_| {
                error!("Invalid RESEND_TIMEOUT_SECS value");
                ConfigError::ParseError("Invalid RESEND_TIMEOUT_SECS value".to_string())
            })?;

        let config = EmailConfig {
            provider,
            from_email,
            to_email,
            resend_api_key,
            resend_api_url,
            request_timeout_secs,
        };

        config.validate()?;
        info!("Email configuration loaded successfully");
        Ok(config)
    }

    /// Create EmailConfig for testing
    pub fn from_test_env() -> Self {
        EmailConfig {
            provider: EmailProvider::Resend,
            from_email: "Test Cleaning <test@example.com>".to_string(),
            to_email: "inbox@example.com".to_string(),
            resend_api_key: Some("re_test_key".to_string()),
            resend_api_url: "http://127.0.0.1:9".to_string(),
            request_timeout_secs: 5,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.from_email.trim().is_empty() {
            error!("From email is empty");
            return Err(ConfigError::ValidationError("From email cannot be empty".to_string()));
        }

        if !self.from_email.contains('@') {
            error!("Invalid from email format");
            return Err(ConfigError::ValidationError("Invalid from email format".to_string()));
        }

        if !self.to_email.contains('@') {
            error!("Invalid to email format");
            return Err(ConfigError::ValidationError("Invalid to email format".to_string()));
        }

        if self.provider == EmailProvider::Resend && self.resend_api_url.trim().is_empty() {
            error!("Resend API url is empty");
            return Err(ConfigError::ValidationError("Resend API url cannot be empty".to_string()));
        }

        if self.request_timeout_secs == 0 {
            error!("Request timeout is 0");
            return Err(ConfigError::ValidationError("Request timeout cannot be 0".to_string()));
        }

        Ok(())
    }

    /// `{base}/emails`
    pub fn resend_emails_url(&self) -> String {
        format!("{}/emails", self.resend_api_url.trim_end_matches('/'))
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        EmailConfig {
            provider: EmailProvider::Resend,
            from_email: DEFAULT_FROM_EMAIL.to_string(),
            to_email: DEFAULT_TO_EMAIL.to_string(),
            resend_api_key: None,
            resend_api_url: DEFAULT_RESEND_API_URL.to_string(),
            request_timeout_secs: 30,
        }
    }
}
