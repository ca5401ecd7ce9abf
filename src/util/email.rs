use crate::config::{ConfigError, SmtpConfig};
use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{header::ContentType, Mailbox, MultiPart, SinglePart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
};
use tracing::{error, info, instrument};

/// Email service errors
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("SMTP error: {0}")]
    SmtpError(String),

    #[error("Message building error: {0}")]
    MessageError(String),

    #[error("Address error: {0}")]
    AddressError(String),

    /// The provider answered and refused the message. `payload` is its
    /// error body, forwarded to the caller as-is.
    #[error("Provider error: {payload}")]
    Provider { payload: serde_json::Value },

    #[error("Transport error: {0}")]
    Transport(String),
}

impl From<ConfigError> for EmailError {
    fn from(err: ConfigError) -> Self {
        EmailError::ConfigError(err.to_string())
    }
}

/// An outbound email, independent of the backend that delivers it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub text_body: Option<String>,
    pub html_body: Option<String>,
    pub reply_to: Option<String>,
}

impl EmailMessage {
    pub fn new(from: String, to: String, subject: String) -> Self {
        Self {
            from,
            to: vec![to],
            subject,
            text_body: None,
            html_body: None,
            reply_to: None,
        }
    }

    pub fn with_text_body(mut self, body: String) -> Self {
        self.text_body = Some(body);
        self
    }

    pub fn with_html_body(mut self, body: String) -> Self {
        self.html_body = Some(body);
        self
    }

    pub fn with_reply_to(mut self, reply_to: String) -> Self {
        self.reply_to = Some(reply_to);
        self
    }
}

/// What a backend reports back after accepting a message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendReceipt {
    pub id: Option<String>,
}

/// The `send(message)` capability of an email provider.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: EmailMessage) -> Result<SendReceipt, EmailError>;

    /// Whether the backend has what it needs to send. Checked before any
    /// request is processed.
    fn ensure_ready(&self) -> Result<(), EmailError> {
        Ok(())
    }
}

/// Accepts `user@host` as well as `Display Name <user@host>`.
pub fn validate_email_address(email: &str) -> Result<(), EmailError> {
    let address = match (email.rfind('<'), email.rfind('>')) {
        (Some(start), Some(end)) if start < end => &email[start + 1..end],
        _ => email,
    }
    .trim();

    if address.is_empty() {
        return Err(EmailError::AddressError("Email address cannot be empty".to_string()));
    }

    let parts: Vec<&str> = address.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(EmailError::AddressError(format!("Invalid email format: {}", email)));
    }

    Ok(())
}

/// SMTP email service implementation
pub struct SmtpEmailService {
    pub config: SmtpConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailService {
    #[instrument(skip(config), fields(host = %config.host, port = config.port))]
    pub fn new(config: SmtpConfig) -> Result<Self, EmailError> {
        info!("Initializing SMTP email service");

        config.validate().map_err(EmailError::from)?;

        let mut transport_builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
            .port(config.port)
            .timeout(Some(std::time::Duration::from_secs(config.connection_timeout_secs)));

        if config.use_tls {
            let tls_parameters = TlsParameters::new(config.host.clone())
                .map_err(|e| EmailError::ConfigError(format!("TLS configuration error: {}", e)))?;

            if config.use_starttls {
                transport_builder = transport_builder.tls(Tls::Required(tls_parameters));
            } else {
                transport_builder = transport_builder.tls(Tls::Wrapper(tls_parameters));
            }
        } else {
            transport_builder = transport_builder.tls(Tls::None);
        }

        if config.has_credentials() {
            let credentials = Credentials::new(config.username.clone(), config.password.clone());
            transport_builder = transport_builder.credentials(credentials);
        }

        let transport = transport_builder.build();

        info!("SMTP email service initialized successfully");
        Ok(Self { config, transport })
    }

    /// Build a lettre Message from EmailMessage
    pub fn build_message(email_message: EmailMessage, message_id: &str) -> Result<Message, EmailError> {
        let parse = |raw: &str, role: &str| -> Result<Mailbox, EmailError> {
            raw.parse::<Mailbox>()
                .map_err(|e| EmailError::AddressError(format!("Invalid {} address {}: {}", role, raw, e)))
        };

        let mut builder = Message::builder()
            .from(parse(&email_message.from, "from")?)
            .subject(&email_message.subject)
            .message_id(Some(message_id.to_string()));

        if email_message.to.is_empty() {
            return Err(EmailError::AddressError("No recipient provided".to_string()));
        }
        for to in &email_message.to {
            builder = builder.to(parse(to, "to")?);
        }
        if let Some(reply_to) = &email_message.reply_to {
            builder = builder.reply_to(parse(reply_to, "reply-to")?);
        }

        let result = match (email_message.text_body, email_message.html_body) {
            (Some(text), Some(html)) => builder.multipart(
                MultiPart::alternative()
                    .singlepart(SinglePart::builder().header(ContentType::TEXT_PLAIN).body(text))
                    .singlepart(SinglePart::builder().header(ContentType::TEXT_HTML).body(html)),
            ),
            (Some(text), None) => builder.header(ContentType::TEXT_PLAIN).body(text),
            (None, Some(html)) => {
                builder.singlepart(SinglePart::builder().header(ContentType::TEXT_HTML).body(html))
            }
            (None, None) => {
                return Err(EmailError::MessageError("No message body provided".to_string()));
            }
        };

        result.map_err(|e| EmailError::MessageError(format!("Failed to build message: {}", e)))
    }
}

#[async_trait]
impl EmailSender for SmtpEmailService {
    #[instrument(skip(self, message), fields(to = ?message.to, subject = %message.subject))]
    async fn send(&self, message: EmailMessage) -> Result<SendReceipt, EmailError> {
        info!("Sending email over SMTP");

        for to in &message.to {
            validate_email_address(to)?;
        }

        let domain = self.config.host.as_str();
        let message_id = format!("<{}@{}>", uuid::Uuid::new_v4(), domain);
        let email_message = Self::build_message(message, &message_id)?;

        self.transport
            .send(email_message)
            .await
            .map_err(|e| {
                error!("Failed to send email: {}", e);
                EmailError::SmtpError(format!("Failed to send email: {}", e))
            })?;

        info!("Email sent successfully");
        Ok(SendReceipt { id: Some(message_id) })
    }
}
