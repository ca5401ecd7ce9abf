use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, error, instrument};

use crate::config::{EmailConfig, EmailProvider, SmtpConfig};
use crate::model::quote::QuoteRequest;
use crate::util::email::{EmailError, EmailMessage, EmailSender, SendReceipt, SmtpEmailService};
use crate::util::resend::ResendEmailService;
use crate::util::template;

#[async_trait]
pub trait RelayService: Send + Sync {
	/// Fails when the configured backend cannot send at all.
	fn ensure_ready(&self) -> Result<(), EmailError>;
	/// Render the quote and hand it to the email backend. One attempt, no retry.
	async fn relay_quote(&self, quote: &QuoteRequest) -> Result<SendReceipt, EmailError>;
}

pub struct RelayServiceImpl {
	pub sender: Arc<dyn EmailSender>,
	pub from_email: String,
	pub to_email: String,
}

impl RelayServiceImpl {
	pub fn new(sender: Arc<dyn EmailSender>, config: &EmailConfig) -> Self {
		RelayServiceImpl {
			sender,
			from_email: config.from_email.clone(),
			to_email: config.to_email.clone(),
		}
	}

	/// Build the configured backend from the environment.
	pub fn from_config(config: &EmailConfig) -> Result<Self, EmailError> {
		let sender: Arc<dyn EmailSender> = match config.provider {
			EmailProvider::Resend => Arc::new(ResendEmailService::new(config)?),
			EmailProvider::Smtp => {
				let smtp_config = SmtpConfig::from_env()?;
				Arc::new(SmtpEmailService::new(smtp_config)?)
			}
		};
		info!("Relay configured with {} backend", config.provider);
		Ok(Self::new(sender, config))
	}

	/// The email sent to the business inbox for one quote request.
	pub fn compose_message(&self, quote: &QuoteRequest) -> EmailMessage {
		EmailMessage::new(self.from_email.clone(), self.to_email.clone(), template::subject(quote))
			.with_html_body(template::render_html(quote))
			.with_text_body(template::render_text(quote))
			.with_reply_to(quote.email.clone())
	}
}

#[async_trait]
impl RelayService for RelayServiceImpl {
	fn ensure_ready(&self) -> Result<(), EmailError> {
		self.sender.ensure_ready()
	}

	#[instrument(skip(self, quote), fields(reply_to = %quote.email))]
	async fn relay_quote(&self, quote: &QuoteRequest) -> Result<SendReceipt, EmailError> {
		let message = self.compose_message(quote);
		info!("Rendered quote email: {}", message.subject);

		match self.sender.send(message).await {
			Ok(receipt) => {
				info!(id = ?receipt.id, "Quote email dispatched");
				Ok(receipt)
			}
			Err(e) => {
				error!("Quote email dispatch failed: {}", e);
				Err(e)
			}
		}
	}
}
