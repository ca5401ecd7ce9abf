use maplemop_backend::config::EmailConfig;
use maplemop_backend::model::quote::{Frequency, QuoteRequest};
use maplemop_backend::service::relay_service::{RelayService, RelayServiceImpl};
use maplemop_backend::util::logger::Logger;
use tracing::{error, info, warn};
use dotenv::dotenv;


/// Send a sample quote email through the configured provider.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_result = dotenv();
    let logger = Logger::new()?;
    let _guards = logger.guards;

    info!("🚀 Sending a sample quote email");
    if let Err(e) = dotenv_result {
        warn!("⚠️ Failed to load .env file: {} (using system env vars)", e);
    }

    let email_config = EmailConfig::from_env()?;
    let service = RelayServiceImpl::from_config(&email_config)?;
    service.ensure_ready()?;

    let quote = QuoteRequest {
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        phone: "4165551234".to_string(),
        address: Some("1 Main St, Toronto".to_string()),
        service_type: Some("Office Cleaning".to_string()),
        frequency: Frequency::Weekly,
        preferred_date: Some("Tue 3pm".to_string()),
        message: Some("Sample request from the send_email demo.".to_string()),
    };

    match service.relay_quote(&quote).await {
        Ok(receipt) => info!("Email sent successfully (id: {:?})", receipt.id),
        Err(e) => {
            error!("Failed to send email: {}", e);
            return Err(e.into());
        }
    }
    Ok(())
}
