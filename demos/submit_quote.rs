use std::sync::Arc;

use dotenv::dotenv;
use maplemop_backend::client::form_controller::{FormController, SubmitError, SubmitOutcome};
use maplemop_backend::client::notifier::TracingNotifier;
use maplemop_backend::client::transport::HttpQuoteTransport;
use maplemop_backend::config::ClientConfig;
use maplemop_backend::dto::quote_dto::RawInput;
use tracing::{error, info, warn};


/// Fill the quote form from `field=value` arguments and submit it, e.g.
/// `cargo run --example submit_quote -- name="Jane Doe" email=jane@example.com ...`
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    match dotenv() {
        Ok(_) => info!("✅ Successfully loaded .env file"),
        Err(e) => warn!("⚠️ Failed to load .env file: {} (using system env vars)", e),
    }

    let config = ClientConfig::from_env()?;
    let transport = Arc::new(HttpQuoteTransport::new(&config));
    let controller = FormController::new(transport, Arc::new(TracingNotifier));

    let raw: RawInput = std::env::args()
        .skip(1)
        .filter_map(|arg| arg.split_once('=').map(|(k, v)| (k.to_string(), v.to_string())))
        .collect();

    match controller.submit(raw).await {
        Ok(SubmitOutcome::Sent { id }) => info!("Quote request sent (id: {:?})", id),
        Ok(SubmitOutcome::Suppressed) => warn!("A submission was already in flight"),
        Err(SubmitError::Validation(errors)) => {
            for e in &errors.0 {
                error!("{}: {}", e.field, e.message);
            }
            return Err(SubmitError::Validation(errors).into());
        }
        Err(e) => {
            error!("Failed to submit quote request: {}", e);
            return Err(e.into());
        }
    }
    Ok(())
}
