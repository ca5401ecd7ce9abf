use dotenv::dotenv;
use tracing::{error, info, warn};

use maplemop_backend::app::app::App;
use maplemop_backend::util::logger::Logger;


#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env before the logger so RUST_LOG and LOG_DIR from it apply
    let dotenv_result = dotenv();

    let logger = Logger::new()?;
    let _guards = logger.guards;

    info!("🚀 Starting Maple Mop mail relay");

    match dotenv_result {
        Ok(_) => info!("✅ Successfully loaded .env file"),
        Err(e) => warn!("⚠️ Failed to load .env file: {} (using system env vars)", e),
    }

    let app = match App::new() {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to configure mail relay: {}", e);
            return Err(e);
        }
    };
    app.start().await
}
