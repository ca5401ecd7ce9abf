use axum::Router;
use std::sync::Arc;
use tracing::info;

use crate::config::{AppConfig, EmailConfig};
use crate::router::relay_router::relay_router;
use crate::service::relay_service::RelayServiceImpl;


pub struct App {
    config: AppConfig,
    router: Router,
    pub relay_service: Arc<RelayServiceImpl>,
}

impl App {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let config = AppConfig::from_env();
        let email_config = EmailConfig::from_env()?;
        let relay_service = Arc::new(RelayServiceImpl::from_config(&email_config)?);
        Ok(Self::with_service(config, relay_service))
    }

    pub fn with_service(config: AppConfig, relay_service: Arc<RelayServiceImpl>) -> Self {
        let router = relay_router(relay_service.clone());
        App { config, router, relay_service }
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub async fn start(self) -> Result<(), Box<dyn std::error::Error>> {
        let addr = self.config.socket_addr()?;
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("🚀 Mail relay listening at http://{}", addr);
        axum::serve(listener, self.router).await?;
        Ok(())
    }
}
