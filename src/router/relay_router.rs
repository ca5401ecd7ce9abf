use axum::{Router, routing::{any, get}};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::handler::relay_handler::relay_handler;
use crate::service::relay_service::RelayServiceImpl;

pub const RELAY_PATH: &str = "/send-contact-email";

pub fn relay_router(service: Arc<RelayServiceImpl>) -> Router {
    // The handler owns the method gate so that every method gets CORS headers.
    Router::new()
        .route(RELAY_PATH, any(relay_handler))
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}
