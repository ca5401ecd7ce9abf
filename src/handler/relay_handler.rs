use axum::{
    extract::{rejection::BytesRejection, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::dto::quote_dto::{IncomingQuote, RelayAck};
use crate::service::relay_service::{RelayService, RelayServiceImpl};
use crate::util::cors::cors_headers;
use crate::util::error::HandlerError;

/// Turn one quote submission into one outbound email.
///
/// Preflight requests short-circuit with CORS headers. Everything else walks
/// received -> validated -> rendered -> dispatched and ends acknowledged or
/// failed; nothing is retried and nothing outlives the request.
#[instrument(skip_all, fields(method = %method, request_id = %uuid::Uuid::new_v4()))]
pub async fn relay_handler(
    State(service): State<Arc<RelayServiceImpl>>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, HandlerError> {
    if method == Method::OPTIONS {
        debug!("Answering preflight request");
        return Ok((StatusCode::OK, cors_headers()).into_response());
    }

    service.ensure_ready().map_err(HandlerError::from)?;

    if method != Method::POST {
        warn!("Rejecting {} request", method);
        return Err(HandlerError::method_not_allowed());
    }

    // Unreadable or oversized bodies still get the JSON error and CORS headers.
    let body = body.map_err(|e| {
        warn!("Could not read request body: {}", e);
        HandlerError::unexpected(e.body_text())
    })?;

    info!("Received quote request ({} bytes)", body.len());
    let incoming: IncomingQuote = serde_json::from_slice(&body)
        .map_err(|e| HandlerError::unexpected(format!("Invalid JSON body: {}", e)))?;

    let quote = incoming.into_quote_request().map_err(|missing| {
        warn!("Quote request missing required fields: {:?}", missing);
        HandlerError::missing_fields()
    })?;
    debug!("Quote request validated");

    let receipt = service.relay_quote(&quote).await?;

    info!("Quote request acknowledged");
    let ack = RelayAck { ok: true, id: receipt.id };
    Ok((StatusCode::OK, cors_headers(), Json(ack)).into_response())
}
