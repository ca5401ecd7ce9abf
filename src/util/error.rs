use axum::{response::{IntoResponse, Response}, http::StatusCode, Json};
use serde::Serialize;
use serde_json::Value;

use crate::dto::quote_dto::RelayErrorBody;
use crate::util::cors::cors_headers;
use crate::util::email::EmailError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HandlerErrorKind {
    MethodNotAllowed,
    MissingFields,
    Provider,
    Unexpected,
}

impl std::fmt::Display for HandlerErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HandlerErrorKind::MethodNotAllowed => "MethodNotAllowed",
            HandlerErrorKind::MissingFields => "MissingFields",
            HandlerErrorKind::Provider => "Provider",
            HandlerErrorKind::Unexpected => "Unexpected",
        };
        write!(f, "{}", s)
    }
}

impl HandlerErrorKind {
    pub fn status(&self) -> StatusCode {
        match self {
            HandlerErrorKind::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            HandlerErrorKind::MissingFields => StatusCode::BAD_REQUEST,
            HandlerErrorKind::Provider | HandlerErrorKind::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Relay failure. Rendered as `{ "error": ... }` where the value is
/// `details` when present (provider payloads) and `message` otherwise.
#[derive(Debug, Serialize)]
pub struct HandlerError {
    pub error: HandlerErrorKind,
    pub message: String,
    pub details: Option<Value>,
}

impl HandlerError {
    pub fn method_not_allowed() -> Self {
        HandlerError {
            error: HandlerErrorKind::MethodNotAllowed,
            message: "Method not allowed".to_string(),
            details: None,
        }
    }

    pub fn missing_fields() -> Self {
        HandlerError {
            error: HandlerErrorKind::MissingFields,
            message: "Missing required fields".to_string(),
            details: None,
        }
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        HandlerError {
            error: HandlerErrorKind::Unexpected,
            message: message.into(),
            details: None,
        }
    }
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for HandlerError {}

impl From<EmailError> for HandlerError {
    fn from(err: EmailError) -> Self {
        match err {
            EmailError::Provider { payload } => HandlerError {
                error: HandlerErrorKind::Provider,
                message: "Email provider rejected the message".to_string(),
                details: Some(payload),
            },
            EmailError::ConfigError(message) => HandlerError::unexpected(message),
            other => HandlerError::unexpected(other.to_string()),
        }
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = self.error.status();
        let body = RelayErrorBody {
            error: self.details.unwrap_or(Value::String(self.message)),
        };
        (status, cors_headers(), Json(body)).into_response()
    }
}
