use crate::model::quote::{is_offered_service, non_blank, Frequency, QuoteRequest};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use tracing::warn;

use validator::{Validate, ValidationError, ValidationErrors};

/// Raw form input keyed by wire field name (`name`, `serviceType`, ...).
pub type RawInput = HashMap<String, String>;

/// Form fields in the order they are laid out and reported.
pub const FORM_FIELDS: [&str; 8] = [
    "name",
    "email",
    "phone",
    "address",
    "serviceType",
    "frequency",
    "preferredDate",
    "message",
];

// --- Client-side form DTO ---

#[derive(Debug, Clone, Default, Validate)]
pub struct QuoteForm {
    #[validate(length(min = 2, message = "Please enter your name"))]
    pub name: String,

    #[validate(email(message = "Enter a valid email"))]
    pub email: String,

    #[validate(length(min = 7, message = "Enter a valid phone"))]
    pub phone: String,

    #[validate(length(min = 5, message = "Enter your address"))]
    pub address: String,

    #[validate(custom(function = "validate_service_type"))]
    pub service_type: String,

    #[validate(custom(function = "validate_frequency"))]
    pub frequency: String,

    pub preferred_date: Option<String>,

    pub message: Option<String>,
}

fn validate_service_type(value: &str) -> Result<(), ValidationError> {
    if is_offered_service(value) {
        return Ok(());
    }
    let mut err = ValidationError::new("service_type");
    err.message = Some(Cow::from("Select a service"));
    Err(err)
}

fn validate_frequency(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || value.parse::<Frequency>().is_ok() {
        return Ok(());
    }
    let mut err = ValidationError::new("frequency");
    err.message = Some(Cow::from("Select a valid frequency"));
    Err(err)
}

impl QuoteForm {
    pub fn from_raw(raw: &RawInput) -> Self {
        let text = |key: &str| raw.get(key).map(|v| v.trim().to_string()).unwrap_or_default();
        QuoteForm {
            name: text("name"),
            email: text("email"),
            phone: text("phone"),
            address: text("address"),
            service_type: text("serviceType"),
            frequency: text("frequency"),
            preferred_date: non_blank(raw.get("preferredDate").map(String::as_str)),
            message: non_blank(raw.get("message").map(String::as_str)),
        }
    }

    /// Validate and build the request that goes over the wire.
    pub fn into_quote_request(self) -> Result<QuoteRequest, FieldErrors> {
        self.validate().map_err(FieldErrors::from)?;
        let (frequency, _) = Frequency::resolve(Some(&self.frequency));
        let service_type = crate::model::quote::SERVICE_TYPES
            .iter()
            .find(|s| s.eq_ignore_ascii_case(&self.service_type))
            .map(|s| s.to_string())
            .unwrap_or(self.service_type);
        Ok(QuoteRequest {
            name: self.name,
            email: self.email,
            phone: self.phone,
            address: Some(self.address),
            service_type: Some(service_type),
            frequency,
            preferred_date: self.preferred_date,
            message: self.message,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Per-field validation failures, in form order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FieldErrors(pub Vec<FieldError>);

impl FieldErrors {
    pub fn fields(&self) -> Vec<&str> {
        self.0.iter().map(|e| e.field.as_str()).collect()
    }

    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|e| format!("{}: {}", e.field, e.message)).collect();
        write!(f, "{}", parts.join("; "))
    }
}

fn wire_name(field: &str) -> &str {
    match field {
        "service_type" => "serviceType",
        "preferred_date" => "preferredDate",
        other => other,
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = Vec::new();
        for (field, errs) in errors.field_errors() {
            let field: &str = field.as_ref();
            let name = wire_name(field).to_string();
            let message = errs
                .first()
                .and_then(|e| e.message.as_ref())
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid {}", name));
            out.push(FieldError { field: name, message });
        }
        out.sort_by_key(|e| FORM_FIELDS.iter().position(|f| *f == e.field).unwrap_or(usize::MAX));
        FieldErrors(out)
    }
}

// --- Relay payloads ---

/// What the relay accepts off the wire. Everything is optional so that
/// missing fields can be reported instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingQuote {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub service_type: Option<String>,
    pub frequency: Option<String>,
    pub preferred_date: Option<String>,
    pub message: Option<String>,
}

impl IncomingQuote {
    /// Check the relay's mandatory subset (name, email, phone) and build the
    /// request. On failure returns the names of the missing fields.
    pub fn into_quote_request(self) -> Result<QuoteRequest, Vec<&'static str>> {
        let name = non_blank(self.name.as_deref());
        let email = non_blank(self.email.as_deref());
        let phone = non_blank(self.phone.as_deref());

        let (name, email, phone) = match (name, email, phone) {
            (Some(n), Some(e), Some(p)) => (n, e, p),
            (n, e, p) => {
                let mut missing = Vec::new();
                if n.is_none() { missing.push("name"); }
                if e.is_none() { missing.push("email"); }
                if p.is_none() { missing.push("phone"); }
                return Err(missing);
            }
        };

        let (frequency, recognised) = Frequency::resolve(self.frequency.as_deref());
        if !recognised {
            warn!(
                "Unrecognised frequency {:?}, falling back to {}",
                self.frequency.as_deref().unwrap_or_default(),
                frequency
            );
        }

        Ok(QuoteRequest {
            name,
            email,
            phone,
            address: non_blank(self.address.as_deref()),
            service_type: non_blank(self.service_type.as_deref()),
            frequency,
            preferred_date: non_blank(self.preferred_date.as_deref()),
            message: non_blank(self.message.as_deref()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayAck {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayErrorBody {
    pub error: serde_json::Value,
}
