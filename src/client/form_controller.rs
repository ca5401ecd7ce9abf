use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, instrument, warn};

use crate::client::notifier::Notifier;
use crate::client::transport::{QuoteTransport, TransportError};
use crate::dto::quote_dto::{FieldErrors, QuoteForm, RawInput, FORM_FIELDS};
use crate::model::quote::Frequency;

pub const SUCCESS_MESSAGE: &str = "Thanks! Your quote request has been sent. We'll get back to you shortly.";
pub const FAILURE_MESSAGE: &str = "Sorry, we couldn't send your request. Please try again or call us.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The relay acknowledged the request.
    Sent { id: Option<String> },
    /// Another submission was already in flight; nothing was done.
    Suppressed,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Blank form: every field empty, frequency at its default.
pub fn default_fields() -> RawInput {
    FORM_FIELDS
        .iter()
        .map(|f| {
            let value = if *f == "frequency" { Frequency::default().label().to_string() } else { String::new() };
            (f.to_string(), value)
        })
        .collect()
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Puts the controller back to idle however the submission ends.
struct InFlight<'a> {
    state: &'a Mutex<SubmissionState>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *lock(self.state) = SubmissionState::Idle;
    }
}

/// Validates quote form input and submits it to the mail relay.
///
/// One controller backs one rendered form. At most one submission is in
/// flight at a time; extra calls made meanwhile are no-ops.
pub struct FormController {
    transport: Arc<dyn QuoteTransport>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<SubmissionState>,
    fields: Mutex<RawInput>,
}

impl FormController {
    pub fn new(transport: Arc<dyn QuoteTransport>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            transport,
            notifier,
            state: Mutex::new(SubmissionState::Idle),
            fields: Mutex::new(default_fields()),
        }
    }

    pub fn state(&self) -> SubmissionState {
        *lock(&self.state)
    }

    /// True while a request is in flight; callers disable the submit button.
    pub fn is_submitting(&self) -> bool {
        self.state() == SubmissionState::Submitting
    }

    pub fn fields(&self) -> RawInput {
        lock(&self.fields).clone()
    }

    pub fn field(&self, name: &str) -> Option<String> {
        lock(&self.fields).get(name).cloned()
    }

    pub fn set_field(&self, name: &str, value: &str) {
        lock(&self.fields).insert(name.to_string(), value.to_string());
    }

    pub fn reset(&self) {
        *lock(&self.fields) = default_fields();
    }

    fn begin(&self) -> Option<InFlight<'_>> {
        let mut state = lock(&self.state);
        if *state == SubmissionState::Submitting {
            return None;
        }
        *state = SubmissionState::Submitting;
        Some(InFlight { state: &self.state })
    }

    /// Submit whatever is currently in the form fields.
    pub async fn submit_fields(&self) -> Result<SubmitOutcome, SubmitError> {
        let raw = self.fields();
        self.submit(raw).await
    }

    /// Validate `raw`, post it, and report the outcome.
    ///
    /// The fields take the submitted values first, so they stay populated
    /// when validation or delivery fails, and are cleared only on success.
    #[instrument(skip_all)]
    pub async fn submit(&self, raw: RawInput) -> Result<SubmitOutcome, SubmitError> {
        let Some(_in_flight) = self.begin() else {
            debug!("Submission already in flight, ignoring");
            return Ok(SubmitOutcome::Suppressed);
        };

        let snapshot = {
            let mut fields = lock(&self.fields);
            *fields = default_fields();
            fields.extend(raw);
            fields.clone()
        };

        let quote = QuoteForm::from_raw(&snapshot)
            .into_quote_request()
            .map_err(|errors| {
                debug!("Quote form invalid: {}", errors);
                SubmitError::Validation(errors)
            })?;

        match self.transport.post_quote(&quote).await {
            Ok(ack) if ack.ok => {
                info!(id = ?ack.id, "Quote request sent");
                self.reset();
                self.notifier.success(SUCCESS_MESSAGE);
                Ok(SubmitOutcome::Sent { id: ack.id })
            }
            Ok(_) => {
                warn!("Relay answered without acknowledging");
                self.notifier.error(FAILURE_MESSAGE);
                Err(SubmitError::Transport(TransportError::Rejected {
                    status: 200,
                    message: "Request was not acknowledged".to_string(),
                }))
            }
            Err(e) => {
                warn!("Quote request failed: {}", e);
                self.notifier.error(FAILURE_MESSAGE);
                Err(SubmitError::Transport(e))
            }
        }
    }
}
