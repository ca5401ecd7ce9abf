#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use maplemop_backend::client::notifier::Notifier;
use maplemop_backend::client::transport::{QuoteTransport, TransportError};
use maplemop_backend::config::EmailConfig;
use maplemop_backend::dto::quote_dto::{RawInput, RelayAck};
use maplemop_backend::model::quote::QuoteRequest;
use maplemop_backend::service::relay_service::RelayServiceImpl;
use maplemop_backend::util::email::{EmailError, EmailMessage, EmailSender, SendReceipt};

/// How the fake provider answers.
#[derive(Clone)]
pub enum ProviderAnswer {
    Accept(Option<String>),
    Reject(serde_json::Value),
    Unreachable(String),
}

/// Email backend that records what it is asked to send.
pub struct FakeSender {
    pub sent: Mutex<Vec<EmailMessage>>,
    answer: ProviderAnswer,
}

impl FakeSender {
    pub fn new(answer: ProviderAnswer) -> Arc<Self> {
        Arc::new(Self { sent: Mutex::new(Vec::new()), answer })
    }

    pub fn accepting() -> Arc<Self> {
        Self::new(ProviderAnswer::Accept(Some("email_123".to_string())))
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for FakeSender {
    async fn send(&self, message: EmailMessage) -> Result<SendReceipt, EmailError> {
        self.sent.lock().unwrap().push(message);
        match &self.answer {
            ProviderAnswer::Accept(id) => Ok(SendReceipt { id: id.clone() }),
            ProviderAnswer::Reject(payload) => Err(EmailError::Provider { payload: payload.clone() }),
            ProviderAnswer::Unreachable(msg) => Err(EmailError::Transport(msg.clone())),
        }
    }
}

pub fn relay_service(sender: Arc<FakeSender>) -> Arc<RelayServiceImpl> {
    Arc::new(RelayServiceImpl::new(sender, &EmailConfig::from_test_env()))
}

/// Transport that records quotes and, when gated, waits to be released
/// before answering.
pub struct FakeTransport {
    pub posted: Mutex<Vec<QuoteRequest>>,
    answer: Mutex<Result<RelayAck, (u16, String)>>,
    gate: Option<Arc<Notify>>,
}

impl FakeTransport {
    pub fn accepting() -> Arc<Self> {
        Arc::new(Self {
            posted: Mutex::new(Vec::new()),
            answer: Mutex::new(Ok(RelayAck { ok: true, id: Some("email_123".to_string()) })),
            gate: None,
        })
    }

    pub fn rejecting(status: u16, message: &str) -> Arc<Self> {
        Arc::new(Self {
            posted: Mutex::new(Vec::new()),
            answer: Mutex::new(Err((status, message.to_string()))),
            gate: None,
        })
    }

    pub fn gated(gate: Arc<Notify>) -> Arc<Self> {
        Arc::new(Self {
            posted: Mutex::new(Vec::new()),
            answer: Mutex::new(Ok(RelayAck { ok: true, id: Some("email_123".to_string()) })),
            gate: Some(gate),
        })
    }

    pub fn set_answer(&self, answer: Result<RelayAck, (u16, String)>) {
        *self.answer.lock().unwrap() = answer;
    }

    pub fn calls(&self) -> usize {
        self.posted.lock().unwrap().len()
    }
}

#[async_trait]
impl QuoteTransport for FakeTransport {
    async fn post_quote(&self, quote: &QuoteRequest) -> Result<RelayAck, TransportError> {
        self.posted.lock().unwrap().push(quote.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let answer = self.answer.lock().unwrap().clone();
        answer.map_err(|(status, message)| TransportError::Rejected { status, message })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toast {
    Success(String),
    Error(String),
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub toasts: Mutex<Vec<Toast>>,
}

impl RecordingNotifier {
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.toasts.lock().unwrap().push(Toast::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.toasts.lock().unwrap().push(Toast::Error(message.to_string()));
    }
}

pub fn raw(pairs: &[(&str, &str)]) -> RawInput {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

/// A complete, valid submission as the form would collect it.
pub fn valid_input() -> RawInput {
    raw(&[
        ("name", "Jane Doe"),
        ("email", "jane@example.com"),
        ("phone", "4165551234"),
        ("address", "1 Main St"),
        ("serviceType", "Office Cleaning"),
        ("frequency", "Weekly"),
    ])
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_env_filter("debug").with_test_writer().try_init();
}
