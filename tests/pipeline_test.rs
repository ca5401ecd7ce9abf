//! Form controller -> HTTP -> relay, over a real socket.

mod common;

use std::net::SocketAddr;
use std::sync::Arc;

use common::{relay_service, valid_input, FakeSender, ProviderAnswer, RecordingNotifier, Toast};
use maplemop_backend::client::form_controller::{FormController, SubmitError, SubmitOutcome};
use maplemop_backend::client::transport::{HttpQuoteTransport, QuoteTransport, TransportError};
use maplemop_backend::config::ClientConfig;
use maplemop_backend::model::quote::{Frequency, QuoteRequest};
use maplemop_backend::router::relay_router::{relay_router, RELAY_PATH};

async fn spawn_relay(sender: Arc<FakeSender>) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = relay_router(relay_service(sender));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn transport_for(addr: SocketAddr) -> Arc<HttpQuoteTransport> {
    let config = ClientConfig { endpoint_url: format!("http://{}{}", addr, RELAY_PATH) };
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    Arc::new(HttpQuoteTransport::with_client(client, &config))
}

#[tokio::test]
async fn test_submit_reaches_business_inbox() {
    let sender = FakeSender::accepting();
    let addr = spawn_relay(sender.clone()).await;
    let notifier = Arc::new(RecordingNotifier::default());
    let controller = FormController::new(transport_for(addr), notifier.clone());

    let outcome = controller.submit(valid_input()).await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Sent { id: Some("email_123".to_string()) });

    let sent = sender.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].reply_to.as_deref(), Some("jane@example.com"));
    assert!(sent[0].subject.contains("Jane Doe"));
    assert!(matches!(notifier.toasts().as_slice(), [Toast::Success(_)]));
}

#[tokio::test]
async fn test_provider_failure_surfaces_as_error_toast() {
    let sender = FakeSender::new(ProviderAnswer::Reject(serde_json::json!({
        "statusCode": 403,
        "name": "validation_error",
        "message": "You can only send testing emails to your own email address"
    })));
    let addr = spawn_relay(sender.clone()).await;
    let notifier = Arc::new(RecordingNotifier::default());
    let controller = FormController::new(transport_for(addr), notifier.clone());

    let result = controller.submit(valid_input()).await;
    match result {
        Err(SubmitError::Transport(TransportError::Rejected { status, message })) => {
            assert_eq!(status, 500);
            assert!(message.contains("testing emails"));
        }
        other => panic!("expected rejection, got {:?}", other),
    }
    assert!(matches!(notifier.toasts().as_slice(), [Toast::Error(_)]));
    assert_eq!(controller.field("phone").as_deref(), Some("4165551234"));
}

#[tokio::test]
async fn test_relay_rejects_bypassed_client() {
    let sender = FakeSender::accepting();
    let addr = spawn_relay(sender.clone()).await;
    let transport = transport_for(addr);

    let quote = QuoteRequest {
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        phone: " ".to_string(),
        address: None,
        service_type: None,
        frequency: Frequency::OneTime,
        preferred_date: None,
        message: None,
    };
    match transport.post_quote(&quote).await {
        Err(TransportError::Rejected { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Missing required fields");
        }
        other => panic!("expected rejection, got {:?}", other),
    }
    assert!(sender.sent().is_empty());
}

#[tokio::test]
async fn test_unreachable_relay_is_network_error() {
    // bind then drop to get a port nobody listens on
    let addr = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let notifier = Arc::new(RecordingNotifier::default());
    let controller = FormController::new(transport_for(addr), notifier.clone());

    let result = controller.submit(valid_input()).await;
    assert!(matches!(result, Err(SubmitError::Transport(TransportError::Network(_)))));
    assert!(matches!(notifier.toasts().as_slice(), [Toast::Error(_)]));
}
