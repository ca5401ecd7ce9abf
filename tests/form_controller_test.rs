mod common;

use std::sync::Arc;
use tokio::sync::Notify;

use common::{init_tracing, raw, valid_input, FakeTransport, RecordingNotifier, Toast};
use maplemop_backend::client::form_controller::{
    FormController, SubmissionState, SubmitError, SubmitOutcome, FAILURE_MESSAGE, SUCCESS_MESSAGE,
};
use maplemop_backend::client::transport::TransportError;
use maplemop_backend::dto::quote_dto::RelayAck;
use maplemop_backend::model::quote::Frequency;

fn controller(transport: Arc<FakeTransport>) -> (FormController, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    (FormController::new(transport, notifier.clone()), notifier)
}

#[tokio::test]
async fn test_invalid_input_is_rejected_locally() {
    init_tracing();
    let transport = FakeTransport::accepting();
    let (controller, notifier) = controller(transport.clone());

    let result = controller
        .submit(raw(&[("name", ""), ("email", "bad-email"), ("phone", "123")]))
        .await;

    let errors = match result {
        Err(SubmitError::Validation(errors)) => errors,
        other => panic!("expected validation error, got {:?}", other),
    };
    let fields = errors.fields();
    for field in ["name", "email", "phone"] {
        assert!(fields.contains(&field), "no error for {field}");
    }
    assert_eq!(errors.message_for("name"), Some("Please enter your name"));
    assert_eq!(errors.message_for("email"), Some("Enter a valid email"));
    assert_eq!(errors.message_for("phone"), Some("Enter a valid phone"));

    assert_eq!(transport.calls(), 0);
    assert!(notifier.toasts().is_empty());
    assert_eq!(controller.field("email").as_deref(), Some("bad-email"));
    assert_eq!(controller.state(), SubmissionState::Idle);
}

#[tokio::test]
async fn test_each_schema_violation_blocks_network() {
    let cases = [
        ("name", "J"),
        ("email", "jane.example.com"),
        ("email", "jane@"),
        ("phone", "416555"),
        ("address", "1 Ma"),
        ("serviceType", ""),
        ("serviceType", "Window Washing"),
        ("frequency", "Monthly"),
    ];
    for (field, value) in cases {
        let transport = FakeTransport::accepting();
        let (controller, _) = controller(transport.clone());
        let mut input = valid_input();
        input.insert(field.to_string(), value.to_string());

        match controller.submit(input).await {
            Err(SubmitError::Validation(errors)) => {
                assert_eq!(errors.fields(), vec![field], "{field}={value:?}");
            }
            other => panic!("{field}={value:?}: expected validation error, got {:?}", other),
        }
        assert_eq!(transport.calls(), 0, "{field}={value:?}");
    }
}

#[tokio::test]
async fn test_valid_submit_posts_once_and_resets() {
    let transport = FakeTransport::accepting();
    let (controller, notifier) = controller(transport.clone());

    let mut input = valid_input();
    input.remove("frequency");
    input.insert("message".to_string(), "Please call after 5".to_string());

    let outcome = controller.submit(input).await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Sent { id: Some("email_123".to_string()) });

    let posted = transport.posted.lock().unwrap().clone();
    assert_eq!(posted.len(), 1);
    assert_eq!(posted[0].name, "Jane Doe");
    assert_eq!(posted[0].address.as_deref(), Some("1 Main St"));
    assert_eq!(posted[0].frequency, Frequency::OneTime);
    assert_eq!(posted[0].message.as_deref(), Some("Please call after 5"));
    assert!(posted[0].preferred_date.is_none());

    assert_eq!(notifier.toasts(), vec![Toast::Success(SUCCESS_MESSAGE.to_string())]);
    assert_eq!(controller.field("name").as_deref(), Some(""));
    assert_eq!(controller.field("frequency").as_deref(), Some("One-time"));
    assert!(!controller.is_submitting());
}

#[tokio::test]
async fn test_failed_submit_keeps_fields_for_retry() {
    let transport = FakeTransport::rejecting(500, "Email provider rejected the message");
    let (controller, notifier) = controller(transport.clone());

    let result = controller.submit(valid_input()).await;
    assert!(matches!(
        result,
        Err(SubmitError::Transport(TransportError::Rejected { status: 500, .. }))
    ));
    assert_eq!(notifier.toasts(), vec![Toast::Error(FAILURE_MESSAGE.to_string())]);
    assert_eq!(controller.field("name").as_deref(), Some("Jane Doe"));
    assert_eq!(controller.state(), SubmissionState::Idle);

    // manual resubmission of the same fields goes through
    transport.set_answer(Ok(RelayAck { ok: true, id: None }));
    let outcome = controller.submit_fields().await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Sent { id: None });
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn test_unacknowledged_response_is_failure() {
    let transport = FakeTransport::accepting();
    transport.set_answer(Ok(RelayAck { ok: false, id: None }));
    let (controller, notifier) = controller(transport);

    assert!(controller.submit(valid_input()).await.is_err());
    assert_eq!(notifier.toasts(), vec![Toast::Error(FAILURE_MESSAGE.to_string())]);
    assert_eq!(controller.field("email").as_deref(), Some("jane@example.com"));
}

#[tokio::test]
async fn test_second_submit_while_in_flight_is_suppressed() {
    let gate = Arc::new(Notify::new());
    let transport = FakeTransport::gated(gate.clone());
    let notifier = Arc::new(RecordingNotifier::default());
    let controller = Arc::new(FormController::new(transport.clone(), notifier.clone()));

    let first = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.submit(valid_input()).await })
    };

    while transport.calls() == 0 {
        tokio::task::yield_now().await;
    }
    assert!(controller.is_submitting());

    let second = controller.submit(valid_input()).await.unwrap();
    assert_eq!(second, SubmitOutcome::Suppressed);

    gate.notify_one();
    let first = first.await.unwrap().unwrap();
    assert_eq!(first, SubmitOutcome::Sent { id: Some("email_123".to_string()) });

    assert_eq!(transport.calls(), 1);
    assert_eq!(notifier.toasts().len(), 1);
    assert!(!controller.is_submitting());
}

#[tokio::test]
async fn test_submit_fields_uses_current_input() {
    let transport = FakeTransport::accepting();
    let (controller, _) = controller(transport.clone());
    for (k, v) in valid_input() {
        controller.set_field(&k, &v);
    }
    controller.set_field("preferredDate", "2025-10-01");

    controller.submit_fields().await.unwrap();
    let posted = transport.posted.lock().unwrap().clone();
    assert_eq!(posted[0].preferred_date.as_deref(), Some("2025-10-01"));
    assert_eq!(posted[0].frequency, Frequency::Weekly);
}
