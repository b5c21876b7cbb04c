//! Tests for the mock SMS provider

use std::time::Duration;

use zm_core::errors::DeliveryError;
use zm_core::services::DeliveryServiceTrait;
use zm_shared::config::{AppConfig, OtpConfig};

use crate::sms::{create_delivery_service_for, verification_message, MockDeliveryService};
use crate::InfrastructureError;

fn quiet_service() -> MockDeliveryService {
    MockDeliveryService::with_options(false, false).with_latency(Duration::ZERO)
}

#[test]
fn test_verification_message() {
    assert_eq!(
        verification_message("012345", 10),
        "Your ZenithMind verification code is 012345. It expires in 10 minutes."
    );
}

#[tokio::test]
async fn test_mock_sms_send_success() {
    let service = quiet_service();
    let message_id = service
        .send_verification_code("+14155552671", "123456")
        .await
        .unwrap();

    assert!(message_id.starts_with("mock_"));
    assert_eq!(service.message_count(), 1);

    let sent = service.last_message_to("+14155552671").await.unwrap();
    assert_eq!(sent.message_id, message_id);
    assert!(sent.body.contains("123456"));
    assert!(sent.body.ends_with("It expires in 10 minutes."));
}

#[tokio::test]
async fn test_mock_sms_invalid_phone() {
    let service = quiet_service();
    let result = service.send_verification_code("12345", "123456").await;

    assert!(matches!(result, Err(DeliveryError::Rejected { .. })));
    assert_eq!(service.message_count(), 0);
}

#[tokio::test]
async fn test_mock_sms_simulated_failure() {
    let service = MockDeliveryService::with_options(false, true).with_latency(Duration::ZERO);
    let result = service.send_verification_code("+14155552671", "123456").await;
    assert_eq!(
        result,
        Err(DeliveryError::Unavailable {
            provider: "Mock".to_string()
        })
    );

    service.set_simulate_failure(false);
    assert!(service
        .send_verification_code("+14155552671", "123456")
        .await
        .is_ok());
}

#[tokio::test]
async fn test_clones_share_outbox() {
    let service = quiet_service();
    let clone = service.clone();

    clone.send_verification_code("+14155552671", "111111").await.unwrap();
    service.send_verification_code("+447700900123", "222222").await.unwrap();

    assert_eq!(service.message_count(), 2);
    assert_eq!(clone.sent_messages().await.len(), 2);

    service.reset().await;
    assert_eq!(clone.message_count(), 0);
    assert!(clone.sent_messages().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_latency_is_simulated() {
    let service = MockDeliveryService::with_options(false, false)
        .with_latency(Duration::from_secs(1));

    let start = tokio::time::Instant::now();
    service.send_verification_code("+14155552671", "123456").await.unwrap();
    assert!(start.elapsed() >= Duration::from_secs(1));
}

#[test]
fn test_create_delivery_service() {
    let config = AppConfig {
        otp: OtpConfig {
            code_ttl_seconds: 300,
            ..Default::default()
        },
        ..AppConfig::development()
    };

    let service = create_delivery_service_for("MOCK", &config).unwrap();
    assert_eq!(service.provider_name(), "Mock");

    assert!(matches!(
        create_delivery_service_for("carrier-pigeon", &config),
        Err(InfrastructureError::Config(_))
    ));
}
