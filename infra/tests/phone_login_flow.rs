//! End-to-end phone sign-in with the in-memory store and mock SMS provider

use std::sync::Arc;
use std::time::Duration as StdDuration;

use zm_core::{
    DeliveryStatus, DomainError, LoginOutcome, PhoneLoginService, StressCategory, StressScorer,
    VerificationResult,
};
use zm_infra::cache::InMemoryStore;
use zm_infra::sms::MockDeliveryService;
use zm_infra::{create_local_login_service, AppConfig, AuthError};
use zm_shared::config::OtpConfig;

const PHONE: &str = "+14155552671";

fn setup(
    config: OtpConfig,
) -> (
    Arc<InMemoryStore>,
    Arc<MockDeliveryService>,
    PhoneLoginService<InMemoryStore, MockDeliveryService>,
) {
    let store = Arc::new(InMemoryStore::new());
    let delivery = Arc::new(
        MockDeliveryService::with_options(false, false).with_latency(StdDuration::ZERO),
    );
    let service = PhoneLoginService::new(store.clone(), delivery.clone(), config);
    (store, delivery, service)
}

/// Pull the code out of the delivered SMS body
fn code_from_sms(body: &str) -> String {
    body.split_whitespace()
        .find_map(|word| {
            let digits = word.trim_end_matches('.');
            (digits.len() == 6 && digits.chars().all(|c| c.is_ascii_digit()))
                .then(|| digits.to_string())
        })
        .expect("message should contain a six-digit code")
}

#[tokio::test]
async fn test_full_sign_in_flow() {
    let (store, delivery, service) = setup(OtpConfig::default());

    let issued = service.request_code("+1 (415) 555-2671").await.unwrap();
    assert!(matches!(issued.delivery, DeliveryStatus::Sent { .. }));

    let sms = delivery.last_message_to(PHONE).await.unwrap();
    let code = code_from_sms(&sms.body);
    assert_eq!(code, issued.code.as_str());

    let outcome = service.submit_code(PHONE, &code).await.unwrap();
    let user = outcome.user().cloned().unwrap();
    assert_eq!(user.phone_number.as_deref(), Some(PHONE));

    // Code consumed, session stored
    assert_eq!(store.keys().await, vec!["otp:last_sent:+14155552671".to_string(), "user".to_string()]);
    assert_eq!(service.session().current_user().await.unwrap(), Some(user));

    service.logout().await.unwrap();
    assert!(!service.session().is_authenticated().await.unwrap());
}

#[tokio::test]
async fn test_resend_is_throttled() {
    let (_, delivery, service) = setup(OtpConfig::default());

    service.request_code(PHONE).await.unwrap();
    let err = service.resend_code(PHONE).await.unwrap_err();
    match err {
        DomainError::Auth(AuthError::RateLimitExceeded { retry_after_seconds }) => {
            assert!((59..=60).contains(&retry_after_seconds));
        }
        other => panic!("Expected RateLimitExceeded, got {:?}", other),
    }
    assert_eq!(delivery.message_count(), 1);
}

#[tokio::test]
async fn test_short_cooldown_allows_resend() {
    let config = OtpConfig {
        resend_cooldown_seconds: 0,
        ..Default::default()
    };
    let (_, delivery, service) = setup(config);

    let first = service.request_code(PHONE).await.unwrap();
    tokio::time::sleep(StdDuration::from_millis(5)).await;
    let second = service.resend_code(PHONE).await.unwrap();
    assert_eq!(delivery.message_count(), 2);

    if first.code != second.code {
        let outcome = service.submit_code(PHONE, first.code.as_str()).await.unwrap();
        assert!(matches!(
            outcome,
            LoginOutcome::Rejected {
                result: VerificationResult::Invalid,
                ..
            }
        ));
    }
    assert!(service
        .submit_code(PHONE, second.code.as_str())
        .await
        .unwrap()
        .is_signed_in());
}

#[tokio::test]
async fn test_lockout_after_five_wrong_codes() {
    let (_, _, service) = setup(OtpConfig::default());
    let issued = service.request_code(PHONE).await.unwrap();
    let wrong = if issued.code.as_str() == "123456" { "654321" } else { "123456" };

    for _ in 0..5 {
        let outcome = service.submit_code(PHONE, wrong).await.unwrap();
        assert!(!outcome.is_signed_in());
    }

    let outcome = service.submit_code(PHONE, issued.code.as_str()).await.unwrap();
    assert!(matches!(
        outcome,
        LoginOutcome::Rejected {
            result: VerificationResult::Exhausted,
            ..
        }
    ));
}

#[tokio::test]
async fn test_delivery_failure_is_reported_not_raised() {
    let (_, delivery, service) = setup(OtpConfig::default());
    delivery.set_simulate_failure(true);

    let issued = service.request_code(PHONE).await.unwrap();
    assert!(!issued.is_delivered());
    assert_eq!(delivery.message_count(), 0);

    // The stored code is still good
    assert!(service
        .submit_code(PHONE, issued.code.as_str())
        .await
        .unwrap()
        .is_signed_in());
}

#[tokio::test]
async fn test_legacy_policy_keeps_code_after_success() {
    let (store, _, service) = setup(OtpConfig::legacy());
    let issued = service.request_code(PHONE).await.unwrap();
    assert!(!issued.code.as_str().starts_with('0'));

    service.submit_code(PHONE, issued.code.as_str()).await.unwrap();
    assert!(store.keys().await.contains(&"otp:code:+14155552671".to_string()));
}

#[tokio::test]
async fn test_local_service_from_config() {
    let service = create_local_login_service(&AppConfig::default());
    let issued = service.request_code(PHONE).await.unwrap();
    assert!(issued.is_delivered());
}

#[test]
fn test_assessment_alongside_login() {
    let scorer = StressScorer::new();
    assert_eq!(scorer.score(&[1, 1, 1, 1, 1, 1, 1, 1, 1, 1]).unwrap(), StressCategory::Low);
    assert_eq!(scorer.score(&[3, 3, 3, 3, 3, 3, 3, 3, 3, 3]).unwrap(), StressCategory::High);
}
