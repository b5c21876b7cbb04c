//! Unit tests for domain error types

use crate::errors::{AssessmentError, AuthError, DeliveryError, DomainError, StoreError};

#[test]
fn test_auth_error_messages() {
    let error = AuthError::InvalidPhoneFormat {
        phone: "+14****2671".to_string(),
    };
    let message = error.to_string();
    assert!(message.contains("Invalid phone format"));
    assert!(message.contains("+14****2671"));

    let error = AuthError::RateLimitExceeded {
        retry_after_seconds: 42,
    };
    assert!(error.to_string().contains("42 seconds"));
}

#[test]
fn test_assessment_error_messages() {
    let error = AssessmentError::WrongLength {
        expected: 10,
        actual: 9,
    };
    assert!(error.to_string().starts_with("Invalid input"));

    let error = AssessmentError::AnswerOutOfRange {
        index: 3,
        value: 5,
        min: 0,
        max: 4,
    };
    assert_eq!(
        error.to_string(),
        "Invalid input: answer 3 is 5, expected 0..=4"
    );
}

#[test]
fn test_domain_error_bridges() {
    let error: DomainError = StoreError::Unavailable {
        message: "connection refused".to_string(),
    }
    .into();
    assert!(matches!(error, DomainError::Store(_)));
    assert!(!error.is_user_recoverable());
    assert_eq!(error.to_string(), "Store unavailable: connection refused");

    let error: DomainError = AuthError::MissingIdentifier.into();
    assert!(error.is_user_recoverable());

    let error: DomainError = AssessmentError::WrongLength {
        expected: 10,
        actual: 11,
    }
    .into();
    assert!(matches!(error, DomainError::Assessment(_)));
}

#[test]
fn test_delivery_error_messages() {
    let error = DeliveryError::Rejected {
        provider: "Mock".to_string(),
        reason: "Simulated failure".to_string(),
    };
    assert_eq!(error.to_string(), "Delivery rejected by Mock: Simulated failure");
}

#[test]
fn test_configuration_error_is_not_user_recoverable() {
    let error = DomainError::Configuration {
        message: "OTP code lifetime of 9999999999999 seconds is out of range".to_string(),
    };
    assert!(!error.is_user_recoverable());
    assert!(error.to_string().starts_with("Configuration error:"));
}
