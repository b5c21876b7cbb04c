//! Error types for authentication, assessment scoring and collaborator faults

use thiserror::Error;

/// Authentication-related errors
///
/// Verification outcomes (invalid, expired, exhausted) are reported through
/// `VerificationResult`, not through this enum.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid phone format: {phone}")]
    InvalidPhoneFormat { phone: String },

    #[error("Please wait {retry_after_seconds} seconds before requesting a new code")]
    RateLimitExceeded { retry_after_seconds: i64 },

    #[error("Login requires an email address or phone number")]
    MissingIdentifier,
}

/// Stress assessment input errors
///
/// A malformed answer sequence is a caller bug; it is reported, never clamped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssessmentError {
    #[error("Invalid input: expected {expected} answers, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("Invalid input: answer {index} is {value}, expected {min}..={max}")]
    AnswerOutOfRange {
        index: usize,
        value: i32,
        min: i32,
        max: i32,
    },
}

/// Key-value store faults
///
/// These are infrastructure failures and are fatal to the operation that hit them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store unavailable: {message}")]
    Unavailable { message: String },

    #[error("Corrupt value at {key}: {message}")]
    Corrupt { key: String, message: String },
}

/// Code delivery failures
///
/// Recoverable: the issued code stays valid and the user may retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("Delivery rejected by {provider}: {reason}")]
    Rejected { provider: String, reason: String },

    #[error("Delivery provider {provider} unavailable")]
    Unavailable { provider: String },
}
