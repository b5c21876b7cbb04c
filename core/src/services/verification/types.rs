//! Types for OTP authenticator results

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::otp_record::OtpCode;

/// Message shown for every failed verification
///
/// Expiry, lockout and a wrong code read the same so the attempt count is
/// not revealed.
pub const GENERIC_FAILURE_MESSAGE: &str = "Invalid or expired code. Please try again.";

/// What happened when the issued code was handed to the delivery service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeliveryStatus {
    /// The provider accepted the message
    Sent { message_id: String },
    /// The provider failed; the stored code is still valid and a resend may be requested
    Failed { reason: String },
}

/// Result of issuing a code
#[derive(Debug, Clone)]
pub struct IssuedCode {
    /// The code that was stored and handed to delivery
    pub code: OtpCode,
    /// When the code stops being accepted
    pub expires_at: DateTime<Utc>,
    /// When the user can request another code
    pub next_resend_at: DateTime<Utc>,
    /// Delivery outcome
    pub delivery: DeliveryStatus,
}

impl IssuedCode {
    pub fn is_delivered(&self) -> bool {
        matches!(self.delivery, DeliveryStatus::Sent { .. })
    }
}

/// Outcome of a verification attempt
///
/// Every outcome is a normal value; only store faults are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationResult {
    /// The code matched
    Valid,
    /// The code did not match; the record remains
    Invalid,
    /// The record had expired and was removed
    Expired,
    /// Too many attempts; the record was removed
    Exhausted,
    /// No code was issued for this number
    NotFound,
}

impl VerificationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, VerificationResult::Valid)
    }

    /// Whether the user must request a new code to continue
    pub fn requires_new_code(&self) -> bool {
        matches!(
            self,
            VerificationResult::Expired | VerificationResult::Exhausted | VerificationResult::NotFound
        )
    }

    /// Text safe to show the user
    pub fn user_message(&self) -> &'static str {
        match self {
            VerificationResult::Valid => "Verification successful",
            _ => GENERIC_FAILURE_MESSAGE,
        }
    }
}
