//! Phone one-time passcode module
//!
//! This module provides the code workflow used by phone sign-in:
//! - Code generation and delivery
//! - Expiring, attempt-limited verification
//! - Resend cooldown tracking
//! - Collaborator traits for storage, delivery and time

mod service;
mod traits;
mod types;

#[cfg(test)]
pub(crate) mod tests;

pub use service::OtpAuthenticator;
pub use traits::{ClockTrait, DeliveryServiceTrait, KeyValueStoreTrait, SystemClock};
pub use types::{DeliveryStatus, IssuedCode, VerificationResult, GENERIC_FAILURE_MESSAGE};
