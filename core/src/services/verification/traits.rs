//! Collaborator traits for the OTP authenticator
//!
//! The authenticator owns its records but not their storage, delivery or the
//! current time; each of these is injected behind a trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::{DeliveryError, StoreError};

/// Trait for the key-value store holding OTP and throttle records
///
/// Values are serialized records. A server deployment must make a
/// get-then-set on one key atomic, otherwise concurrent verifications of the
/// same number can lose attempt increments.
#[async_trait]
pub trait KeyValueStoreTrait: Send + Sync {
    /// Read a value; `Ok(None)` when absent
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    /// Write a value, replacing any previous one
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Remove a value; removing an absent key is not an error
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}

/// Trait for delivering a code to a phone number
#[async_trait]
pub trait DeliveryServiceTrait: Send + Sync {
    /// Deliver `code` to `phone`, returning a provider message id
    async fn send_verification_code(&self, phone: &str, code: &str) -> Result<String, DeliveryError>;
    /// Name used in logs
    fn provider_name(&self) -> &str;
}

/// Source of the current time
pub trait ClockTrait: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ClockTrait for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
