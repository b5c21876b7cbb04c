//! Main OTP authenticator implementation

use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use zm_shared::config::OtpConfig;
use zm_shared::phone::{mask_phone_number, normalize_phone_number};

use crate::domain::entities::otp_record::{OtpCode, OtpRecord, SendThrottleRecord};
use crate::errors::{DomainError, DomainResult, StoreError};

use super::traits::{ClockTrait, DeliveryServiceTrait, KeyValueStoreTrait, SystemClock};
use super::types::{DeliveryStatus, IssuedCode, VerificationResult};

/// Issues, stores and verifies one-time passcodes per phone number
///
/// Per number the authenticator moves `NoCode -> CodeActive -> Verified |
/// Expired | Exhausted`; a new `issue` always returns it to `CodeActive`.
/// Both the code record and the send-throttle record are owned here and
/// must not be touched through the store by anything else.
pub struct OtpAuthenticator<S, D, C = SystemClock>
where
    S: KeyValueStoreTrait,
    D: DeliveryServiceTrait,
    C: ClockTrait,
{
    /// Store for code and throttle records
    store: Arc<S>,
    /// Delivery service for sending codes
    delivery: Arc<D>,
    /// Time source
    clock: Arc<C>,
    /// Service configuration
    config: OtpConfig,
}

impl<S, D> OtpAuthenticator<S, D, SystemClock>
where
    S: KeyValueStoreTrait,
    D: DeliveryServiceTrait,
{
    /// Create a new authenticator using wall-clock time
    ///
    /// # Arguments
    ///
    /// * `store` - Key-value store implementation
    /// * `delivery` - Delivery service implementation
    /// * `config` - OTP policy
    pub fn new(store: Arc<S>, delivery: Arc<D>, config: OtpConfig) -> Self {
        Self::with_clock(store, delivery, Arc::new(SystemClock), config)
    }
}

impl<S, D, C> OtpAuthenticator<S, D, C>
where
    S: KeyValueStoreTrait,
    D: DeliveryServiceTrait,
    C: ClockTrait,
{
    /// Create a new authenticator with an explicit time source
    pub fn with_clock(store: Arc<S>, delivery: Arc<D>, clock: Arc<C>, config: OtpConfig) -> Self {
        Self {
            store,
            delivery,
            clock,
            config,
        }
    }

    /// The policy this authenticator enforces
    pub fn config(&self) -> &OtpConfig {
        &self.config
    }

    /// Current time according to the injected clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn cooldown(&self) -> DomainResult<Duration> {
        seconds_setting("resend cooldown", self.config.resend_cooldown_seconds)
    }

    fn code_ttl(&self) -> DomainResult<Duration> {
        seconds_setting("code lifetime", self.config.code_ttl_seconds)
    }

    fn code_key(&self, phone: &str) -> String {
        format!("{}:code:{}", self.config.key_prefix, normalize_phone_number(phone))
    }

    fn throttle_key(&self, phone: &str) -> String {
        format!("{}:last_sent:{}", self.config.key_prefix, normalize_phone_number(phone))
    }

    /// Check whether a new code may be sent to `phone`
    ///
    /// True when nothing was sent before or strictly more than the cooldown
    /// window has elapsed since the last send. Reads only.
    pub async fn can_send(&self, phone: &str) -> DomainResult<bool> {
        let cooldown = self.cooldown()?;
        let throttle: Option<SendThrottleRecord> = self.load(&self.throttle_key(phone)).await?;
        Ok(throttle.map_or(true, |t| t.allows_send_at(self.now(), cooldown)))
    }

    /// Time left until `can_send` becomes true; zero when a send is allowed
    pub async fn cooldown_remaining(&self, phone: &str) -> DomainResult<Duration> {
        let cooldown = self.cooldown()?;
        let throttle: Option<SendThrottleRecord> = self.load(&self.throttle_key(phone)).await?;
        let now = self.now();

        Ok(match throttle {
            Some(t) if !t.allows_send_at(now, cooldown) => {
                let next = t.next_send_at(cooldown).ok_or_else(|| out_of_range("resend cooldown"))?;
                // The window is exclusive, so at exactly zero remaining a send is still refused
                (next - now).max(Duration::milliseconds(1))
            }
            _ => Duration::zero(),
        })
    }

    /// Issue a new code for `phone`
    ///
    /// This method:
    /// 1. Generates a random code
    /// 2. Stores it, replacing any previous code for the number
    /// 3. Records the send time for throttling
    /// 4. Hands the code to the delivery service
    ///
    /// The cooldown is not enforced here; callers check `can_send` first.
    /// A delivery failure leaves the stored code valid and is reported in
    /// `IssuedCode::delivery`.
    ///
    /// If the throttle record cannot be written, the freshly stored code is
    /// deleted again before the error is returned, so no undelivered code
    /// stays live without a matching cooldown. A failure of that cleanup is
    /// only logged.
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedCode)` - The stored code and delivery outcome
    /// * `Err(DomainError)` - If the store could not be written, or the
    ///   configured lifetime or cooldown runs past the representable date range
    pub async fn issue(&self, phone: &str) -> DomainResult<IssuedCode> {
        let masked = mask_phone_number(phone);
        let now = self.now();
        let next_resend_at = now
            .checked_add_signed(self.cooldown()?)
            .ok_or_else(|| out_of_range("resend cooldown"))?;
        let code = OtpCode::generate(self.config.code_length, self.config.allow_leading_zero);
        let record =
            OtpRecord::new(code.clone(), now, self.code_ttl()?).ok_or_else(|| out_of_range("code lifetime"))?;
        let code_key = self.code_key(phone);

        self.save(&code_key, &record).await.map_err(|e| {
            tracing::error!(
                phone = %masked,
                error = %e,
                event = "otp_storage_failed",
                "Failed to store verification code"
            );
            e
        })?;

        if let Err(e) = self.save(&self.throttle_key(phone), &SendThrottleRecord::new(now)).await {
            tracing::error!(
                phone = %masked,
                error = %e,
                event = "otp_throttle_storage_failed",
                "Failed to record send time; withdrawing stored code"
            );
            if let Err(cleanup) = self.store.delete(&code_key).await {
                tracing::error!(
                    phone = %masked,
                    error = %cleanup,
                    event = "otp_rollback_failed",
                    "Failed to withdraw undelivered verification code"
                );
            }
            return Err(e);
        }

        tracing::info!(
            phone = %masked,
            expires_at = %record.expires_at,
            event = "otp_issued",
            "Issued new verification code"
        );

        let delivery = match self
            .delivery
            .send_verification_code(&normalize_phone_number(phone), code.as_str())
            .await
        {
            Ok(message_id) => {
                tracing::debug!(
                    phone = %masked,
                    provider = self.delivery.provider_name(),
                    message_id = %message_id,
                    "Verification code delivered"
                );
                DeliveryStatus::Sent { message_id }
            }
            Err(e) => {
                tracing::warn!(
                    phone = %masked,
                    provider = self.delivery.provider_name(),
                    error = %e,
                    event = "otp_delivery_failed",
                    "Verification code delivery failed; stored code remains valid"
                );
                DeliveryStatus::Failed {
                    reason: e.to_string(),
                }
            }
        };

        Ok(IssuedCode {
            code,
            expires_at: record.expires_at,
            next_resend_at,
            delivery,
        })
    }

    /// Verify a submitted code for `phone`
    ///
    /// The attempt is counted and persisted before anything else is checked,
    /// so an expired record still consumes an attempt. Then, in order:
    /// expiry, attempt budget, exact code match.
    ///
    /// # Returns
    ///
    /// * `Ok(VerificationResult)` - The outcome, including all rejections
    /// * `Err(DomainError)` - If the store failed
    pub async fn verify(&self, phone: &str, submitted_code: &str) -> DomainResult<VerificationResult> {
        let masked = mask_phone_number(phone);
        let key = self.code_key(phone);

        let Some(mut record) = self.load::<OtpRecord>(&key).await? else {
            tracing::debug!(phone = %masked, event = "otp_not_found", "No verification code on record");
            return Ok(VerificationResult::NotFound);
        };

        let now = self.now();
        let attempts = record.register_attempt();
        self.save(&key, &record).await?;

        if record.is_expired_at(now) {
            self.store.delete(&key).await?;
            tracing::info!(phone = %masked, attempts, event = "otp_expired", "Verification code expired");
            return Ok(VerificationResult::Expired);
        }

        if record.is_exhausted(self.config.max_attempts) {
            self.store.delete(&key).await?;
            tracing::warn!(
                phone = %masked,
                attempts,
                event = "otp_exhausted",
                "Maximum verification attempts exceeded"
            );
            return Ok(VerificationResult::Exhausted);
        }

        if record.code.matches(submitted_code) {
            if self.config.consume_on_success {
                self.store.delete(&key).await?;
            }
            tracing::info!(phone = %masked, attempts, event = "otp_verified_success", "Verification code accepted");
            return Ok(VerificationResult::Valid);
        }

        tracing::warn!(
            phone = %masked,
            remaining_attempts = record.remaining_attempts(self.config.max_attempts),
            event = "otp_verification_failed",
            "Verification code mismatch"
        );
        Ok(VerificationResult::Invalid)
    }

    /// Remove any code and throttle record for `phone`
    pub async fn clear(&self, phone: &str) -> DomainResult<()> {
        tracing::info!(
            phone = %mask_phone_number(phone),
            event = "clear_verification",
            "Clearing verification data for phone number"
        );
        self.store.delete(&self.code_key(phone)).await?;
        self.store.delete(&self.throttle_key(phone)).await?;
        Ok(())
    }

    async fn load<T: DeserializeOwned>(&self, key: &str) -> DomainResult<Option<T>> {
        match self.store.get(key).await? {
            Some(raw) => serde_json::from_str(&raw).map(Some).map_err(|e| {
                StoreError::Corrupt {
                    key: key.to_string(),
                    message: e.to_string(),
                }
                .into()
            }),
            None => Ok(None),
        }
    }

    async fn save<T: Serialize>(&self, key: &str, value: &T) -> DomainResult<()> {
        let raw = serde_json::to_string(value).map_err(|e| StoreError::Corrupt {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.store.set(key, &raw).await?;
        Ok(())
    }
}

fn seconds_setting(name: &str, seconds: i64) -> DomainResult<Duration> {
    Duration::try_seconds(seconds).ok_or_else(|| out_of_range(name))
}

fn out_of_range(name: &str) -> DomainError {
    DomainError::Configuration {
        message: format!("OTP {} is outside the representable date range", name),
    }
}
