//! One-time passcode records for phone sign-in.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of verification attempts allowed per code
pub const MAX_ATTEMPTS: u32 = 5;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for verification codes (10 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 10;

/// Default minimum gap between two sends to the same number
pub const RESEND_COOLDOWN_SECONDS: i64 = 60;

/// A numeric one-time passcode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OtpCode(String);

impl OtpCode {
    /// Generates a uniformly random code of `length` digits
    ///
    /// With `allow_leading_zero` the full `0..10^length` space is used and the
    /// value is zero-padded. Without it the first digit is never `0`, which
    /// narrows a 6-digit space to `100000..=999999`.
    pub fn generate(length: usize, allow_leading_zero: bool) -> Self {
        Self::generate_with(&mut rand::thread_rng(), length, allow_leading_zero)
    }

    /// Same as [`OtpCode::generate`] with a caller-supplied RNG
    pub fn generate_with<R: Rng + ?Sized>(
        rng: &mut R,
        length: usize,
        allow_leading_zero: bool,
    ) -> Self {
        let length = length.clamp(1, 18);
        let upper = 10u64.pow(length as u32);
        let lower = if allow_leading_zero { 0 } else { upper / 10 };
        let value = rng.gen_range(lower..upper);
        Self(format!("{:0width$}", value, width = length))
    }

    /// The code as submitted by a user would be compared
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exact comparison against a submitted code, in constant time for equal lengths
    pub fn matches(&self, submitted: &str) -> bool {
        self.0.len() == submitted.len() && constant_time_eq(self.0.as_bytes(), submitted.as_bytes())
    }
}

impl fmt::Display for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OtpCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

/// The live code for one phone number
///
/// Only one record exists per number; a newer send overwrites it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// The code that was delivered
    pub code: OtpCode,

    /// Absolute expiry instant
    pub expires_at: DateTime<Utc>,

    /// Verification attempts made against this code
    pub attempts: u32,
}

impl OtpRecord {
    /// Creates a fresh record valid for `ttl` from `now`
    ///
    /// `None` when the expiry falls outside the representable date range.
    pub fn new(code: OtpCode, now: DateTime<Utc>, ttl: Duration) -> Option<Self> {
        Some(Self {
            code,
            expires_at: now.checked_add_signed(ttl)?,
            attempts: 0,
        })
    }

    /// A code is expired strictly after its expiry instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Counts one verification attempt and returns the new total
    pub fn register_attempt(&mut self) -> u32 {
        self.attempts = self.attempts.saturating_add(1);
        self.attempts
    }

    /// Whether the attempt budget has been overrun
    pub fn is_exhausted(&self, max_attempts: u32) -> bool {
        self.attempts > max_attempts
    }

    /// Attempts left before the record is exhausted
    pub fn remaining_attempts(&self, max_attempts: u32) -> u32 {
        max_attempts.saturating_sub(self.attempts)
    }

    /// Time left until expiry, zero once expired
    pub fn time_until_expiration(&self, now: DateTime<Utc>) -> Duration {
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}

/// When a code was last sent to a phone number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendThrottleRecord {
    pub last_sent_at: DateTime<Utc>,
}

impl SendThrottleRecord {
    pub fn new(last_sent_at: DateTime<Utc>) -> Self {
        Self { last_sent_at }
    }

    /// A new send is allowed once strictly more than `cooldown` has elapsed
    pub fn allows_send_at(&self, now: DateTime<Utc>, cooldown: Duration) -> bool {
        now - self.last_sent_at > cooldown
    }

    /// Earliest instant at which another send is allowed
    pub fn next_send_at(&self, cooldown: Duration) -> Option<DateTime<Utc>> {
        self.last_sent_at.checked_add_signed(cooldown)
    }
}
