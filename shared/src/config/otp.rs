//! One-time passcode policy configuration

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Policy for issuing and verifying phone one-time passcodes
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Number of digits in a generated code
    #[serde(default = "default_code_length")]
    pub code_length: usize,

    /// Seconds a code stays valid after issuance
    #[serde(default = "default_code_ttl")]
    pub code_ttl_seconds: i64,

    /// Seconds that must elapse before another code may be sent to the same number
    #[serde(default = "default_resend_cooldown")]
    pub resend_cooldown_seconds: i64,

    /// Verification attempts allowed per code; the attempt after this is rejected
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Whether generated codes may start with `0` (full `000000..=999999` space)
    #[serde(default = "default_true")]
    pub allow_leading_zero: bool,

    /// Delete the record on a successful verification so a code cannot be replayed
    #[serde(default = "default_true")]
    pub consume_on_success: bool,

    /// Prefix for the store keys owned by the authenticator
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_length: default_code_length(),
            code_ttl_seconds: default_code_ttl(),
            resend_cooldown_seconds: default_resend_cooldown(),
            max_attempts: default_max_attempts(),
            allow_leading_zero: true,
            consume_on_success: true,
            key_prefix: default_key_prefix(),
        }
    }
}

impl OtpConfig {
    /// Policy matching the browser build exactly: codes never start with `0`
    /// and a verified code stays usable until it expires or is replaced.
    pub fn legacy() -> Self {
        Self {
            allow_leading_zero: false,
            consume_on_success: false,
            ..Default::default()
        }
    }

    /// Create from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            code_length: env_or("OTP_CODE_LENGTH", defaults.code_length),
            code_ttl_seconds: env_or("OTP_CODE_TTL_SECONDS", defaults.code_ttl_seconds),
            resend_cooldown_seconds: env_or(
                "OTP_RESEND_COOLDOWN_SECONDS",
                defaults.resend_cooldown_seconds,
            ),
            max_attempts: env_or("OTP_MAX_ATTEMPTS", defaults.max_attempts),
            allow_leading_zero: env_or("OTP_ALLOW_LEADING_ZERO", defaults.allow_leading_zero),
            consume_on_success: env_or("OTP_CONSUME_ON_SUCCESS", defaults.consume_on_success),
            key_prefix: env::var("OTP_KEY_PREFIX").unwrap_or(defaults.key_prefix),
        }
    }

    /// Code lifetime in whole minutes, rounded up
    pub fn code_ttl_minutes(&self) -> i64 {
        (self.code_ttl_seconds + 59) / 60
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

fn default_code_length() -> usize {
    6
}

fn default_code_ttl() -> i64 {
    600 // 10 minutes
}

fn default_resend_cooldown() -> i64 {
    60
}

fn default_max_attempts() -> u32 {
    5
}

fn default_true() -> bool {
    true
}

fn default_key_prefix() -> String {
    String::from("otp")
}
