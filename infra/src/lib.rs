//! # Infrastructure Layer
//!
//! Concrete collaborators for the ZenithMind core services.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Cache**: key-value stores for OTP, throttle and session records
//!   (in-memory, and Redis behind the `redis-cache` feature)
//! - **SMS**: code delivery (mock provider for development)
//! - **Logging**: `tracing` subscriber setup from `LoggingConfig`
//!
//! ## Features
//!
//! - `redis-cache`: Enable the Redis-backed store (default)

use std::sync::Arc;

// Re-export core types for convenience
pub use zm_core::errors::*;
pub use zm_shared::config::{AppConfig, Environment};

use zm_core::services::PhoneLoginService;
use zm_shared::config::OtpConfig;

/// Cache module - key-value store implementations
pub mod cache;

/// Logging module - tracing subscriber initialisation
pub mod logging;

/// SMS service module - code delivery providers
pub mod sms;

use cache::InMemoryStore;
use sms::MockDeliveryService;

/// Longest accepted code lifetime
pub const MAX_CODE_TTL_SECONDS: i64 = 86_400;

/// Longest accepted resend cooldown
pub const MAX_RESEND_COOLDOWN_SECONDS: i64 = 86_400;

/// Load configuration from the environment
///
/// Reads a `.env` file and then the per-environment file (for example
/// `.env.production`) when present, then applies every `OTP_*`, `REDIS_*`
/// and `LOG_*` variable over the environment's defaults.
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    dotenvy::dotenv().ok(); // Load .env file if present
    dotenvy::from_filename(Environment::from_env().env_file()).ok();

    let config = AppConfig::from_env();
    validate_otp_config(&config.otp)?;

    tracing::debug!(
        environment = %config.environment,
        code_length = config.otp.code_length,
        code_ttl_seconds = config.otp.code_ttl_seconds,
        "Configuration loaded"
    );

    Ok(config)
}

/// Reject OTP policies the authenticator cannot honour
pub fn validate_otp_config(otp: &OtpConfig) -> Result<(), InfrastructureError> {
    if !(4..=10).contains(&otp.code_length) {
        return Err(InfrastructureError::Config(format!(
            "OTP code length must be between 4 and 10, got {}",
            otp.code_length
        )));
    }
    if !(1..=MAX_CODE_TTL_SECONDS).contains(&otp.code_ttl_seconds) {
        return Err(InfrastructureError::Config(format!(
            "OTP code TTL must be between 1 and {} seconds, got {}",
            MAX_CODE_TTL_SECONDS, otp.code_ttl_seconds
        )));
    }
    if !(0..=MAX_RESEND_COOLDOWN_SECONDS).contains(&otp.resend_cooldown_seconds) {
        return Err(InfrastructureError::Config(format!(
            "OTP resend cooldown must be between 0 and {} seconds, got {}",
            MAX_RESEND_COOLDOWN_SECONDS, otp.resend_cooldown_seconds
        )));
    }
    if otp.max_attempts == 0 {
        return Err(InfrastructureError::Config(
            "OTP max attempts must be at least 1".to_string(),
        ));
    }
    if otp.key_prefix.trim().is_empty() {
        return Err(InfrastructureError::Config(
            "OTP key prefix cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Phone login wired to an in-memory store and the mock SMS provider
///
/// This is the local, single-process setup the app runs with until a
/// server store is configured.
pub fn create_local_login_service(
    config: &AppConfig,
) -> PhoneLoginService<InMemoryStore, MockDeliveryService> {
    let store = Arc::new(InMemoryStore::new());
    let delivery = Arc::new(
        MockDeliveryService::new().with_code_ttl_minutes(config.otp.code_ttl_minutes()),
    );
    PhoneLoginService::new(store, delivery, config.otp.clone())
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[cfg(feature = "redis-cache")]
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}

impl From<InfrastructureError> for StoreError {
    fn from(error: InfrastructureError) -> Self {
        StoreError::Unavailable {
            message: error.to_string(),
        }
    }
}
