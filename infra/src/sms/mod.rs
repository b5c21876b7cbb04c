//! SMS Service Module
//!
//! Delivery providers for verification codes. Only the mock provider ships
//! today; it prints messages to the console instead of sending them.
//!
//! ## Features
//!
//! - **Mock Implementation**: Console output for development
//! - **Failure simulation**: Exercise the "code stored, delivery failed" path
//! - **Security**: Phone number masking in logs

pub mod mock_sms;

pub use mock_sms::{verification_message, MockDeliveryService, SentMessage};

use zm_shared::config::AppConfig;

use crate::InfrastructureError;

#[cfg(test)]
mod tests;

/// Create the delivery provider named by `SMS_PROVIDER` (default `mock`)
///
/// Console output follows `Environment::is_debug`.
pub fn create_delivery_service(config: &AppConfig) -> Result<MockDeliveryService, InfrastructureError> {
    let provider = std::env::var("SMS_PROVIDER").unwrap_or_else(|_| "mock".to_string());
    create_delivery_service_for(&provider, config)
}

/// Same as [`create_delivery_service`] with an explicit provider name
pub fn create_delivery_service_for(
    provider: &str,
    config: &AppConfig,
) -> Result<MockDeliveryService, InfrastructureError> {
    match provider.to_ascii_lowercase().as_str() {
        "mock" => Ok(MockDeliveryService::with_options(
            config.environment.is_debug(),
            false,
        )
        .with_code_ttl_minutes(config.otp.code_ttl_minutes())),
        other => Err(InfrastructureError::Config(format!(
            "Unsupported SMS provider: {}",
            other
        ))),
    }
}
