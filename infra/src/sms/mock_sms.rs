//! Mock SMS Service Implementation
//!
//! A mock implementation of code delivery for development and testing.
//! This implementation logs SMS messages to the console instead of sending them.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use zm_core::domain::entities::otp_record::DEFAULT_EXPIRATION_MINUTES;
use zm_core::errors::DeliveryError;
use zm_core::services::DeliveryServiceTrait;
use zm_shared::phone::{is_valid_phone_number, mask_phone_number};

const PROVIDER_NAME: &str = "Mock";

/// SMS body carrying a verification code
pub fn verification_message(code: &str, expires_in_minutes: i64) -> String {
    format!(
        "Your ZenithMind verification code is {}. It expires in {} minutes.",
        code, expires_in_minutes
    )
}

/// A message accepted by the mock provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub message_id: String,
    pub to: String,
    pub body: String,
}

/// Mock SMS service for development and testing
///
/// This implementation:
/// - Validates phone numbers
/// - Prints messages to the console
/// - Generates mock message IDs
/// - Keeps every accepted message for inspection
#[derive(Clone)]
pub struct MockDeliveryService {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Messages accepted so far
    outbox: Arc<Mutex<Vec<SentMessage>>>,
    /// Whether to simulate failures (for testing)
    simulate_failure: Arc<AtomicBool>,
    /// Whether to print messages to console
    console_output: bool,
    /// Simulated network delay
    latency: Duration,
    /// Expiry quoted in the message body
    code_ttl_minutes: i64,
}

impl MockDeliveryService {
    /// Create a new mock SMS service
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    /// Create a mock service with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            outbox: Arc::new(Mutex::new(Vec::new())),
            simulate_failure: Arc::new(AtomicBool::new(simulate_failure)),
            console_output,
            latency: Duration::from_millis(100),
            code_ttl_minutes: DEFAULT_EXPIRATION_MINUTES,
        }
    }

    /// Set the simulated network delay
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Set the expiry quoted in the message body
    pub fn with_code_ttl_minutes(mut self, minutes: i64) -> Self {
        self.code_ttl_minutes = minutes;
        self
    }

    /// Get the total number of messages sent
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Reset the message counter and outbox
    pub async fn reset(&self) {
        self.message_count.store(0, Ordering::SeqCst);
        self.outbox.lock().await.clear();
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// Every accepted message, oldest first
    pub async fn sent_messages(&self) -> Vec<SentMessage> {
        self.outbox.lock().await.clone()
    }

    /// The most recent message sent to `phone`
    pub async fn last_message_to(&self, phone: &str) -> Option<SentMessage> {
        self.outbox
            .lock()
            .await
            .iter()
            .rev()
            .find(|message| message.to == phone)
            .cloned()
    }
}

impl Default for MockDeliveryService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeliveryServiceTrait for MockDeliveryService {
    async fn send_verification_code(&self, phone: &str, code: &str) -> Result<String, DeliveryError> {
        let masked_phone = mask_phone_number(phone);

        // Validate phone number format
        if !is_valid_phone_number(phone) {
            return Err(DeliveryError::Rejected {
                provider: PROVIDER_NAME.to_string(),
                reason: format!("Invalid phone number format: {}", masked_phone),
            });
        }

        // Simulate network delay
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        // Simulate failure if configured
        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(
                target: "sms_service",
                provider = "mock",
                phone = %masked_phone,
                "Mock SMS service simulating failure"
            );
            return Err(DeliveryError::Unavailable {
                provider: PROVIDER_NAME.to_string(),
            });
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let body = verification_message(code, self.code_ttl_minutes);
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.console_output {
            // Console output for development - show full message
            println!("\n{}", "=".repeat(60));
            println!("📱 MOCK SMS SERVICE - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {}", phone);
            println!("Message ID: {}", message_id);
            println!("Content: {}", body);
            println!("{}\n", "=".repeat(60));
        }

        info!(
            target: "sms_service",
            provider = "mock",
            phone = %masked_phone,
            message_id = %message_id,
            message_length = body.len(),
            "SMS sent successfully (mock)"
        );

        self.outbox.lock().await.push(SentMessage {
            message_id: message_id.clone(),
            to: phone.to_string(),
            body,
        });

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        PROVIDER_NAME
    }
}
