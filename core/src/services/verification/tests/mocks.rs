//! Mock implementations for testing the OTP authenticator

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::{DeliveryError, StoreError};
use crate::services::verification::traits::{ClockTrait, DeliveryServiceTrait, KeyValueStoreTrait};

// Mock key-value store for testing
#[derive(Default)]
pub struct MockStore {
    pub values: Arc<Mutex<HashMap<String, String>>>,
    pub fail_writes: AtomicBool,
    pub fail_reads: AtomicBool,
    pub fail_writes_for: Mutex<Option<String>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    pub fn insert_raw(&self, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    pub fn len(&self) -> usize {
        self.values.lock().unwrap().len()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes_for(&self, key: &str) {
        *self.fail_writes_for.lock().unwrap() = Some(key.to_string());
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl KeyValueStoreTrait for MockStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable {
                message: "Store read error".to_string(),
            });
        }
        Ok(self.raw(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let key_fails = self.fail_writes_for.lock().unwrap().as_deref() == Some(key);
        if key_fails || self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable {
                message: "Store write error".to_string(),
            });
        }
        self.insert_raw(key, value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable {
                message: "Store write error".to_string(),
            });
        }
        self.values.lock().unwrap().remove(key);
        Ok(())
    }
}

// Mock delivery service for testing
#[derive(Default)]
pub struct MockDelivery {
    pub sent_messages: Arc<Mutex<Vec<(String, String)>>>,
    pub should_fail: AtomicBool,
    counter: AtomicU64,
}

impl MockDelivery {
    pub fn new(should_fail: bool) -> Self {
        Self {
            should_fail: AtomicBool::new(should_fail),
            ..Default::default()
        }
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn last_code_for(&self, phone: &str) -> Option<String> {
        self.sent_messages
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(p, _)| p == phone)
            .map(|(_, code)| code.clone())
    }

    pub fn sent_count(&self) -> usize {
        self.sent_messages.lock().unwrap().len()
    }
}

#[async_trait]
impl DeliveryServiceTrait for MockDelivery {
    async fn send_verification_code(&self, phone: &str, code: &str) -> Result<String, DeliveryError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DeliveryError::Rejected {
                provider: "MockDelivery".to_string(),
                reason: "SMS service error".to_string(),
            });
        }
        self.sent_messages
            .lock()
            .unwrap()
            .push((phone.to_string(), code.to_string()));
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("mock-msg-{}", n))
    }

    fn provider_name(&self) -> &str {
        "MockDelivery"
    }
}

// Manually advanced clock
pub struct MockClock {
    now: Mutex<DateTime<Utc>>,
}

impl MockClock {
    pub fn new() -> Self {
        let start = DateTime::parse_from_rfc3339("2024-03-01T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl ClockTrait for MockClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}
