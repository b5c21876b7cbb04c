//! Shared configuration and utilities for the ZenithMind core
//!
//! This crate provides common functionality used across the workspace:
//! - Configuration types (OTP policy, cache, logging, environment)
//! - Phone number utilities (normalisation, validation, masking)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, Environment, LogFormat, LoggingConfig, OtpConfig,
};
pub use utils::phone;
