//! Phone login module
//!
//! This module provides the phone sign-in flow:
//! - Phone number validation and normalisation
//! - Resend cooldown enforcement
//! - Code verification and session start

mod service;
mod types;


pub use service::PhoneLoginService;
pub use types::LoginOutcome;
