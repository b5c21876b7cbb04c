//! # ZenithMind Core
//!
//! Domain layer for the ZenithMind wellness app: the workplace stress
//! assessment, phone one-time passcode sign-in and the local session.
//! Storage, delivery and time are collaborator traits implemented in
//! `zm_infra`.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::{
    ClockTrait, DeliveryServiceTrait, DeliveryStatus, IssuedCode, KeyValueStoreTrait, LoginOutcome,
    OtpAuthenticator, PhoneLoginService, SessionService, StressScorer, SystemClock,
    VerificationResult, GENERIC_FAILURE_MESSAGE,
};
