//! Business services containing domain logic and use cases.

pub mod assessment;
pub mod auth;
pub mod session;
pub mod verification;

// Re-export commonly used types
pub use assessment::StressScorer;
pub use auth::{LoginOutcome, PhoneLoginService};
pub use session::{SessionService, SESSION_KEY};
pub use verification::{
    ClockTrait, DeliveryServiceTrait, DeliveryStatus, IssuedCode, KeyValueStoreTrait,
    OtpAuthenticator, SystemClock, VerificationResult, GENERIC_FAILURE_MESSAGE,
};
