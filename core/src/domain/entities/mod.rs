//! Domain entities representing core business objects.

pub mod assessment;
pub mod otp_record;
pub mod user;

// Re-export commonly used types
pub use assessment::{
    AnswerSequence, Question, Resource, ResourceKind, StressCategory, StressReport, StressScore,
    MAX_ANSWER_VALUE, MIN_ANSWER_VALUE, QUESTIONS, QUESTION_COUNT,
};
pub use otp_record::{
    OtpCode, OtpRecord, SendThrottleRecord, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS,
    RESEND_COOLDOWN_SECONDS,
};
pub use user::User;
