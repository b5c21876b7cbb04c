//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

// Re-export all error types
pub use types::{AssessmentError, AuthError, DeliveryError, StoreError};

use thiserror::Error;

/// Core domain errors (general purpose)
///
/// Verification outcomes are not errors; see `VerificationResult`.
#[derive(Error, Debug)]
pub enum DomainError {
    /// A policy value the service cannot apply, such as a lifetime past the
    /// representable date range
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Assessment(#[from] AssessmentError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DomainError {
    /// Whether the caller can reasonably retry after showing a message
    pub fn is_user_recoverable(&self) -> bool {
        matches!(self, DomainError::Auth(_) | DomainError::Assessment(_))
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
