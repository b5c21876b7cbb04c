//! Types for phone login results

use serde::Serialize;

use crate::domain::entities::user::User;
use crate::services::verification::VerificationResult;

/// Result of submitting a code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoginOutcome {
    /// The code was accepted and a session started
    SignedIn { user: User },
    /// The code was not accepted
    Rejected {
        result: VerificationResult,
        /// Text safe to show the user; identical for every rejection
        message: &'static str,
    },
}

impl LoginOutcome {
    pub fn is_signed_in(&self) -> bool {
        matches!(self, LoginOutcome::SignedIn { .. })
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            LoginOutcome::SignedIn { user } => Some(user),
            LoginOutcome::Rejected { .. } => None,
        }
    }
}
