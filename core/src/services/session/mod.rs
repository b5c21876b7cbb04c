//! Local sign-in session
//!
//! Holds the signed-in user in the shared key-value store so a restart keeps
//! the user signed in.

mod service;


pub use service::{SessionService, SESSION_KEY};
