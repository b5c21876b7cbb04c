//! Unit tests for the OTP authenticator

pub mod mocks;
