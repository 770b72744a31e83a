//! Test utilities
//!
//! Fixtures and failure-injecting test doubles for unit testing.
//!
//! Why manual mocks instead of mockall?
//! - mockall has lifetime issues with traits containing `&str` parameters
//! - Manual mocks are more explicit and easier to debug
//! - We control exactly what they return without macro magic
//!
//! The happy path runs against the real in-memory adapters in
//! `adapters::memory`; the doubles here only add failures and recording.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
