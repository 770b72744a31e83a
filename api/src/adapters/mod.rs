//! Adapters layer
//!
//! Implementations of port traits for storage backends.

pub mod memory;
pub mod postgres;

pub use memory::{InMemoryAccountRepository, InMemoryPostRepository, InMemoryUserRepository};
pub use postgres::{PostgresAccountRepository, PostgresPostRepository, PostgresUserRepository};
