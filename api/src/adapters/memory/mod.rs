//! In-memory adapters
//!
//! Repository implementations backed by maps behind `RwLock`s. Every read
//! hands out a clone, so callers never alias stored records. Used as the
//! default backend and by the unit tests.

pub mod account_repo;
pub mod post_repo;
pub mod user_repo;

pub use account_repo::InMemoryAccountRepository;
pub use post_repo::InMemoryPostRepository;
pub use user_repo::InMemoryUserRepository;

use crate::error::DomainError;

fn poisoned<T>(_: T) -> DomainError {
    DomainError::Internal("in-memory store lock poisoned".to_string())
}
