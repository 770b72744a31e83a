//! Event ports
//!
//! The account context pushes notifications through these; it knows nothing
//! else about the profile side.

use async_trait::async_trait;

use crate::error::DomainError;

/// Subscriber for account lifecycle events
#[async_trait]
pub trait AccountEvents: Send + Sync {
    /// A new account was persisted with this id and identity.
    ///
    /// An error means the subscriber refused the account; the publisher
    /// must not report it as created.
    async fn account_created(&self, id: &str, username: &str, email: &str)
        -> Result<(), DomainError>;
}
