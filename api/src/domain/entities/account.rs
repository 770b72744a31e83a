//! Account entity
//!
//! Credentials owned by the account context. Shares its id with the
//! profile-side `User` created from the account-created notification.

use chrono::{DateTime, Utc};

use crate::domain::entities::UserId;

/// A registered account
#[derive(Debug, Clone)]
pub struct Account {
    pub id: UserId,
    pub username: String,
    pub email: String,
    /// argon2id PHC string
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
