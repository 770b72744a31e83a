//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (in-memory, PostgreSQL).
//!
//! Reads return owned values. A mutation made to a returned `User` is not
//! visible to anyone else until it is written back with `update`.

use async_trait::async_trait;

use crate::domain::entities::{Account, Post, PostId, User, UserId};
use crate::error::DomainError;

/// Repository for User entities
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Find a user by username
    async fn find_by_name(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Insert a new user
    async fn store(&self, user: &User) -> Result<(), DomainError>;

    /// Persist all fields of an existing user. `NotFound` if it was never stored.
    async fn update(&self, user: &User) -> Result<(), DomainError>;

    /// Remove a user. Only fixtures use this.
    async fn delete(&self, id: &UserId) -> Result<(), DomainError>;

    /// Bulk lookup; ids with no stored user are skipped, never an error
    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, DomainError>;
}

/// Repository for Post entities
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a new post
    async fn store(&self, post: &Post) -> Result<(), DomainError>;

    /// Find a post by ID
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, DomainError>;

    /// Posts by one author, newest first
    async fn find_latest_posts_for_user(&self, user_id: &UserId)
        -> Result<Vec<Post>, DomainError>;

    /// Posts by the user and by everyone in `user.friends`, newest first
    async fn find_latest_posts_for_user_and_friends(
        &self,
        user: &User,
    ) -> Result<Vec<Post>, DomainError>;
}

/// Repository for credential records of the account context
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by ID
    async fn find_by_id(&self, id: &UserId) -> Result<Option<Account>, DomainError>;

    /// Find an account by username
    async fn find_by_name(&self, username: &str) -> Result<Option<Account>, DomainError>;

    /// Find an account by email
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Insert a new account
    async fn store(&self, account: &Account) -> Result<(), DomainError>;

    /// Remove an account
    async fn delete(&self, id: &UserId) -> Result<(), DomainError>;
}
