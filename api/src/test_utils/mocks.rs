//! Test doubles for the port traits
//!
//! Storage that fails on demand and an event sink that records what it
//! was told.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use crate::adapters::memory::InMemoryUserRepository;
use crate::domain::entities::{Post, PostId, User, UserId};
use crate::domain::ports::{AccountEvents, PostRepository, UserRepository};
use crate::error::DomainError;

fn injected() -> DomainError {
    DomainError::Database("injected failure".to_string())
}

// ============================================================================
// Failing User Repository
// ============================================================================

/// Delegates to an in-memory repository, failing `update` for chosen users
/// and optionally every `store`
#[derive(Clone)]
pub struct FailingUserRepository {
    inner: InMemoryUserRepository,
    failing_updates: Arc<RwLock<HashSet<UserId>>>,
    failing_stores: Arc<AtomicBool>,
}

impl FailingUserRepository {
    pub fn new(inner: InMemoryUserRepository) -> Self {
        Self {
            inner,
            failing_updates: Arc::new(RwLock::new(HashSet::new())),
            failing_stores: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every `store` fail
    pub fn failing_stores(self) -> Self {
        self.failing_stores.store(true, Ordering::SeqCst);
        self
    }

    /// Make every `update` of this user fail
    pub fn failing_updates_for(self, id: UserId) -> Self {
        self.failing_updates.write().unwrap().insert(id);
        self
    }
}

#[async_trait]
impl UserRepository for FailingUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_name(&self, username: &str) -> Result<Option<User>, DomainError> {
        self.inner.find_by_name(username).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.inner.find_by_email(email).await
    }

    async fn store(&self, user: &User) -> Result<(), DomainError> {
        if self.failing_stores.load(Ordering::SeqCst) {
            return Err(injected());
        }
        self.inner.store(user).await
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        if self.failing_updates.read().unwrap().contains(&user.id) {
            return Err(injected());
        }
        self.inner.update(user).await
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        self.inner.delete(id).await
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, DomainError> {
        self.inner.find_by_ids(ids).await
    }
}

// ============================================================================
// Failing Post Repository
// ============================================================================

/// Post storage that is always down
pub struct FailingPostRepository;

#[async_trait]
impl PostRepository for FailingPostRepository {
    async fn store(&self, _post: &Post) -> Result<(), DomainError> {
        Err(injected())
    }

    async fn find_by_id(&self, _id: &PostId) -> Result<Option<Post>, DomainError> {
        Err(injected())
    }

    async fn find_latest_posts_for_user(&self, _user_id: &UserId) -> Result<Vec<Post>, DomainError> {
        Err(injected())
    }

    async fn find_latest_posts_for_user_and_friends(
        &self,
        _user: &User,
    ) -> Result<Vec<Post>, DomainError> {
        Err(injected())
    }
}

// ============================================================================
// Recording Account Events
// ============================================================================

/// (id, username, email) as passed to `account_created`
pub type CreatedAccount = (String, String, String);

/// Event sink that records every account-created notification
#[derive(Default)]
pub struct RecordingAccountEvents {
    created: Arc<RwLock<Vec<CreatedAccount>>>,
    refusal: Arc<RwLock<Option<DomainError>>>,
}

impl RecordingAccountEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every later notification with this error
    pub fn refuse_with(&self, error: DomainError) {
        *self.refusal.write().unwrap() = Some(error);
    }

    pub fn created(&self) -> Vec<CreatedAccount> {
        self.created.read().unwrap().clone()
    }
}

#[async_trait]
impl AccountEvents for RecordingAccountEvents {
    async fn account_created(
        &self,
        id: &str,
        username: &str,
        email: &str,
    ) -> Result<(), DomainError> {
        self.created
            .write()
            .unwrap()
            .push((id.to_string(), username.to_string(), email.to_string()));

        match self.refusal.read().unwrap().clone() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
