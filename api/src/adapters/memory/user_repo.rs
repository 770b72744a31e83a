//! In-memory adapter for UserRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::poisoned;
use crate::domain::entities::{User, UserId};
use crate::domain::ports::UserRepository;
use crate::error::DomainError;

#[derive(Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a user for testing
    #[cfg(test)]
    pub fn with_user(self, user: User) -> Self {
        self.users.write().unwrap().insert(user.id, user);
        self
    }

    /// Number of stored users
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.users.read().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.get(id).cloned())
    }

    async fn find_by_name(&self, username: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn store(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.write().map_err(poisoned)?;

        let clash = users.values().any(|u| {
            u.id == user.id || u.username == user.username || u.email == user.email
        });
        if clash {
            return Err(DomainError::Database(format!(
                "duplicate key storing user {}",
                user.id
            )));
        }

        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.write().map_err(poisoned)?;
        match users.get_mut(&user.id) {
            Some(stored) => {
                *stored = user.clone();
                Ok(())
            }
            None => Err(DomainError::NotFound),
        }
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        let mut users = self.users.write().map_err(poisoned)?;
        users.remove(id).map(|_| ()).ok_or(DomainError::NotFound)
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }
}
