//! In-memory adapter for AccountRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::poisoned;
use crate::domain::entities::{Account, UserId};
use crate::domain::ports::AccountRepository;
use crate::error::DomainError;

#[derive(Default, Clone)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<UserId, Account>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.accounts.read().unwrap().len()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().map_err(poisoned)?;
        Ok(accounts.get(id).cloned())
    }

    async fn find_by_name(&self, username: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().map_err(poisoned)?;
        Ok(accounts.values().find(|a| a.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().map_err(poisoned)?;
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn store(&self, account: &Account) -> Result<(), DomainError> {
        let mut accounts = self.accounts.write().map_err(poisoned)?;
        if accounts.contains_key(&account.id) {
            return Err(DomainError::Database(format!(
                "duplicate key storing account {}",
                account.id
            )));
        }
        accounts.insert(account.id, account.clone());
        Ok(())
    }
    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        let mut accounts = self.accounts.write().map_err(poisoned)?;
        accounts.remove(id).map(|_| ()).ok_or(DomainError::NotFound)
    }
}
