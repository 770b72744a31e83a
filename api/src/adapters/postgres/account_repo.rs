//! PostgreSQL adapter for AccountRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::domain::entities::{Account, UserId};
use crate::domain::ports::AccountRepository;
use crate::entity::accounts;
use crate::error::DomainError;

/// PostgreSQL implementation of AccountRepository
pub struct PostgresAccountRepository {
    db: DatabaseConnection,
}

impl PostgresAccountRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<accounts::Model> for Account {
    fn from(m: accounts::Model) -> Self {
        Account {
            id: UserId(m.id),
            username: m.username,
            email: m.email,
            password_hash: m.password_hash,
            created_at: m.created_at.with_timezone(&Utc),
        }
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<Account>, DomainError> {
        let result = accounts::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_name(&self, username: &str) -> Result<Option<Account>, DomainError> {
        let result = accounts::Entity::find()
            .filter(accounts::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let result = accounts::Entity::find()
            .filter(accounts::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn store(&self, account: &Account) -> Result<(), DomainError> {
        accounts::ActiveModel {
            id: Set(account.id.0),
            username: Set(account.username.clone()),
            email: Set(account.email.clone()),
            password_hash: Set(account.password_hash.clone()),
            created_at: Set(account.created_at.fixed_offset()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }
    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        let result = accounts::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }
        Ok(())
    }
}
