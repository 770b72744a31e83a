//! PostgreSQL adapter for UserRepository
//!
//! Friend and follower sets live in JSONB columns as arrays of UUIDs.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};
use serde_json::Value;

use crate::domain::entities::{User, UserId};
use crate::domain::ports::UserRepository;
use crate::entity::users;
use crate::error::DomainError;

/// PostgreSQL implementation of UserRepository
pub struct PostgresUserRepository {
    db: DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn active_model(user: &User) -> Result<users::ActiveModel, DomainError> {
        Ok(users::ActiveModel {
            id: Set(user.id.0),
            username: Set(user.username.clone()),
            email: Set(user.email.clone()),
            bio: Set(user.bio.clone()),
            created_at: Set(user.created_at.fixed_offset()),
            last_seen: Set(user.last_seen.fixed_offset()),
            friends: Set(ids_to_json(&user.friends)?),
            followers: Set(ids_to_json(&user.followers)?),
        })
    }
}

fn ids_to_json(ids: &[UserId]) -> Result<Value, DomainError> {
    serde_json::to_value(ids).map_err(|e| DomainError::Internal(e.to_string()))
}

fn ids_from_json(value: Value) -> Result<Vec<UserId>, DomainError> {
    serde_json::from_value(value)
        .map_err(|e| DomainError::Database(format!("malformed relationship column: {}", e)))
}

impl TryFrom<users::Model> for User {
    type Error = DomainError;

    fn try_from(m: users::Model) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(m.id),
            username: m.username,
            email: m.email,
            bio: m.bio,
            created_at: m.created_at.with_timezone(&Utc),
            last_seen: m.last_seen.with_timezone(&Utc),
            friends: ids_from_json(m.friends)?,
            followers: ids_from_json(m.followers)?,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let result = users::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        result.map(User::try_from).transpose()
    }

    async fn find_by_name(&self, username: &str) -> Result<Option<User>, DomainError> {
        let result = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        result.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let result = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        result.map(User::try_from).transpose()
    }

    async fn store(&self, user: &User) -> Result<(), DomainError> {
        Self::active_model(user)?
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        Self::active_model(user)?
            .update(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => DomainError::NotFound,
                e => DomainError::Database(e.to_string()),
            })?;

        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        let result = users::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }
        Ok(())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = users::Entity::find()
            .filter(users::Column::Id.is_in(ids.iter().map(|id| id.0)))
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let mut by_id = HashMap::with_capacity(models.len());
        for model in models {
            let user = User::try_from(model)?;
            by_id.insert(user.id, user);
        }

        // Keep the caller's order
        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }
}
