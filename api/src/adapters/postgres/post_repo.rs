//! PostgreSQL adapter for PostRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::entities::{Post, PostId, User, UserId};
use crate::domain::ports::PostRepository;
use crate::entity::posts;
use crate::error::DomainError;

/// PostgreSQL implementation of PostRepository
pub struct PostgresPostRepository {
    db: DatabaseConnection,
}

impl PostgresPostRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Ids are UUIDv7, so the secondary key puts the later post first on
    /// equal timestamps.
    async fn latest_by_authors(&self, authors: Vec<Uuid>) -> Result<Vec<Post>, DomainError> {
        let results = posts::Entity::find()
            .filter(posts::Column::AuthorId.is_in(authors))
            .order_by_desc(posts::Column::CreatedAt)
            .order_by_desc(posts::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }
}

impl From<posts::Model> for Post {
    fn from(m: posts::Model) -> Self {
        Post {
            id: PostId(m.id),
            author_id: UserId(m.author_id),
            body: m.body,
            created_at: m.created_at.with_timezone(&Utc),
        }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn store(&self, post: &Post) -> Result<(), DomainError> {
        posts::ActiveModel {
            id: Set(post.id.0),
            author_id: Set(post.author_id.0),
            body: Set(post.body.clone()),
            created_at: Set(post.created_at.fixed_offset()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, DomainError> {
        let result = posts::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_latest_posts_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Post>, DomainError> {
        self.latest_by_authors(vec![user_id.0]).await
    }

    async fn find_latest_posts_for_user_and_friends(
        &self,
        user: &User,
    ) -> Result<Vec<Post>, DomainError> {
        let mut authors: Vec<Uuid> = user.friends.iter().map(|id| id.0).collect();
        authors.push(user.id.0);
        self.latest_by_authors(authors).await
    }
}
