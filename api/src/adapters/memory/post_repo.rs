//! In-memory adapter for PostRepository

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use super::poisoned;
use crate::domain::entities::{sort_newest_first, Post, PostId, User, UserId};
use crate::domain::ports::PostRepository;
use crate::error::DomainError;

/// Posts are kept in insertion order. Queries walk that order backwards
/// before the stable timestamp sort, so equal timestamps resolve to the
/// most recently stored post first.
#[derive(Default, Clone)]
pub struct InMemoryPostRepository {
    posts: Arc<RwLock<Vec<Post>>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a post for testing
    #[cfg(test)]
    pub fn with_post(self, post: Post) -> Self {
        self.posts.write().unwrap().push(post);
        self
    }

    fn latest_by_authors(&self, authors: &HashSet<UserId>) -> Result<Vec<Post>, DomainError> {
        let posts = self.posts.read().map_err(poisoned)?;
        let mut found: Vec<Post> = posts
            .iter()
            .rev()
            .filter(|p| authors.contains(&p.author_id))
            .cloned()
            .collect();
        sort_newest_first(&mut found);
        Ok(found)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn store(&self, post: &Post) -> Result<(), DomainError> {
        let mut posts = self.posts.write().map_err(poisoned)?;
        if posts.iter().any(|p| p.id == post.id) {
            return Err(DomainError::Database(format!(
                "duplicate key storing post {}",
                post.id
            )));
        }
        posts.push(post.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, DomainError> {
        let posts = self.posts.read().map_err(poisoned)?;
        Ok(posts.iter().find(|p| p.id == *id).cloned())
    }

    async fn find_latest_posts_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Post>, DomainError> {
        self.latest_by_authors(&HashSet::from([*user_id]))
    }

    async fn find_latest_posts_for_user_and_friends(
        &self,
        user: &User,
    ) -> Result<Vec<Post>, DomainError> {
        let mut authors: HashSet<UserId> = user.friends.iter().copied().collect();
        authors.insert(user.id);
        self.latest_by_authors(&authors)
    }
}
