//! Post service
//!
//! Creates posts and reads a single author's posts back.

use std::sync::Arc;

use crate::app::lookup::{parse_user_id, user_by_name};
use crate::domain::entities::{Post, PostId};
use crate::domain::ports::{PostRepository, UserRepository};
use crate::error::DomainError;

/// Service for the post lifecycle
pub struct PostService<UR, PR>
where
    UR: UserRepository,
    PR: PostRepository,
{
    users: Arc<UR>,
    posts: Arc<PR>,
}

impl<UR, PR> PostService<UR, PR>
where
    UR: UserRepository,
    PR: PostRepository,
{
    pub fn new(users: Arc<UR>, posts: Arc<PR>) -> Self {
        Self { users, posts }
    }

    /// Publish a post for `author_id`, returning its new id
    pub async fn create_post(&self, author_id: &str, body: &str) -> Result<PostId, DomainError> {
        let author_id = parse_user_id(author_id)?;

        let author = self
            .users
            .find_by_id(&author_id)
            .await?
            .ok_or(DomainError::NotFound)?;

        let post = Post::new(author.id, body)?;
        self.posts.store(&post).await.map_err(|e| {
            tracing::error!(author_id = %author.id, error = %e, "Failed to store post");
            e
        })?;

        tracing::debug!(post_id = %post.id, author_id = %author.id, "Created post");
        Ok(post.id)
    }

    /// Posts written by `username`, newest first
    pub async fn get_user_posts(&self, username: &str) -> Result<Vec<Post>, DomainError> {
        let user = user_by_name(self.users.as_ref(), username).await?;
        self.posts.find_latest_posts_for_user(&user.id).await
    }

    /// A single post by id
    pub async fn get_post(&self, post_id: &str) -> Result<Post, DomainError> {
        let id: PostId = post_id.parse()?;
        self.posts
            .find_by_id(&id)
            .await?
            .ok_or(DomainError::NotFound)
    }
}
