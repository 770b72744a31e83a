//! Post domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::UserId;
use crate::error::DomainError;

/// Unique identifier for a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostId(pub Uuid);

impl PostId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for PostId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for PostId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PostId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| DomainError::InvalidId)
    }
}

/// An authored message. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub author_id: UserId,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Build a post stamped with a fresh id and the current time
    pub fn new(author_id: UserId, body: &str) -> Result<Self, DomainError> {
        if body.is_empty() {
            return Err(DomainError::EmptyBody);
        }

        Ok(Self {
            id: PostId::new(),
            author_id,
            body: body.to_string(),
            created_at: Utc::now(),
        })
    }
}

/// Order posts newest-first.
///
/// The sort is stable, so posts with equal timestamps keep the relative order
/// the caller passed in.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn new_post_rejects_empty_body() {
        assert_eq!(Post::new(UserId::new(), ""), Err(DomainError::EmptyBody));
    }

    #[test]
    fn new_post_keeps_body_verbatim() {
        let author = UserId::new();
        let post = Post::new(author, " hi ").unwrap();
        assert_eq!(post.body, " hi ");
        assert_eq!(post.author_id, author);
    }

    #[test]
    fn new_posts_get_distinct_ids() {
        let author = UserId::new();
        let a = Post::new(author, "a").unwrap();
        let b = Post::new(author, "b").unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn sort_newest_first_is_stable_on_ties() {
        let author = UserId::new();
        let now = Utc::now();
        let mut posts: Vec<Post> = ["old", "tie-1", "tie-2", "new"]
            .iter()
            .map(|body| Post::new(author, body).unwrap())
            .collect();
        posts[0].created_at = now - Duration::seconds(10);
        posts[1].created_at = now;
        posts[2].created_at = now;
        posts[3].created_at = now + Duration::seconds(10);

        sort_newest_first(&mut posts);

        let bodies: Vec<&str> = posts.iter().map(|p| p.body.as_str()).collect();
        assert_eq!(bodies, vec!["new", "tie-1", "tie-2", "old"]);
    }
}
