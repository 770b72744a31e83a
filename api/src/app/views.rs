//! Read projections and request shapes
//!
//! Plain data handed across the service boundary. Nothing here is persisted.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Post, PostId, User, UserId};

/// Follow counts shown on a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Relationships {
    pub followers: usize,
    #[serde(rename = "following")]
    pub friends: usize,
}

/// A user's public profile with their own posts, newest first
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub id: UserId,
    pub username: String,
    #[serde(rename = "avatar_url")]
    pub avatar: String,
    pub bio: String,
    pub joined: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    pub relationships: Relationships,
    pub posts: Vec<PostView>,
}

/// Display fields of a post's author
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorView {
    pub user_id: UserId,
    pub username: String,
    pub avatar: String,
}

impl From<&User> for AuthorView {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            avatar: user.avatar(),
        }
    }
}

/// A post enriched with its author's display fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostView {
    pub id: PostId,
    pub body: String,
    pub timestamp: DateTime<Utc>,
    pub author: AuthorView,
}

impl PostView {
    pub fn new(post: Post, author: AuthorView) -> Self {
        Self {
            id: post.id,
            body: post.body,
            timestamp: post.created_at,
            author,
        }
    }
}

/// Entry in a friends or followers list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserInfo {
    pub id: UserId,
    pub username: String,
    #[serde(rename = "avatar_url")]
    pub avatar: String,
    pub bio: String,
    pub joined: DateTime<Utc>,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            avatar: user.avatar(),
            bio: user.bio.clone(),
            joined: user.created_at,
        }
    }
}

/// Partial profile edit
///
/// `None` leaves a field untouched. `Some("")` clears the bio and is
/// rejected for the username.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EditProfile {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

impl EditProfile {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.bio.is_none()
    }
}

/// Attach author display fields to each post.
///
/// Posts whose author is missing from `authors` are dropped; an author
/// deleted after posting has nothing to display.
pub fn build_post_views(posts: Vec<Post>, authors: &[User]) -> Vec<PostView> {
    let by_id: HashMap<UserId, AuthorView> = authors
        .iter()
        .map(|u| (u.id, AuthorView::from(u)))
        .collect();

    posts
        .into_iter()
        .filter_map(|post| {
            let author = by_id.get(&post.author_id)?.clone();
            Some(PostView::new(post, author))
        })
        .collect()
}
