//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use chrono::{DateTime, Utc};

use crate::domain::entities::{Post, PostId, User, UserId};

/// Create a test user with default values
pub fn test_user() -> User {
    test_user_named("test_user")
}

/// Create a test user with a specific username and a matching email
pub fn test_user_named(username: &str) -> User {
    User::new(
        UserId::new(),
        username,
        &format!("{}@app.com", username.to_lowercase()),
        Utc::now(),
    )
}

/// Create a post with an explicit timestamp
pub fn test_post_at(author_id: UserId, body: &str, at: DateTime<Utc>) -> Post {
    Post {
        id: PostId::new(),
        author_id,
        body: body.to_string(),
        created_at: at,
    }
}
