//! User domain entity
//!
//! A user's identity plus its side of the follow graph.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::validation;
use crate::error::DomainError;

/// Unique identifier for a user
///
/// UUIDv7: time-ordered but not sequential. Ids are minted by the account
/// context and handed to the profile side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| DomainError::InvalidId)
    }
}

/// A registered user and its follow edges
///
/// `friends` are the accounts this user follows, `followers` the accounts
/// following it. An edge A -> B is stored on both sides: B in A.friends and
/// A in B.followers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub bio: String,
    pub created_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    pub friends: Vec<UserId>,
    pub followers: Vec<UserId>,
}

impl User {
    /// A fresh user with no bio and no edges; `now` is both joined and last-seen time
    pub fn new(id: UserId, username: &str, email: &str, now: DateTime<Utc>) -> Self {
        Self {
            id,
            username: username.to_string(),
            email: email.to_string(),
            bio: String::new(),
            created_at: now,
            last_seen: now,
            friends: Vec::new(),
            followers: Vec::new(),
        }
    }

    /// Whether this user follows `other`
    pub fn is_following(&self, other: &User) -> bool {
        self.friends.contains(&other.id)
    }

    /// Add the edge self -> other on both aggregates.
    ///
    /// Callers check `is_following` and self-reference first; this only
    /// refuses to insert duplicates.
    pub fn follow(&mut self, other: &mut User) {
        if !self.friends.contains(&other.id) {
            self.friends.push(other.id);
        }
        if !other.followers.contains(&self.id) {
            other.followers.push(self.id);
        }
    }

    /// Remove the edge self -> other on both aggregates
    pub fn unfollow(&mut self, other: &mut User) {
        self.friends.retain(|id| *id != other.id);
        other.followers.retain(|id| *id != self.id);
    }

    /// Replace the bio with its trimmed form, or fail if it is too long
    pub fn update_bio(&mut self, bio: &str) -> Result<(), DomainError> {
        self.bio = validation::validate_bio(bio)?;
        Ok(())
    }

    /// Gravatar URL for this user's email
    pub fn avatar(&self) -> String {
        validation::avatar(&self.email)
    }
}
