//! Profile service
//!
//! The facade in front of the relationship, post and timeline services.
//! Handles profile creation from account events, profile views, partial
//! edits and last-seen tracking itself.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::app::lookup::{parse_user_id, user_by_name};
use crate::app::post_service::PostService;
use crate::app::relationship_service::RelationshipService;
use crate::app::timeline_service::TimelineService;
use crate::app::views::{build_post_views, EditProfile, PostView, Profile, Relationships, UserInfo};
use crate::domain::entities::{Post, PostId, User, UserId};
use crate::domain::ports::{AccountEvents, PostRepository, UserRepository};
use crate::domain::validation;
use crate::error::DomainError;

/// Every operation the transport layer can reach
///
/// Inputs arrive as raw strings from decoded requests; ids are validated
/// here, not by callers.
#[async_trait]
pub trait BlogService: Send + Sync {
    /// Create a profile for a new account.
    ///
    /// Replaying an id that already has a profile is a no-op. A username or
    /// email held by a different profile is `ExistingUsername`/`ExistingEmail`.
    async fn create_profile(&self, id: &str, username: &str, email: &str)
        -> Result<(), DomainError>;

    async fn get_profile(&self, username: &str) -> Result<Profile, DomainError>;

    async fn edit_profile(&self, id: &str, edit: EditProfile) -> Result<(), DomainError>;

    async fn update_last_seen(&self, id: &str) -> Result<(), DomainError>;

    async fn create_post(&self, author_id: &str, body: &str) -> Result<PostId, DomainError>;

    async fn get_user_posts(&self, username: &str) -> Result<Vec<Post>, DomainError>;

    async fn get_post(&self, post_id: &str) -> Result<Post, DomainError>;

    async fn create_relationship(&self, actor_id: &str, username: &str)
        -> Result<(), DomainError>;

    async fn remove_relationship(&self, actor_id: &str, username: &str)
        -> Result<(), DomainError>;

    async fn list_friends(&self, username: &str) -> Result<Vec<UserInfo>, DomainError>;

    async fn list_followers(&self, username: &str) -> Result<Vec<UserInfo>, DomainError>;

    /// Does `u1` follow `u2`. Reads only the given values.
    fn is_following(&self, u1: &User, u2: &User) -> bool;

    async fn get_timeline(&self, user_id: &str) -> Result<Vec<PostView>, DomainError>;
}

/// Production implementation of `BlogService`
pub struct ProfileService<UR, PR>
where
    UR: UserRepository,
    PR: PostRepository,
{
    users: Arc<UR>,
    posts: Arc<PR>,
    relationships: RelationshipService<UR>,
    post_lifecycle: PostService<UR, PR>,
    timeline: TimelineService<UR, PR>,
}

impl<UR, PR> ProfileService<UR, PR>
where
    UR: UserRepository,
    PR: PostRepository,
{
    pub fn new(users: Arc<UR>, posts: Arc<PR>) -> Self {
        Self {
            relationships: RelationshipService::new(users.clone()),
            post_lifecycle: PostService::new(users.clone(), posts.clone()),
            timeline: TimelineService::new(users.clone(), posts.clone()),
            users,
            posts,
        }
    }

    /// Fail if another profile already holds this username or email
    async fn ensure_unclaimed(
        &self,
        id: &UserId,
        username: &str,
        email: &str,
    ) -> Result<(), DomainError> {
        if let Some(holder) = self.users.find_by_name(username).await? {
            if holder.id != *id {
                return Err(DomainError::ExistingUsername);
            }
        }
        if let Some(holder) = self.users.find_by_email(email).await? {
            if holder.id != *id {
                return Err(DomainError::ExistingEmail);
            }
        }
        Ok(())
    }

    /// Adopt a new username: trimmed, well formed, and not held by anyone else
    async fn change_username(&self, user: &mut User, requested: &str) -> Result<(), DomainError> {
        let username = requested.trim();
        if username.is_empty() {
            return Err(DomainError::InvalidUsername);
        }
        if username == user.username {
            return Ok(());
        }
        validation::validate_username(username)?;

        if let Some(holder) = self.users.find_by_name(username).await? {
            if holder.id != user.id {
                return Err(DomainError::ExistingUsername);
            }
        }

        user.username = username.to_string();
        Ok(())
    }
}

#[async_trait]
impl<UR, PR> BlogService for ProfileService<UR, PR>
where
    UR: UserRepository,
    PR: PostRepository,
{
    async fn create_profile(
        &self,
        id: &str,
        username: &str,
        email: &str,
    ) -> Result<(), DomainError> {
        let id = parse_user_id(id)?;

        if self.users.find_by_id(&id).await?.is_some() {
            tracing::debug!(user_id = %id, username, "Profile already exists, skipping");
            return Ok(());
        }
        self.ensure_unclaimed(&id, username, email).await?;

        let user = User::new(id, username, email, Utc::now());
        self.users.store(&user).await?;

        tracing::info!(user_id = %user.id, username, "Created profile");
        Ok(())
    }

    async fn get_profile(&self, username: &str) -> Result<Profile, DomainError> {
        let user = user_by_name(self.users.as_ref(), username).await?;
        let posts = self.posts.find_latest_posts_for_user(&user.id).await?;

        Ok(Profile {
            id: user.id,
            username: user.username.clone(),
            avatar: user.avatar(),
            bio: user.bio.clone(),
            joined: user.created_at,
            last_seen: user.last_seen,
            relationships: Relationships {
                followers: user.followers.len(),
                friends: user.friends.len(),
            },
            posts: build_post_views(posts, std::slice::from_ref(&user)),
        })
    }

    async fn edit_profile(&self, id: &str, edit: EditProfile) -> Result<(), DomainError> {
        let id = parse_user_id(id)?;

        if edit.is_empty() {
            return Ok(());
        }

        let mut user = self
            .users
            .find_by_id(&id)
            .await?
            .ok_or(DomainError::NotFound)?;

        if let Some(username) = edit.username.as_deref() {
            if username != user.username {
                self.change_username(&mut user, username).await?;
            }
        }

        if let Some(bio) = edit.bio.as_deref() {
            user.update_bio(bio)?;
        }

        self.users.update(&user).await?;

        tracing::debug!(user_id = %user.id, "Edited profile");
        Ok(())
    }

    async fn update_last_seen(&self, id: &str) -> Result<(), DomainError> {
        let id = parse_user_id(id).map_err(|_| DomainError::NotFound)?;

        let mut user = self
            .users
            .find_by_id(&id)
            .await?
            .ok_or(DomainError::NotFound)?;

        user.last_seen = Utc::now();
        self.users.update(&user).await
    }

    async fn create_post(&self, author_id: &str, body: &str) -> Result<PostId, DomainError> {
        self.post_lifecycle.create_post(author_id, body).await
    }

    async fn get_user_posts(&self, username: &str) -> Result<Vec<Post>, DomainError> {
        self.post_lifecycle.get_user_posts(username).await
    }

    async fn get_post(&self, post_id: &str) -> Result<Post, DomainError> {
        self.post_lifecycle.get_post(post_id).await
    }

    async fn create_relationship(
        &self,
        actor_id: &str,
        username: &str,
    ) -> Result<(), DomainError> {
        self.relationships
            .create_relationship(actor_id, username)
            .await
    }

    async fn remove_relationship(
        &self,
        actor_id: &str,
        username: &str,
    ) -> Result<(), DomainError> {
        self.relationships
            .remove_relationship(actor_id, username)
            .await
    }

    async fn list_friends(&self, username: &str) -> Result<Vec<UserInfo>, DomainError> {
        self.relationships.list_friends(username).await
    }

    async fn list_followers(&self, username: &str) -> Result<Vec<UserInfo>, DomainError> {
        self.relationships.list_followers(username).await
    }

    fn is_following(&self, u1: &User, u2: &User) -> bool {
        RelationshipService::<UR>::is_following(u1, u2)
    }

    async fn get_timeline(&self, user_id: &str) -> Result<Vec<PostView>, DomainError> {
        self.timeline.get_timeline(user_id).await
    }
}

/// Turns account-created notifications into profiles
pub struct AccountCreatedHandler<S>
where
    S: BlogService + ?Sized,
{
    service: Arc<S>,
}

impl<S> AccountCreatedHandler<S>
where
    S: BlogService + ?Sized,
{
    pub fn new(service: Arc<S>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<S> AccountEvents for AccountCreatedHandler<S>
where
    S: BlogService + ?Sized,
{
    async fn account_created(
        &self,
        id: &str,
        username: &str,
        email: &str,
    ) -> Result<(), DomainError> {
        let result = self.service.create_profile(id, username, email).await;
        match &result {
            Err(e) if e.is_infrastructure() => {
                tracing::error!(user_id = id, username, error = %e, "Failed to create profile for new account")
            }
            Err(e) => {
                tracing::warn!(user_id = id, username, error = %e, "Refused profile for new account")
            }
            Ok(()) => {}
        }
        result
    }
}
