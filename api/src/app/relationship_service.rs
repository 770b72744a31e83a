//! Relationship service
//!
//! Maintains the follow graph. An edge A -> B lives in two places, B in
//! `A.friends` and A in `B.followers`, so every mutation is two writes:
//! actor first, then target. If the target write fails the actor write is
//! undone with a compensating write before the error is returned.

use std::sync::Arc;

use crate::app::lookup::{parse_user_id, user_by_name};
use crate::app::views::UserInfo;
use crate::domain::entities::{User, UserId};
use crate::domain::ports::UserRepository;
use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeChange {
    Follow,
    Unfollow,
}

/// Service for follow/unfollow and relationship listings
pub struct RelationshipService<UR>
where
    UR: UserRepository,
{
    users: Arc<UR>,
}

impl<UR> RelationshipService<UR>
where
    UR: UserRepository,
{
    pub fn new(users: Arc<UR>) -> Self {
        Self { users }
    }

    /// Pure membership check: does `u1` follow `u2`
    pub fn is_following(u1: &User, u2: &User) -> bool {
        u1.is_following(u2)
    }

    /// Make the user `actor_id` follow `target_username`
    pub async fn create_relationship(
        &self,
        actor_id: &str,
        target_username: &str,
    ) -> Result<(), DomainError> {
        let (mut actor, mut target) = self.resolve_pair(actor_id, target_username).await?;

        if actor.id == target.id {
            return Err(DomainError::CantFollowSelf);
        }

        if Self::edge_present(&actor, &target) {
            return Err(DomainError::AlreadyFollowing);
        }

        actor.follow(&mut target);
        self.persist_pair(&actor, &target, EdgeChange::Follow).await?;

        tracing::info!(actor_id = %actor.id, target_id = %target.id, "Created relationship");
        Ok(())
    }

    /// Remove the edge `actor_id` -> `target_username`
    pub async fn remove_relationship(
        &self,
        actor_id: &str,
        target_username: &str,
    ) -> Result<(), DomainError> {
        let (mut actor, mut target) = self.resolve_pair(actor_id, target_username).await?;

        if actor.id == target.id {
            return Err(DomainError::CantUnfollowSelf);
        }

        if !Self::edge_present(&actor, &target) {
            return Err(DomainError::NotFollowing);
        }

        actor.unfollow(&mut target);
        self.persist_pair(&actor, &target, EdgeChange::Unfollow).await?;

        tracing::info!(actor_id = %actor.id, target_id = %target.id, "Removed relationship");
        Ok(())
    }

    /// Accounts `username` follows
    pub async fn list_friends(&self, username: &str) -> Result<Vec<UserInfo>, DomainError> {
        let user = user_by_name(self.users.as_ref(), username).await?;
        self.user_infos(&user.friends).await
    }

    /// Accounts following `username`
    pub async fn list_followers(&self, username: &str) -> Result<Vec<UserInfo>, DomainError> {
        let user = user_by_name(self.users.as_ref(), username).await?;
        self.user_infos(&user.followers).await
    }

    async fn user_infos(&self, ids: &[UserId]) -> Result<Vec<UserInfo>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let users = self.users.find_by_ids(ids).await?;
        Ok(users.iter().map(UserInfo::from).collect())
    }

    /// The edge counts as present if either side records it, so a
    /// half-written edge can still be removed.
    fn edge_present(actor: &User, target: &User) -> bool {
        Self::is_following(actor, target) || target.followers.contains(&actor.id)
    }

    async fn resolve_pair(
        &self,
        actor_id: &str,
        target_username: &str,
    ) -> Result<(User, User), DomainError> {
        let actor_id = parse_user_id(actor_id)?;
        if target_username.is_empty() {
            return Err(DomainError::InvalidUsername);
        }

        let actor = self
            .users
            .find_by_id(&actor_id)
            .await?
            .ok_or(DomainError::NotFound)?;
        let target = user_by_name(self.users.as_ref(), target_username).await?;
        Ok((actor, target))
    }

    async fn persist_pair(
        &self,
        actor: &User,
        target: &User,
        change: EdgeChange,
    ) -> Result<(), DomainError> {
        self.users.update(actor).await?;

        if let Err(e) = self.users.update(target).await {
            tracing::error!(
                actor_id = %actor.id,
                target_id = %target.id,
                error = %e,
                "Target write failed, reverting actor side of relationship"
            );

            if let Err(revert_err) = self.revert_actor(&actor.id, &target.id, change).await {
                tracing::error!(
                    actor_id = %actor.id,
                    target_id = %target.id,
                    error = %revert_err,
                    "Revert failed, follow edge is asymmetric"
                );
            }

            return Err(e);
        }

        Ok(())
    }

    /// Undo only the actor's half of the edge on a fresh read, so concurrent
    /// edits to other fields survive.
    async fn revert_actor(
        &self,
        actor_id: &UserId,
        target_id: &UserId,
        change: EdgeChange,
    ) -> Result<(), DomainError> {
        let Some(mut actor) = self.users.find_by_id(actor_id).await? else {
            return Ok(());
        };

        match change {
            EdgeChange::Follow => actor.friends.retain(|id| id != target_id),
            EdgeChange::Unfollow => {
                if !actor.friends.contains(target_id) {
                    actor.friends.push(*target_id);
                }
            }
        }

        self.users.update(&actor).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryUserRepository;
    use crate::test_utils::{test_user_named, FailingUserRepository};

    type Service = RelationshipService<InMemoryUserRepository>;

    async fn setup(names: &[&str]) -> (Service, Arc<InMemoryUserRepository>, Vec<User>) {
        let repo = Arc::new(InMemoryUserRepository::new());
        let mut users = Vec::new();
        for name in names {
            let user = test_user_named(name);
            repo.store(&user).await.unwrap();
            users.push(user);
        }
        (RelationshipService::new(repo.clone()), repo, users)
    }

    async fn reload(repo: &InMemoryUserRepository, user: &User) -> User {
        repo.find_by_id(&user.id).await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn follow_then_unfollow() {
        let (service, repo, users) = setup(&["alice", "bob"]).await;
        let (alice, bob) = (&users[0], &users[1]);

        service
            .create_relationship(&alice.id.to_string(), "bob")
            .await
            .unwrap();

        let a = reload(&repo, alice).await;
        let b = reload(&repo, bob).await;
        assert!(Service::is_following(&a, &b));
        assert_eq!(a.friends.len(), 1);
        assert_eq!(b.followers.len(), 1);
        assert!(a.followers.is_empty());
        assert!(b.friends.is_empty());

        service
            .remove_relationship(&alice.id.to_string(), "bob")
            .await
            .unwrap();

        let a = reload(&repo, alice).await;
        let b = reload(&repo, bob).await;
        assert!(!Service::is_following(&a, &b));
        assert!(a.friends.is_empty());
        assert!(b.followers.is_empty());
    }

    #[tokio::test]
    async fn duplicate_follow_and_unfollow_conflict() {
        let (service, _, users) = setup(&["U1", "U2"]).await;
        let id = users[0].id.to_string();

        service.create_relationship(&id, "U2").await.unwrap();
        assert_eq!(
            service.create_relationship(&id, "U2").await,
            Err(DomainError::AlreadyFollowing)
        );

        service.remove_relationship(&id, "U2").await.unwrap();
        assert_eq!(
            service.remove_relationship(&id, "U2").await,
            Err(DomainError::NotFollowing)
        );
    }

    #[tokio::test]
    async fn cannot_follow_or_unfollow_self() {
        let (service, repo, users) = setup(&["alice", "bob"]).await;
        let id = users[0].id.to_string();

        assert_eq!(
            service.create_relationship(&id, "alice").await,
            Err(DomainError::CantFollowSelf)
        );

        service.create_relationship(&id, "bob").await.unwrap();
        assert_eq!(
            service.create_relationship(&id, "alice").await,
            Err(DomainError::CantFollowSelf)
        );
        assert_eq!(
            service.remove_relationship(&id, "alice").await,
            Err(DomainError::CantUnfollowSelf)
        );

        let alice = reload(&repo, &users[0]).await;
        assert!(!alice.friends.contains(&alice.id));
    }

    #[tokio::test]
    async fn input_validation_order() {
        let (service, _, users) = setup(&["alice"]).await;
        let id = users[0].id.to_string();

        assert_eq!(
            service.create_relationship("bad-id", "alice").await,
            Err(DomainError::InvalidId)
        );
        assert_eq!(
            service.create_relationship(&id, "").await,
            Err(DomainError::InvalidUsername)
        );
        assert_eq!(
            service
                .create_relationship(&UserId::new().to_string(), "alice")
                .await,
            Err(DomainError::NotFound)
        );
        assert_eq!(
            service.create_relationship(&id, "nobody").await,
            Err(DomainError::NotFound)
        );
        assert_eq!(
            service.remove_relationship("bad-id", "alice").await,
            Err(DomainError::InvalidId)
        );
    }

    #[tokio::test]
    async fn list_friends_and_followers() {
        let (service, _, users) = setup(&["alice", "bob", "carol"]).await;
        let alice_id = users[0].id.to_string();
        let carol_id = users[2].id.to_string();

        service.create_relationship(&alice_id, "bob").await.unwrap();
        service.create_relationship(&alice_id, "carol").await.unwrap();
        service.create_relationship(&carol_id, "bob").await.unwrap();

        let friends = service.list_friends("alice").await.unwrap();
        let names: Vec<&str> = friends.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["bob", "carol"]);

        let followers = service.list_followers("bob").await.unwrap();
        assert_eq!(followers.len(), 2);
        assert_eq!(followers[0].avatar, users[0].avatar());
        assert_eq!(followers[0].joined, users[0].created_at);

        assert!(service.list_followers("alice").await.unwrap().is_empty());
        assert!(service.list_friends("bob").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_errors() {
        let (service, _, _) = setup(&["alice"]).await;
        assert_eq!(
            service.list_friends("").await,
            Err(DomainError::InvalidUsername)
        );
        assert_eq!(
            service.list_followers("ghost").await,
            Err(DomainError::NotFound)
        );
    }

    #[tokio::test]
    async fn failed_target_write_reverts_actor() {
        let inner = InMemoryUserRepository::new();
        let alice = test_user_named("alice");
        let bob = test_user_named("bob");
        inner.store(&alice).await.unwrap();
        inner.store(&bob).await.unwrap();

        let repo =
            Arc::new(FailingUserRepository::new(inner.clone()).failing_updates_for(bob.id));
        let service = RelationshipService::new(repo);

        let result = service
            .create_relationship(&alice.id.to_string(), "bob")
            .await;

        assert!(matches!(result, Err(DomainError::Database(_))));
        let a = reload(&inner, &alice).await;
        let b = reload(&inner, &bob).await;
        assert!(a.friends.is_empty());
        assert!(b.followers.is_empty());
    }

    #[tokio::test]
    async fn half_written_edge_can_be_removed() {
        let (service, repo, users) = setup(&["alice", "bob"]).await;
        let mut alice = users[0].clone();
        alice.friends.push(users[1].id);
        repo.update(&alice).await.unwrap();

        assert_eq!(
            service
                .create_relationship(&alice.id.to_string(), "bob")
                .await,
            Err(DomainError::AlreadyFollowing)
        );

        service
            .remove_relationship(&alice.id.to_string(), "bob")
            .await
            .unwrap();

        assert!(reload(&repo, &alice).await.friends.is_empty());
        assert!(reload(&repo, &users[1]).await.followers.is_empty());
    }
}
