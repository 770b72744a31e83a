//! Timeline service
//!
//! A user's timeline is their own posts merged with the posts of everyone
//! they follow, newest first. No ranking, no paging.

use std::collections::HashSet;
use std::sync::Arc;

use crate::app::lookup::user_by_id;
use crate::app::views::{build_post_views, PostView};
use crate::domain::entities::{sort_newest_first, UserId};
use crate::domain::ports::{PostRepository, UserRepository};
use crate::error::DomainError;

/// Service assembling timelines
pub struct TimelineService<UR, PR>
where
    UR: UserRepository,
    PR: PostRepository,
{
    users: Arc<UR>,
    posts: Arc<PR>,
}

impl<UR, PR> TimelineService<UR, PR>
where
    UR: UserRepository,
    PR: PostRepository,
{
    pub fn new(users: Arc<UR>, posts: Arc<PR>) -> Self {
        Self { users, posts }
    }

    /// Timeline for `user_id`, each post attributed to its own author
    pub async fn get_timeline(&self, user_id: &str) -> Result<Vec<PostView>, DomainError> {
        let user = user_by_id(self.users.as_ref(), user_id).await?;

        let mut posts = self
            .posts
            .find_latest_posts_for_user_and_friends(&user)
            .await?;
        // Not every backend sorts the merged set.
        sort_newest_first(&mut posts);

        let mut seen = HashSet::new();
        let author_ids: Vec<UserId> = posts
            .iter()
            .map(|p| p.author_id)
            .filter(|id| seen.insert(*id))
            .collect();
        let authors = self.users.find_by_ids(&author_ids).await?;

        tracing::debug!(
            user_id = %user.id,
            posts = posts.len(),
            authors = authors.len(),
            "Assembled timeline"
        );

        Ok(build_post_views(posts, &authors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryPostRepository, InMemoryUserRepository};
    use crate::test_utils::{test_post_at, test_user_named};
    use chrono::{Duration, Utc};

    fn create_service(
        users: InMemoryUserRepository,
        posts: InMemoryPostRepository,
    ) -> TimelineService<InMemoryUserRepository, InMemoryPostRepository> {
        TimelineService::new(Arc::new(users), Arc::new(posts))
    }

    #[tokio::test]
    async fn timeline_merges_own_and_followed_posts() {
        let mut me = test_user_named("me");
        let mut f1 = test_user_named("f1");
        let mut f2 = test_user_named("f2");
        let stranger = test_user_named("stranger");
        me.follow(&mut f1);
        me.follow(&mut f2);

        let now = Utc::now();
        let posts = InMemoryPostRepository::new()
            .with_post(test_post_at(f1.id, "P1", now - Duration::seconds(30)))
            .with_post(test_post_at(me.id, "P2", now - Duration::seconds(20)))
            .with_post(test_post_at(stranger.id, "nope", now - Duration::seconds(15)))
            .with_post(test_post_at(f2.id, "P3", now - Duration::seconds(10)));
        let users = InMemoryUserRepository::new()
            .with_user(me.clone())
            .with_user(f1.clone())
            .with_user(f2.clone())
            .with_user(stranger);

        let service = create_service(users, posts);
        let timeline = service.get_timeline(&me.id.to_string()).await.unwrap();

        let bodies: Vec<&str> = timeline.iter().map(|p| p.body.as_str()).collect();
        assert_eq!(bodies, vec!["P3", "P2", "P1"]);
        assert!(timeline
            .windows(2)
            .all(|w| w[0].timestamp >= w[1].timestamp));

        assert_eq!(timeline[0].author.username, "f2");
        assert_eq!(timeline[1].author.username, "me");
        assert_eq!(timeline[2].author.username, "f1");
        assert_eq!(timeline[2].author.avatar, f1.avatar());
    }

    #[tokio::test]
    async fn timeline_without_follows_shows_own_posts() {
        let me = test_user_named("me");
        let posts = InMemoryPostRepository::new().with_post(test_post_at(
            me.id,
            "solo",
            Utc::now(),
        ));
        let service = create_service(InMemoryUserRepository::new().with_user(me.clone()), posts);

        let timeline = service.get_timeline(&me.id.to_string()).await.unwrap();
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[0].author.user_id, me.id);
    }

    #[tokio::test]
    async fn timeline_empty() {
        let me = test_user_named("me");
        let service = create_service(
            InMemoryUserRepository::new().with_user(me.clone()),
            InMemoryPostRepository::new(),
        );

        assert!(service
            .get_timeline(&me.id.to_string())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn timeline_errors() {
        let service = create_service(InMemoryUserRepository::new(), InMemoryPostRepository::new());

        assert_eq!(
            service.get_timeline("xyz").await,
            Err(DomainError::InvalidId)
        );
        assert_eq!(
            service.get_timeline(&UserId::new().to_string()).await,
            Err(DomainError::NotFound)
        );
    }
}
