//! Shared user resolution
//!
//! Every service resolves its inputs the same way: reject malformed input
//! before touching storage, then map a missing record to `NotFound`.

use crate::domain::entities::{User, UserId};
use crate::domain::ports::UserRepository;
use crate::domain::validation;
use crate::error::DomainError;

/// Parse a raw id, failing `InvalidId` when it is not well formed
pub fn parse_user_id(id: &str) -> Result<UserId, DomainError> {
    if !validation::is_well_formed_id(id) {
        return Err(DomainError::InvalidId);
    }
    id.parse()
}

/// Resolve a user from a raw id: `InvalidId`, then `NotFound`
pub async fn user_by_id<UR>(users: &UR, id: &str) -> Result<User, DomainError>
where
    UR: UserRepository + ?Sized,
{
    let id = parse_user_id(id)?;
    users.find_by_id(&id).await?.ok_or(DomainError::NotFound)
}

/// Resolve a user from a username: `InvalidUsername` when empty, then `NotFound`
pub async fn user_by_name<UR>(users: &UR, username: &str) -> Result<User, DomainError>
where
    UR: UserRepository + ?Sized,
{
    if username.is_empty() {
        return Err(DomainError::InvalidUsername);
    }
    users
        .find_by_name(username)
        .await?
        .ok_or(DomainError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryUserRepository;
    use crate::test_utils::test_user_named;

    #[tokio::test]
    async fn user_by_id_checks_shape_before_lookup() {
        let repo = InMemoryUserRepository::new();
        assert_eq!(user_by_id(&repo, "garbage").await, Err(DomainError::InvalidId));
        assert_eq!(
            user_by_id(&repo, &UserId::new().to_string()).await,
            Err(DomainError::NotFound)
        );
    }

    #[tokio::test]
    async fn user_by_name_resolves() {
        let alice = test_user_named("alice");
        let repo = InMemoryUserRepository::new().with_user(alice.clone());

        assert_eq!(user_by_name(&repo, "alice").await, Ok(alice));
        assert_eq!(user_by_name(&repo, "").await, Err(DomainError::InvalidUsername));
        assert_eq!(user_by_name(&repo, "bob").await, Err(DomainError::NotFound));
    }
}
