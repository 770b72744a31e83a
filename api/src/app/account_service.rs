//! Account service
//!
//! Registration and credential checks. Owns the password hash; the profile
//! side only hears about new accounts through `AccountEvents`.

use std::sync::Arc;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use async_trait::async_trait;
use chrono::Utc;

use crate::domain::entities::{Account, UserId};
use crate::domain::ports::{AccountEvents, AccountRepository};
use crate::domain::validation;
use crate::error::DomainError;

/// Account operations reachable from the transport layer
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account and announce it. Returns the new id.
    ///
    /// If a subscriber refuses the account it is removed again and the
    /// subscriber's error is returned.
    async fn register_account(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserId, DomainError>;

    /// Id of the account matching these credentials
    async fn validate_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<UserId, DomainError>;
}

/// Production implementation of `AuthService`
pub struct AccountService<AR, E>
where
    AR: AccountRepository,
    E: AccountEvents + ?Sized,
{
    accounts: Arc<AR>,
    events: Arc<E>,
}

impl<AR, E> AccountService<AR, E>
where
    AR: AccountRepository,
    E: AccountEvents + ?Sized,
{
    pub fn new(accounts: Arc<AR>, events: Arc<E>) -> Self {
        Self { accounts, events }
    }

    /// Remove an account the profile side refused
    async fn discard(&self, id: &UserId) {
        if let Err(e) = self.accounts.delete(id).await {
            tracing::error!(user_id = %id, error = %e, "Failed to remove refused account");
        }
    }
}

#[async_trait]
impl<AR, E> AuthService for AccountService<AR, E>
where
    AR: AccountRepository,
    E: AccountEvents + ?Sized,
{
    async fn register_account(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserId, DomainError> {
        validation::validate_username(username)?;
        validation::validate_email(email)?;
        validation::validate_password(password)?;

        if self.accounts.find_by_name(username).await?.is_some() {
            return Err(DomainError::ExistingUsername);
        }
        if self.accounts.find_by_email(email).await?.is_some() {
            return Err(DomainError::ExistingEmail);
        }

        let account = Account {
            id: UserId::new(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: hash_password(password)?,
            created_at: Utc::now(),
        };
        self.accounts.store(&account).await?;

        if let Err(e) = self
            .events
            .account_created(&account.id.to_string(), &account.username, &account.email)
            .await
        {
            self.discard(&account.id).await;
            return Err(e);
        }

        tracing::info!(user_id = %account.id, username, "Registered account");
        Ok(account.id)
    }

    async fn validate_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<UserId, DomainError> {
        let Some(account) = self.accounts.find_by_name(username).await? else {
            tracing::debug!(username, "Login for unknown account");
            return Err(DomainError::InvalidCredentials);
        };

        if !verify_password(password, &account.password_hash) {
            tracing::debug!(user_id = %account.id, "Login with wrong password");
            return Err(DomainError::InvalidCredentials);
        }

        Ok(account.id)
    }
}

/// Hash a password with argon2id and a random salt, as a PHC string
pub fn hash_password(password: &str) -> Result<String, DomainError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| DomainError::Internal(format!("password hashing failed: {}", e)))
}

/// Check a password against a stored PHC string. Unparseable hashes never match.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
