//! Session tokens
//!
//! HS256 JWTs whose subject is the account's user id.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::entities::UserId;
use crate::error::AppError;

/// Token payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// Issued at (unix timestamp)
    pub iat: i64,
    /// Expiration (unix timestamp)
    pub exp: i64,
}

/// Issues and verifies session tokens
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(signing_key: &str, ttl_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(signing_key.as_bytes()),
            decoding_key: DecodingKey::from_secret(signing_key.as_bytes()),
            validation: Validation::default(),
            ttl_secs,
        }
    }

    /// Signed token for `user_id`
    pub fn issue(&self, user_id: &UserId) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + self.ttl_secs,
        };

        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("token signing failed: {}", e)))
    }

    /// User id carried by a valid, unexpired token
    pub fn verify(&self, token: &str) -> Result<UserId, AppError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected session token");
                AppError::Unauthorized
            })?;

        data.claims.sub.parse().map_err(|_| AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_and_verify() {
        let tokens = TokenService::new("test-key", 3600);
        let id = UserId::new();

        let token = tokens.issue(&id).unwrap();
        assert_eq!(tokens.verify(&token).unwrap(), id);
    }

    #[test]
    fn wrong_key_is_rejected() {
        let token = TokenService::new("key-a", 3600).issue(&UserId::new()).unwrap();
        assert!(matches!(
            TokenService::new("key-b", 3600).verify(&token),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        // Past the default 60s leeway
        let tokens = TokenService::new("test-key", -120);
        let token = tokens.issue(&UserId::new()).unwrap();
        assert!(matches!(tokens.verify(&token), Err(AppError::Unauthorized)));
    }

    #[test]
    fn garbage_is_rejected() {
        let tokens = TokenService::new("test-key", 3600);
        assert!(matches!(
            tokens.verify("not.a.token"),
            Err(AppError::Unauthorized)
        ));
    }
}
