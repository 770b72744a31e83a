//! Identity and input validation
//!
//! Pure shape checks shared by the account context and the profile services.
//! None of these touch storage.

use std::sync::OnceLock;

use regex::Regex;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::DomainError;

pub const MAX_USERNAME_LEN: usize = 24;
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_BIO_LEN: usize = 140;

fn username_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"^\w{{1,{}}}$", MAX_USERNAME_LEN)).expect("username pattern is valid")
    })
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern is valid"))
}

/// 1-24 word characters (letters, digits, underscore)
pub fn validate_username(username: &str) -> Result<(), DomainError> {
    if username_regex().is_match(username) {
        Ok(())
    } else {
        Err(DomainError::InvalidUsername)
    }
}

/// Minimal `local@domain.tld` shape
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    if email_regex().is_match(email) {
        Ok(())
    } else {
        Err(DomainError::InvalidEmail)
    }
}

pub fn validate_password(password: &str) -> Result<(), DomainError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(DomainError::InvalidPassword);
    }
    Ok(())
}

/// Returns the trimmed bio, counted in characters rather than bytes
pub fn validate_bio(bio: &str) -> Result<String, DomainError> {
    let trimmed = bio.trim();
    if trimmed.chars().count() > MAX_BIO_LEN {
        return Err(DomainError::BioTooLong);
    }
    Ok(trimmed.to_string())
}

/// Structural id check, used to skip storage lookups for garbage input
pub fn is_well_formed_id(id: &str) -> bool {
    Uuid::parse_str(id).is_ok()
}

/// Gravatar URL derived from the normalized email
pub fn avatar(email: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(email.trim().to_lowercase().as_bytes());
    format!(
        "https://www.gravatar.com/avatar/{}?d=identicon",
        hex::encode(hasher.finalize())
    )
}
