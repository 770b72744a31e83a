//! Unified error types for the microblog API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Business rule violations and opaque storage failures
//! - `AppError`: Application layer errors (wraps domain errors for HTTP responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Domain layer errors
///
/// Every variant except `Database` and `Internal` is a deterministic business
/// rule; callers can match on the kind without parsing messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("invalid username")]
    InvalidUsername,

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid password")]
    InvalidPassword,

    #[error("invalid id")]
    InvalidId,

    #[error("bio cannot be more than 140 characters")]
    BioTooLong,

    #[error("post body cannot be empty")]
    EmptyBody,

    #[error("not found")]
    NotFound,

    #[error("username in use")]
    ExistingUsername,

    #[error("email in use")]
    ExistingEmail,

    #[error("already following user")]
    AlreadyFollowing,

    #[error("not following user")]
    NotFollowing,

    #[error("can't follow yourself")]
    CantFollowSelf,

    #[error("can't unfollow yourself")]
    CantUnfollowSelf,

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// True for failures that come from infrastructure rather than business rules
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, DomainError::Database(_) | DomainError::Internal(_))
    }
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl AppError {
    fn status_and_body(&self) -> (StatusCode, &'static str, Option<String>) {
        match self {
            AppError::Domain(e) => match e {
                DomainError::InvalidUsername
                | DomainError::InvalidEmail
                | DomainError::InvalidPassword
                | DomainError::InvalidId
                | DomainError::BioTooLong
                | DomainError::EmptyBody => {
                    (StatusCode::BAD_REQUEST, "Validation error", Some(e.to_string()))
                }
                DomainError::CantFollowSelf | DomainError::CantUnfollowSelf => {
                    (StatusCode::BAD_REQUEST, "Bad request", Some(e.to_string()))
                }
                DomainError::NotFound => (StatusCode::NOT_FOUND, "Not found", None),
                DomainError::ExistingUsername
                | DomainError::ExistingEmail
                | DomainError::AlreadyFollowing
                | DomainError::NotFollowing => {
                    (StatusCode::CONFLICT, "Conflict", Some(e.to_string()))
                }
                DomainError::InvalidCredentials => {
                    (StatusCode::UNAUTHORIZED, "Unauthorized", Some(e.to_string()))
                }
                DomainError::Database(msg) => {
                    tracing::error!("Database error: {}", msg);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error",
                        None,
                    )
                }
                DomainError::Internal(msg) => {
                    tracing::error!("Internal error: {}", msg);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error",
                        None,
                    )
                }
            },
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "Bad request", Some(msg.clone()))
            }
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized", None),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = self.status_and_body();

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}
