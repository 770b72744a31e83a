//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod accounts;
pub mod posts;
pub mod users;

use axum::{extract::rejection::JsonRejection, Json};

use crate::error::AppError;

pub use accounts::{login, register};
pub use posts::{create_post, get_post, get_timeline};
pub use users::{edit_profile, follow, get_profile, list_followers, list_friends, unfollow};

/// Unwrap a JSON body, reporting decode failures in the API's error shape
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| AppError::BadRequest(e.body_text()))
}
