//! User handlers
//!
//! Profiles, profile edits and the follow graph.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};

use super::json_body;
use crate::app::{EditProfile, Profile, UserInfo};
use crate::auth::AuthUser;
use crate::error::AppError;
use crate::AppState;

/// GET /v1/users/:username
pub async fn get_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Profile>, AppError> {
    let profile = state.blog.get_profile(&username).await?;
    Ok(Json(profile))
}

/// PATCH /v1/users
///
/// Edit the authenticated user's username and/or bio. Absent fields are
/// left untouched.
pub async fn edit_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<EditProfile>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let edit = json_body(payload)?;
    state.blog.edit_profile(&user.id.to_string(), edit).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /v1/users/:username/friends
pub async fn list_friends(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Vec<UserInfo>>, AppError> {
    let friends = state.blog.list_friends(&username).await?;
    Ok(Json(friends))
}

/// GET /v1/users/:username/followers
pub async fn list_followers(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Vec<UserInfo>>, AppError> {
    let followers = state.blog.list_followers(&username).await?;
    Ok(Json(followers))
}

/// POST /v1/users/:username/followers
///
/// Follow `username` as the authenticated user.
pub async fn follow(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(username): Path<String>,
) -> Result<StatusCode, AppError> {
    state
        .blog
        .create_relationship(&user.id.to_string(), &username)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /v1/users/:username/followers
///
/// Stop following `username`.
pub async fn unfollow(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(username): Path<String>,
) -> Result<StatusCode, AppError> {
    state
        .blog
        .remove_relationship(&user.id.to_string(), &username)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
