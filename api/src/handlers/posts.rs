//! Post handlers
//!
//! Publishing, single-post reads and the caller's timeline.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::json_body;
use crate::app::PostView;
use crate::auth::AuthUser;
use crate::domain::entities::Post;
use crate::error::AppError;
use crate::AppState;

/// Request body for publishing a post
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub body: String,
}

/// Response body for a newly published post
#[derive(Debug, Serialize)]
pub struct CreatePostResponse {
    pub id: String,
}

/// A stored post
#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: String,
    pub author_id: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.to_string(),
            author_id: post.author_id.to_string(),
            body: post.body,
            created_at: post.created_at,
        }
    }
}

/// POST /v1/posts
///
/// Publish a post as the authenticated user.
pub async fn create_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let request = json_body(payload)?;
    let id = state
        .blog
        .create_post(&user.id.to_string(), &request.body)
        .await?;

    let location = format!("{}/v1/posts/{}", state.config.api_base_url, id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(CreatePostResponse { id: id.to_string() }),
    )
        .into_response())
}

/// GET /v1/posts/:id
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PostResponse>, AppError> {
    let post = state.blog.get_post(&id).await?;
    Ok(Json(post.into()))
}

/// GET /v1/timeline
///
/// The authenticated user's posts and those of everyone they follow,
/// newest first.
pub async fn get_timeline(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<PostView>>, AppError> {
    let timeline = state.blog.get_timeline(&user.id.to_string()).await?;
    Ok(Json(timeline))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::UserId;

    #[test]
    fn parse_create_post_request() {
        let request: CreatePostRequest = serde_json::from_str(r#"{"body": "hello"}"#).unwrap();
        assert_eq!(request.body, "hello");

        let missing: Result<CreatePostRequest, _> = serde_json::from_str("{}");
        assert!(missing.is_err());
    }

    #[test]
    fn post_response_from_post() {
        let author = UserId::new();
        let post = Post::new(author, "hi").unwrap();
        let id = post.id;

        let response = PostResponse::from(post);
        assert_eq!(response.id, id.to_string());
        assert_eq!(response.author_id, author.to_string());

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["body"], "hi");
        assert!(json.get("created_at").is_some());
    }
}
