//! Bearer-token authentication middleware

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};

use crate::domain::entities::UserId;
use crate::error::AppError;
use crate::AppState;

/// The authenticated caller, injected into request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: UserId,
}

/// Extract the token from the Authorization header
fn extract_bearer(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

/// Authentication middleware
///
/// Verifies the session token and injects `AuthUser` into request
/// extensions. Routes that require authentication should use this
/// middleware.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer(&request).ok_or(AppError::Unauthorized)?;
    let user_id = state.tokens.verify(token)?;

    // Update last seen (fire and forget, log errors)
    let blog = state.blog.clone();
    tokio::spawn(async move {
        if let Err(e) = blog.update_last_seen(&user_id.to_string()).await {
            tracing::warn!(error = %e, user_id = %user_id, "Failed to update last_seen");
        }
    });

    request.extensions_mut().insert(AuthUser { id: user_id });

    Ok(next.run(request).await)
}
