//! Account handlers
//!
//! Registration and login. Both routes are public.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use super::json_body;
use crate::error::AppError;
use crate::AppState;

/// Request body for account registration
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Response body for account registration
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: String,
}

/// Request body for login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response body for login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Session token (Authorization: Bearer <token>)
    pub token: String,
}

/// POST /auth/v1/accounts
///
/// Register a new account. Its profile is created from the account event.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let request = json_body(payload)?;
    let id = state
        .auth
        .register_account(&request.username, &request.email, &request.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse { id: id.to_string() }),
    ))
}

/// POST /auth/v1/sessions
///
/// Exchange credentials for a session token.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let request = json_body(payload)?;
    let id = state
        .auth
        .validate_credentials(&request.username, &request.password)
        .await?;

    let token = state.tokens.issue(&id)?;
    Ok(Json(LoginResponse { token }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_register_request_valid() {
        let json = r#"{"username": "alice", "email": "alice@app.com", "password": "password1"}"#;
        let request: RegisterRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.username, "alice");
        assert_eq!(request.email, "alice@app.com");
    }

    #[test]
    fn parse_register_request_missing_password() {
        let json = r#"{"username": "alice", "email": "alice@app.com"}"#;
        let result: Result<RegisterRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn serialize_login_response() {
        let json = serde_json::to_string(&LoginResponse {
            token: "abc.def.ghi".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"token":"abc.def.ghi"}"#);
    }
}
