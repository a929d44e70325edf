//! Authentication API Endpoints
//! Mission: Provide the login endpoint

use crate::auth::{
    jwt::JwtHandler,
    models::{LoginRequest, LoginResponse},
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

/// Shared auth state
#[derive(Clone)]
pub struct AuthState {
    pub jwt_handler: Arc<JwtHandler>,
}

impl AuthState {
    pub fn new(jwt_handler: Arc<JwtHandler>) -> Self {
        Self { jwt_handler }
    }
}

/// Login endpoint - POST /login
///
/// Any non-empty username is accepted; there is no credential check.
pub async fn login(
    State(state): State<AuthState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AuthApiError> {
    let Json(payload) = payload.map_err(|_| AuthApiError::MissingUsername)?;

    let username = payload
        .username
        .filter(|u| !u.is_empty())
        .ok_or(AuthApiError::MissingUsername)?;

    let token = state.jwt_handler.issue(&username).map_err(|e| {
        error!("Failed to issue token: {:#}", e);
        AuthApiError::InternalError
    })?;

    info!("🔐 Login: {}", username);

    Ok(Json(LoginResponse { token }))
}

/// Auth API error types
#[derive(Debug)]
pub enum AuthApiError {
    MissingUsername,
    InternalError,
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthApiError::MissingUsername => (StatusCode::BAD_REQUEST, "username is required"),
            AuthApiError::InternalError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::post, Router};
    use tower::ServiceExt;

    fn app() -> (Router, Arc<JwtHandler>) {
        let jwt_handler = Arc::new(JwtHandler::new("test-secret-key-12345"));
        let router = Router::new()
            .route("/login", post(login))
            .with_state(AuthState::new(jwt_handler.clone()));
        (router, jwt_handler)
    }

    fn login_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/login")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_login_returns_verifiable_token() {
        let (app, jwt_handler) = app();

        let response = app
            .oneshot(login_request(r#"{"username":"alice"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: LoginResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(jwt_handler.verify(&body.token).unwrap().as_str(), "alice");
    }

    #[tokio::test]
    async fn test_login_without_username_is_bad_request() {
        for body in ["{}", r#"{"username":""}"#, r#"{"username":null}"#, "not json"] {
            let (app, _) = app();
            let response = app.oneshot(login_request(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {}", body);

            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
            assert!(json.get("token").is_none());
            assert_eq!(json["message"], "username is required");
        }
    }
}
