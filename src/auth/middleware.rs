//! Authentication Middleware
//! Mission: Protect data endpoints with bearer token validation

use crate::auth::jwt::JwtHandler;
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::debug;

/// Auth middleware that validates bearer tokens and attaches the caller's identity
pub async fn auth_middleware(
    State(jwt_handler): State<Arc<JwtHandler>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = bearer_token(&req)?;

    let identity = jwt_handler.verify(token).map_err(|e| {
        debug!("Rejected token: {:#}", e);
        AuthError::InvalidToken
    })?;

    // Handlers read the identity back out of the request extensions
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

/// Pull the token out of an `Authorization: Bearer <token>` header
fn bearer_token(req: &Request) -> Result<&str, AuthError> {
    let value = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidFormat)?;

    // Token is the second space-separated field; a doubled space leaves it empty
    let mut parts = value.split(' ');
    let scheme = parts.next().unwrap_or_default();
    let token = parts.next().unwrap_or_default();

    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(AuthError::InvalidFormat);
    }

    Ok(token)
}

/// Auth error types
#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    MissingToken,
    InvalidFormat,
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        // Bare status codes, no body
        match self {
            AuthError::MissingToken => StatusCode::UNAUTHORIZED,
            AuthError::InvalidFormat | AuthError::InvalidToken => StatusCode::FORBIDDEN,
        }
        .into_response()
    }
}
