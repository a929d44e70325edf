//! Authentication Models
//! Mission: Define identity, token claims and login payloads

use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller identity resolved from a verified token.
///
/// The username is the sole partition key for stored data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn new(username: impl Into<String>) -> Self {
        Self(username.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// JWT Claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    pub iat: usize, // issued-at timestamp
    pub exp: usize, // expiration timestamp
}

impl Claims {
    pub fn identity(&self) -> Identity {
        Identity::new(self.username.clone())
    }
}

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}
