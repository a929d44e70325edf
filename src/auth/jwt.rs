//! JWT Token Handler
//! Mission: Issue and verify signed, expiring identity tokens

use crate::auth::models::{Claims, Identity};
use anyhow::{ensure, Context, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

/// Default token lifetime: one hour
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// JWT Handler for token operations
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtHandler {
    /// Create a new JWT handler with the default one-hour lifetime
    pub fn new(secret: &str) -> Self {
        Self::with_ttl(secret, Duration::seconds(DEFAULT_TOKEN_TTL_SECS))
    }

    /// Create a JWT handler with a custom token lifetime
    pub fn with_ttl(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::default();
        // Expiry is exact: a token is invalid the moment `exp` passes.
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a signed token for an identity
    pub fn issue(&self, username: &str) -> Result<String> {
        ensure!(!username.is_empty(), "username must not be empty");

        let now = Utc::now();
        let expiration = now
            .checked_add_signed(self.ttl)
            .context("Invalid timestamp")?;

        let claims = Claims {
            username: username.to_string(),
            iat: now.timestamp().max(0) as usize,
            exp: expiration.timestamp().max(0) as usize,
        };

        debug!(
            "Issuing JWT for {}, expires in {}s",
            username,
            self.ttl.num_seconds()
        );

        encode(&Header::default(), &claims, &self.encoding_key).context("Failed to generate JWT")
    }

    /// Verify a token and return its claims
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let decoded = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .context("Invalid or expired token")?;

        debug!("Validated JWT for {}", decoded.claims.username);

        Ok(decoded.claims)
    }

    /// Verify a token and resolve the identity it carries
    pub fn verify(&self, token: &str) -> Result<Identity> {
        self.validate_token(token).map(|claims| claims.identity())
    }
}
