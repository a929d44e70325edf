//! Server configuration from CLI flags and environment.

use anyhow::{bail, Result};
use clap::Parser;
use std::net::SocketAddr;
use tracing::warn;

use crate::auth::jwt::DEFAULT_TOKEN_TTL_SECS;

const DEV_JWT_SECRET: &str = "dev-secret-change-in-production-minimum-32-characters";

/// Per-user data storage API
#[derive(Parser, Debug, Clone)]
#[command(name = "userdata-api")]
#[command(about = "Per-user JSON data storage behind username login and bearer tokens")]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Secret used to sign and verify tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: Option<String>,

    /// Token lifetime in seconds
    #[arg(long, env = "TOKEN_TTL_SECS", default_value_t = DEFAULT_TOKEN_TTL_SECS)]
    pub token_ttl_secs: i64,

    /// Development mode: fall back to a built-in signing secret
    #[arg(long, env = "DEV_MODE")]
    pub dev: bool,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        match addr.parse() {
            Ok(addr) => Ok(addr),
            Err(e) => bail!("Invalid bind address {}: {}", addr, e),
        }
    }

    /// The signing secret. Required outside development mode.
    pub fn resolve_jwt_secret(&self) -> Result<String> {
        match self.jwt_secret.as_deref().map(str::trim) {
            Some(secret) if !secret.is_empty() => Ok(secret.to_string()),
            _ if self.dev => {
                warn!("⚠️  JWT_SECRET not set, using development secret. DO NOT USE IN PRODUCTION!");
                Ok(DEV_JWT_SECRET.to_string())
            }
            _ => bail!("JWT_SECRET must be set (or run with --dev)"),
        }
    }

    pub fn token_ttl(&self) -> Result<chrono::Duration> {
        if self.token_ttl_secs <= 0 {
            bail!("TOKEN_TTL_SECS must be positive, got {}", self.token_ttl_secs);
        }
        Ok(chrono::Duration::seconds(self.token_ttl_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ServerConfig {
        let mut argv = vec!["userdata-api"];
        argv.extend_from_slice(args);
        ServerConfig::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_explicit_flags() {
        let config = parse(&[
            "--host",
            "127.0.0.1",
            "--port",
            "8080",
            "--jwt-secret",
            "s3cret",
            "--token-ttl-secs",
            "60",
        ]);

        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:8080");
        assert_eq!(config.resolve_jwt_secret().unwrap(), "s3cret");
        assert_eq!(config.token_ttl().unwrap().num_seconds(), 60);
    }

    #[test]
    fn test_secret_required_outside_dev_mode() {
        let mut config = parse(&["--jwt-secret", "x"]);
        config.jwt_secret = None;
        config.dev = false;
        assert!(config.resolve_jwt_secret().is_err());

        config.jwt_secret = Some("   ".to_string());
        assert!(config.resolve_jwt_secret().is_err());

        config.dev = true;
        assert_eq!(config.resolve_jwt_secret().unwrap(), DEV_JWT_SECRET);
    }

    #[test]
    fn test_non_positive_ttl_rejected() {
        let mut config = parse(&["--jwt-secret", "x"]);
        config.token_ttl_secs = 0;
        assert!(config.token_ttl().is_err());
    }
}
