//! userdata-api server
//! Mission: Username login, bearer tokens, per-user JSON storage in memory

use anyhow::{Context, Result};
use clap::Parser;
use dotenv::dotenv;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use userdata_api::{auth::JwtHandler, create_router, ServerConfig, UserDataStore};

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be loaded before clap reads env-backed flags
    load_env();
    init_tracing();

    let config = ServerConfig::parse();

    info!("🚀 userdata-api starting");

    let jwt_secret = config.resolve_jwt_secret()?;
    let jwt_handler = Arc::new(JwtHandler::with_ttl(&jwt_secret, config.token_ttl()?));
    let store = Arc::new(UserDataStore::new());

    info!(
        "🔐 Token lifetime: {}s",
        jwt_handler.ttl().num_seconds()
    );

    let app = create_router(store, jwt_handler);

    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("🎯 API server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "userdata_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_env() {
    // 1) Standard dotenv search (cwd + parents)
    let _ = dotenv();

    // 2) Also try the crate root when launched from elsewhere
    let manifest_env = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
    if manifest_env.exists() {
        let _ = dotenv::from_path(&manifest_env);
    }
}
