//! Per-user data storage API
//!
//! Clients log in with a username, receive a bearer token, and store and
//! retrieve JSON data scoped to that identity. All state is in memory.

pub mod api;
pub mod auth;
pub mod config;
pub mod middleware;
pub mod store;

pub use api::create_router;
pub use config::ServerConfig;
pub use store::UserDataStore;
