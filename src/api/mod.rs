pub mod data;
pub mod docs;
pub mod error;
pub mod routes;

use std::sync::Arc;

use crate::store::UserDataStore;

pub use routes::create_router;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<UserDataStore>,
}
