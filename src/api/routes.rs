use axum::{
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{data, docs, AppState};
use crate::auth::{api as auth_api, auth_middleware, AuthState, JwtHandler};
use crate::middleware::request_logging;
use crate::store::UserDataStore;

/// Create the API router
pub fn create_router(store: Arc<UserDataStore>, jwt_handler: Arc<JwtHandler>) -> Router {
    let app_state = AppState { store };

    let auth_router = Router::new()
        .route("/login", post(auth_api::login))
        .with_state(AuthState::new(jwt_handler.clone()));

    let protected_routes = Router::new()
        .route("/saveData", post(data::save_data))
        .route("/getData", get(data::get_data))
        .route("/identified/saveData", post(data::save_identified_data))
        .route("/identified/getData", get(data::get_identified_data))
        .route(
            "/identified/getData/:data_id",
            get(data::get_identified_data_by_id),
        )
        .route_layer(middleware::from_fn_with_state(jwt_handler, auth_middleware))
        .with_state(app_state);

    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/api-docs", get(docs::api_docs));

    Router::new()
        .merge(public_routes)
        .merge(auth_router)
        .merge(protected_routes)
        .layer(middleware::from_fn(request_logging))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
