//! Data endpoints for the authenticated caller.
//!
//! - `POST /saveData` - append `{data}` to the anonymous store
//! - `GET /getData` - list anonymous values
//! - `POST /identified/saveData` - append the whole body as an identified record
//! - `GET /identified/getData` - list identified records
//! - `GET /identified/getData/:dataId` - fetch one identified record
//!
//! Every handler runs behind the auth middleware, which guarantees an
//! `Identity` extension.

use axum::{
    body::Bytes,
    extract::{Path, State},
    response::Json,
    Extension,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::{error::ApiError, AppState};
use crate::auth::Identity;
use crate::store::{parse_record_id, IdentifiedRecord};

const SAVED_MESSAGE: &str = "Data saved successfully!";

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn saved() -> Json<Self> {
        Json(Self {
            message: SAVED_MESSAGE.to_string(),
        })
    }
}

/// Decode a save body. An empty body reads as `{}` regardless of content type;
/// anything else must be valid JSON.
fn parse_body(body: &[u8]) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {}", e)))
}

pub async fn save_data(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    body: Bytes,
) -> Result<Json<MessageResponse>, ApiError> {
    // Only an object's `data` field is stored; anything else saves null
    let data = match parse_body(&body)? {
        Value::Object(mut fields) => fields.remove("data").unwrap_or(Value::Null),
        _ => Value::Null,
    };

    let count = state.store.anonymous.append(&identity, data);
    debug!(user = %identity, count, "Saved anonymous data");

    Ok(MessageResponse::saved())
}

pub async fn get_data(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Json<Vec<Value>> {
    Json(state.store.anonymous.list(&identity))
}

pub async fn save_identified_data(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    body: Bytes,
) -> Result<Json<MessageResponse>, ApiError> {
    let data = parse_body(&body)?;

    let id = state.store.identified.append(&identity, data);
    debug!(user = %identity, id, "Saved identified data");

    Ok(MessageResponse::saved())
}

pub async fn get_identified_data(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Json<Vec<IdentifiedRecord>> {
    Json(state.store.identified.list(&identity))
}

pub async fn get_identified_data_by_id(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(data_id): Path<String>,
) -> Result<Json<IdentifiedRecord>, ApiError> {
    parse_record_id(&data_id)
        .and_then(|id| state.store.identified.get(&identity, id))
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Data {} not found", data_id)))
}
