//! Cached dataset endpoint.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::AppState;
use crate::api::ApiError;

/// GET /metadata
///
/// Returns the cached ingestion dataset as records, or a 500 when no cache
/// was present at startup.
pub async fn metadata(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    state.dataset.as_ref().map_or_else(
        || Err(ApiError::Internal("Metadata not available".to_string())),
        |records| Ok(Json(json!({ "data": &**records }))),
    )
}
