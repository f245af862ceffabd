//! Training metrics endpoint.

use axum::Json;
use axum::extract::State;
use recording_structs::ModelMetrics;

use crate::AppState;
use crate::api::ApiError;

/// GET /metrics
///
/// Re-reads the metrics bundle from disk on every call and serves it
/// verbatim.
pub async fn metrics(State(state): State<AppState>) -> Result<Json<ModelMetrics>, ApiError> {
    let metrics = rf_model::load_metrics(&state.metrics_path)
        .map_err(|error| ApiError::Internal(format!("{error:#}")))?;

    Ok(Json(metrics))
}
