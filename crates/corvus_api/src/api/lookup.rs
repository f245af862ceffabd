//! Species lookup endpoint.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::State;

use crate::AppState;

/// GET /lookup
///
/// Returns the species-index-to-name mapping for the trained model's
/// classes.
pub async fn lookup(State(state): State<AppState>) -> Json<BTreeMap<usize, String>> {
    Json(state.metadata.species_lookup.clone())
}
