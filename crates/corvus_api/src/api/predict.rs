//! Prediction endpoint.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::api::ApiError;

/// Request body for POST /predict.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PredictRequest {
    /// Country name, as fit by the training encoders
    pub cnt: Option<String>,

    /// Season name (Winter/Spring/Summer/Fall)
    pub season: Option<String>,
}

/// One ranked prediction.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionEntry {
    /// Species display name
    pub species: String,

    /// Predicted probability
    pub probability: f64,
}

/// Response body for POST /predict.
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    /// The three most likely species, highest probability first
    pub top_3_predictions: Vec<PredictionEntry>,
}

/// POST /predict
///
/// Encodes the submitted country and season with the training-time encoders
/// and returns the top-3 species by predicted probability. A missing field
/// is a 400; an unseen category or any downstream failure is a 500 carrying
/// the raw error message.
pub async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, ApiError> {
    let (Some(cnt), Some(season)) = (request.cnt, request.season) else {
        return Err(ApiError::BadRequest(
            "Missing 'cnt' or 'season' field".to_string(),
        ));
    };

    let cnt_enc = state
        .metadata
        .country_encoder
        .transform(&cnt)
        .map_err(|error| ApiError::Internal(error.to_string()))?;

    let season_enc = state
        .metadata
        .season_encoder
        .transform(&season)
        .map_err(|error| ApiError::Internal(error.to_string()))?;

    let probabilities = state
        .model
        .predict_proba(&[cnt_enc as f64, season_enc as f64]);

    // Rank classes by descending probability and keep the top 3
    let mut ranked: Vec<(usize, f64)> = probabilities.into_iter().enumerate().collect();
    ranked.sort_by(|(_, a), (_, b)| b.total_cmp(a));

    let top_3_predictions = ranked
        .into_iter()
        .take(3)
        .map(|(position, probability)| {
            let class = state.model.classes()[position];
            let species = state
                .metadata
                .species_lookup
                .get(&class)
                .cloned()
                .unwrap_or_else(|| class.to_string());

            PredictionEntry {
                species,
                probability,
            }
        })
        .collect();

    Ok(Json(PredictResponse { top_3_predictions }))
}
