//! HTTP serving layer for the species predictor.
//!
//! All state is loaded once at startup into an immutable [`AppState`] and
//! shared read-only with the request handlers; nothing refreshes or mutates
//! it afterwards.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::{get, post};
use config::Config;
use recording_structs::RecordingRecord;
use rf_model::{ModelMetadata, RandomForest, load_metadata, load_model};
use tracing::info;

pub mod api;

/// Port the API serves on.
pub const DEFAULT_PORT: u16 = 8080;

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// The trained forest
    pub model: Arc<RandomForest>,

    /// Encoders, species lookup, and metrics snapshot
    pub metadata: Arc<ModelMetadata>,

    /// Cached ingestion dataset, when present at startup
    pub dataset: Option<Arc<Vec<RecordingRecord>>>,

    /// Path of the metrics bundle, re-read on every /metrics call
    pub metrics_path: Arc<PathBuf>,
}

impl AppState {
    /// Creates application state from already-loaded artifacts.
    #[must_use]
    pub fn new(
        model: RandomForest,
        metadata: ModelMetadata,
        dataset: Option<Vec<RecordingRecord>>,
        metrics_path: PathBuf,
    ) -> Self {
        Self {
            model: Arc::new(model),
            metadata: Arc::new(metadata),
            dataset: dataset.map(Arc::new),
            metrics_path: Arc::new(metrics_path),
        }
    }

    /// Loads all artifacts from disk once, before serving begins.
    ///
    /// The model and metadata bundles are required; the dataset cache is
    /// optional and `/metadata` reports its absence per request.
    ///
    /// # Errors
    ///
    /// Returns an error if the model or metadata artifacts cannot be loaded.
    pub fn load(config: &Config) -> Result<Self> {
        let dataset = if config.cache_path().exists() {
            info!("Loading cached data");
            Some(recording_structs::load_cached_dataset(&config.cache_path())?)
        } else {
            None
        };

        info!("Loading model");
        let model = load_model(&config.model_path()).context("Failed to load model artifact")?;

        info!("Loading metadata");
        let metadata =
            load_metadata(&config.metadata_path()).context("Failed to load metadata artifact")?;

        Ok(Self::new(model, metadata, dataset, config.metrics_path()))
    }
}

/// Builds the application router.
#[must_use]
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::home))
        .route("/lookup", get(api::lookup))
        .route("/predict", post(api::predict))
        .route("/metrics", get(api::metrics))
        .route("/metadata", get(api::metadata))
        .with_state(state)
}

/// Serves the API on the given port until the process exits.
///
/// # Errors
///
/// Returns an error if binding or serving fails.
pub async fn serve(state: AppState, port: u16) -> Result<()> {
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("corvus API listening on http://0.0.0.0:{port}");

    axum::serve(listener, app).await?;

    Ok(())
}
