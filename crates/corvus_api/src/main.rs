//! Standalone species-prediction API server.
//!
//! Loads the persisted artifacts once and serves them on port 8080.

use anyhow::Result;
use config::CONFIG;
use corvus_api::{AppState, DEFAULT_PORT};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let state = AppState::load(&CONFIG)?;

    corvus_api::serve(state, DEFAULT_PORT).await
}
