//! Serve command - runs the prediction API.

use anyhow::Result;
use config::CONFIG;
use corvus_api::AppState;

/// Runs the serve command.
///
/// # Errors
///
/// Returns an error if the artifacts cannot be loaded or serving fails.
pub async fn run(port: u16) -> Result<()> {
    let state = AppState::load(&CONFIG)?;

    corvus_api::serve(state, port).await
}
