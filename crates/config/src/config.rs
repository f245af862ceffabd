use std::path::PathBuf;
use std::sync::LazyLock;

use anyhow::Context;

/// Returns the base path for cached data and model artifacts.
#[must_use]
pub fn get_data_path() -> PathBuf {
    dotenvy::dotenv().ok();

    std::env::var("CORVUS_DATA_PATH").map_or_else(|_| PathBuf::from("data"), PathBuf::from)
}

pub static CONFIG: LazyLock<Config> =
    LazyLock::new(|| Config::from_env().expect("Failed to create config"));

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// xeno-canto API key
    pub xeno_canto_api_key: String,

    /// Base directory for the dataset cache and model artifacts
    pub data_path: PathBuf,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `XENO_CANTO_API_KEY`: API key for xeno-canto.org
    ///
    /// Optional environment variables:
    /// - `CORVUS_DATA_PATH`: Base directory for cached data and artifacts (default: `data`)
    ///
    /// # Errors
    ///
    /// Returns an error if required environment variables are missing.
    fn from_env() -> anyhow::Result<Self> {
        // Load .env file
        dotenvy::dotenv().ok();

        let xeno_canto_api_key = std::env::var("XENO_CANTO_API_KEY")
            .context("XENO_CANTO_API_KEY environment variable not set")?;

        Ok(Self {
            xeno_canto_api_key,
            data_path: get_data_path(),
        })
    }

    /// Path of the cached ingestion dataset.
    #[must_use]
    pub fn cache_path(&self) -> PathBuf {
        self.data_path.join("corvus_cache.json")
    }

    /// Path of the serialized random-forest model.
    #[must_use]
    pub fn model_path(&self) -> PathBuf {
        self.data_path.join("rf_model.json")
    }

    /// Path of the model metadata bundle (encoders, lookup, metrics snapshot).
    #[must_use]
    pub fn metadata_path(&self) -> PathBuf {
        self.data_path.join("rf_model_metadata.json")
    }

    /// Path of the standalone metrics bundle.
    #[must_use]
    pub fn metrics_path(&self) -> PathBuf {
        self.data_path.join("model_metrics.json")
    }
}
