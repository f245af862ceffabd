//! The cached ingestion dataset and its on-disk representation.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::Season;

/// One row of the cached ingestion dataset.
///
/// Immutable once ingested. Rows without a derivable season never reach the
/// cache, but the field stays optional so partially-derived batches can be
/// represented during ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RecordingRecord {
    /// Country where the recording was made
    pub cnt: String,

    /// Date of the recording as reported by the API
    pub date: String,

    /// English common name of the species
    pub en: String,

    /// Season derived from the recording date
    pub season: Option<Season>,
}

/// Loads the cached dataset from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_cached_dataset(path: &Path) -> Result<Vec<RecordingRecord>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset cache {}", path.display()))?;

    serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse dataset cache {}", path.display()))
}

/// Saves the cached dataset to a JSON file, creating parent directories.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_cached_dataset(path: &Path, records: &[RecordingRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create data directory {}", parent.display()))?;
    }

    let data = serde_json::to_string(records).context("Failed to serialize dataset cache")?;

    std::fs::write(path, data)
        .with_context(|| format!("Failed to write dataset cache {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cache.json");

        let records = vec![
            RecordingRecord {
                cnt: "Finland".to_string(),
                date: "2020-02-15".to_string(),
                en: "Hooded Crow".to_string(),
                season: Some(Season::Winter),
            },
            RecordingRecord {
                cnt: "Spain".to_string(),
                date: "2020-07-01".to_string(),
                en: "Common Raven".to_string(),
                season: Some(Season::Summer),
            },
        ];

        save_cached_dataset(&path, &records).expect("save");
        let loaded = load_cached_dataset(&path).expect("load");

        assert_eq!(loaded, records);
    }

    #[test]
    fn test_load_missing_cache_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(load_cached_dataset(&dir.path().join("absent.json")).is_err());
    }
}
