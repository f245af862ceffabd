//! Core ingestion logic: fetch all pages, derive seasons, filter, cache.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use recording_structs::{
    ApiRecording, RecordingRecord, Season, load_cached_dataset, save_cached_dataset,
};
use tracing::{info, warn};

use crate::api::client::XenoCantoClient;

/// Fixed taxonomic query for the dataset.
pub const RECORDINGS_QUERY: &str = "gen:Corvus";

/// Minimum (country, season) group size kept in the dataset.
pub const MIN_GROUP_SIZE: usize = 10;

/// Runs the complete ingestion process.
///
/// If the cache file already exists its contents are returned without any
/// network traffic. Otherwise every result page is fetched, seasons are
/// derived, sparse groups are dropped, and the dataset is written to the
/// cache path.
///
/// A failure on the first page aborts the run; failures on later pages are
/// logged and skipped, silently shrinking the dataset.
///
/// # Errors
///
/// Returns an error if the first page cannot be fetched or the cache cannot
/// be read or written.
pub async fn run(cache_path: &Path) -> Result<Vec<RecordingRecord>> {
    if cache_path.exists() {
        info!(cache = %cache_path.display(), "Loading cached data");
        return load_cached_dataset(cache_path);
    }

    let client = XenoCantoClient::new()?;

    let first = client
        .fetch_page(RECORDINGS_QUERY, 1)
        .await
        .context("Failed to fetch first page of recordings")?;

    let num_pages = first.num_pages;
    info!(
        num_pages,
        total = %first.num_recordings,
        species = %first.num_species,
        "Fetched first page"
    );

    let mut recordings = first.recordings;

    for page in 2..=num_pages {
        match client.fetch_page(RECORDINGS_QUERY, page).await {
            Ok(response) => recordings.extend(response.recordings),
            Err(error) => warn!(page, "Skipping failed page: {error:#}"),
        }
    }

    let derived: Vec<RecordingRecord> = recordings.into_iter().filter_map(derive_record).collect();
    let records = filter_small_groups(derived, MIN_GROUP_SIZE);

    save_cached_dataset(cache_path, &records)?;
    info!(rows = records.len(), cache = %cache_path.display(), "Cached ingestion dataset");

    Ok(records)
}

/// Converts an API recording into a dataset row.
///
/// Returns `None` when the country, species, or date is missing, or when no
/// season can be derived from the date.
#[must_use]
pub fn derive_record(recording: ApiRecording) -> Option<RecordingRecord> {
    let cnt = recording.cnt.filter(|c| !c.is_empty())?;
    let en = recording.en.filter(|e| !e.is_empty())?;
    let date = recording.date?;
    let season = Season::from_date(&date)?;

    Some(RecordingRecord {
        cnt,
        date,
        en,
        season: Some(season),
    })
}

/// Drops every (country, season) group with fewer than `min_size` members.
#[must_use]
pub fn filter_small_groups(
    records: Vec<RecordingRecord>,
    min_size: usize,
) -> Vec<RecordingRecord> {
    let mut group_sizes: HashMap<(String, Option<Season>), usize> = HashMap::new();
    for record in &records {
        *group_sizes
            .entry((record.cnt.clone(), record.season))
            .or_default() += 1;
    }

    records
        .into_iter()
        .filter(|record| group_sizes[&(record.cnt.clone(), record.season)] >= min_size)
        .collect()
}
