//! API response types for the xeno-canto recordings API.

use serde::{Deserialize, Serialize};

/// Response from the GET /recordings endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecordingsResponse {
    /// Total number of recordings matching the query
    #[serde(rename = "numRecordings")]
    pub num_recordings: String,

    /// Total number of distinct species matching the query
    #[serde(rename = "numSpecies")]
    pub num_species: String,

    /// Current page number (1-indexed)
    pub page: u32,

    /// Total number of result pages
    #[serde(rename = "numPages")]
    pub num_pages: u32,

    /// Recordings on this page
    pub recordings: Vec<ApiRecording>,
}

/// A single recording entry from the list endpoint.
///
/// Only the fields the ingestion pipeline consumes are modelled; the API
/// returns many more, which serde ignores.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiRecording {
    /// Catalogue number of the recording
    pub id: String,

    /// Genus name
    #[serde(rename = "gen")]
    pub genus: Option<String>,

    /// Species epithet
    pub sp: Option<String>,

    /// English common name of the species
    pub en: Option<String>,

    /// Recordist name
    pub rec: Option<String>,

    /// Country where the recording was made
    pub cnt: Option<String>,

    /// Locality description
    pub loc: Option<String>,

    /// Date of the recording (YYYY-MM-DD, with 00 for unknown segments)
    pub date: Option<String>,

    /// Quality rating (A-E)
    pub q: Option<String>,
}
