//! xeno-canto recording metadata downloader library.
//!
//! Paginates through the xeno-canto recordings API for a fixed taxonomic
//! query, derives season buckets from recording dates, filters sparse
//! (country, season) groups, and caches the result on disk.

pub mod api;
mod ingest;

pub use api::client::XenoCantoClient;
pub use config::Config;
pub use ingest::{MIN_GROUP_SIZE, RECORDINGS_QUERY, run};
