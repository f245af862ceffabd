//! Rate-limited HTTP client for the xeno-canto API.

use core::num::NonZeroU32;
use core::time::Duration;

use anyhow::{Context, Result};
use config::CONFIG;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use recording_structs::RecordingsResponse;
use reqwest::Client;
use tracing::info;

/// Rate limit: 1 request per second
const RATE_LIMIT_PER_SECOND: u32 = 1;

/// Base URL for the xeno-canto API
const API_BASE_URL: &str = "https://xeno-canto.org/api/2";

type RateLimiterType = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Rate-limited client for the xeno-canto recordings API.
pub struct XenoCantoClient {
    client: Client,
    rate_limiter: RateLimiterType,
}

impl XenoCantoClient {
    /// Creates a new client with rate limiting.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        // Fixed delay between paginated requests
        let quota = Quota::per_second(
            NonZeroU32::new(RATE_LIMIT_PER_SECOND).expect("rate limit should be non-zero"),
        );
        let rate_limiter = RateLimiter::direct(quota);

        Ok(Self {
            client,
            rate_limiter,
        })
    }

    /// Fetches one page of recordings for the given query.
    ///
    /// # Arguments
    ///
    /// * `query` - Search query (e.g., "gen:Corvus")
    /// * `page` - Page number, 1-indexed
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or responds with a
    /// non-success status.
    pub async fn fetch_page(&self, query: &str, page: u32) -> Result<RecordingsResponse> {
        self.rate_limiter.until_ready().await;

        let url = format!(
            "{API_BASE_URL}/recordings?query={query}&page={page}&key={key}",
            key = CONFIG.xeno_canto_api_key
        );

        info!(page, "Fetching recordings page");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to send request to xeno-canto API")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("API request failed with status {status}: {body}");
        }

        let data: RecordingsResponse = response
            .json()
            .await
            .context("Failed to parse recordings response")?;

        info!(
            page = data.page,
            recordings = data.recordings.len(),
            "Received recordings"
        );

        Ok(data)
    }
}
