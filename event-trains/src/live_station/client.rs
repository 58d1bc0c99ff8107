//! Live station HTTP client.
//!
//! Fetches one station's live board per request. The feed is public, so
//! no credentials are involved.

use tracing::debug;

use crate::domain::StationCode;

use super::error::LiveStationError;
use super::types::LiveStationBoard;

/// Default URL of the live station endpoint.
const DEFAULT_BASE_URL: &str = "https://whereismytrain.in/cache/live_station";

/// Configuration for the live station client.
#[derive(Debug, Clone)]
pub struct LiveStationConfig {
    /// Endpoint URL; the station code is sent as `?station_code=`
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl LiveStationConfig {
    /// Create a config pointing at the production feed.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for LiveStationConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Live station feed client.
#[derive(Debug, Clone)]
pub struct LiveStationClient {
    http: reqwest::Client,
    base_url: String,
}

impl LiveStationClient {
    /// Create a new client with the given configuration.
    pub fn new(config: LiveStationConfig) -> Result<Self, LiveStationError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Get the raw live board for a station.
    pub async fn get_board(
        &self,
        station: &StationCode,
    ) -> Result<LiveStationBoard, LiveStationError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[("station_code", station.as_str())])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LiveStationError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let board: LiveStationBoard =
            serde_json::from_str(&body).map_err(|e| LiveStationError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        debug!(
            station = station.as_str(),
            entries = board.live_station_info.len(),
            "fetched live station board"
        );

        Ok(board)
    }
}
