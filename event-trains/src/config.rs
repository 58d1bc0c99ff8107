//! Application configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::warn;

use crate::domain::{InvalidStationCode, StationCode};
use crate::events_api::EventsConfig;
use crate::live_station::LiveStationConfig;
use crate::matching::MatchConfig;

/// Default address the HTTP server binds to.
const DEFAULT_BIND: &str = "0.0.0.0:5000";

/// Default credential file.
const DEFAULT_CREDENTIALS: &str = "auth.json";

/// Default static asset directory.
const DEFAULT_STATIC_DIR: &str = "public";

/// Errors from reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The station list contained a bad code
    #[error("EVENT_TRAINS_STATIONS: {0}")]
    Stations(#[from] InvalidStationCode),

    /// The bind address did not parse
    #[error("EVENT_TRAINS_BIND: invalid socket address {0:?}")]
    Bind(String),
}

/// Everything the binary needs to run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Stations to match against
    pub matching: MatchConfig,
    /// Live station feed client settings
    pub live_station: LiveStationConfig,
    /// Events API client settings
    pub events: EventsConfig,
    /// Credential file path
    pub credentials_path: PathBuf,
    /// Static asset directory for the web front end
    pub static_dir: PathBuf,
    /// HTTP server bind address
    pub bind: SocketAddr,
}

impl AppConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let matching = match var("EVENT_TRAINS_STATIONS") {
            Some(list) => {
                let stations = StationCode::parse_list(&list)?;
                if stations.is_empty() {
                    warn!("EVENT_TRAINS_STATIONS has no stations; using defaults");
                    MatchConfig::default()
                } else {
                    MatchConfig::new(stations)
                }
            }
            None => MatchConfig::default(),
        };

        let mut live_station = LiveStationConfig::new();
        if let Some(url) = var("TRAIN_FEED_URL") {
            live_station = live_station.with_base_url(url);
        }

        let mut events = EventsConfig::new();
        if let Some(url) = var("EVENTS_API_URL") {
            events = events.with_base_url(url);
        }

        let bind_text = var("EVENT_TRAINS_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_text
            .parse()
            .map_err(|_| ConfigError::Bind(bind_text.clone()))?;

        Ok(Self {
            matching,
            live_station,
            events,
            credentials_path: var("EVENT_TRAINS_CREDENTIALS")
                .unwrap_or_else(|| DEFAULT_CREDENTIALS.to_string())
                .into(),
            static_dir: var("EVENT_TRAINS_STATIC_DIR")
                .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string())
                .into(),
            bind,
        })
    }
}
