//! Application state for the web layer.

use std::sync::Arc;

use crate::events_api::EventsClient;
use crate::live_station::LiveStationClient;
use crate::matching::MatchConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Live station feed client
    pub trains: Arc<LiveStationClient>,

    /// Authenticated events API client
    pub events: Arc<EventsClient>,

    /// Stations to match against
    pub config: Arc<MatchConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(trains: LiveStationClient, events: EventsClient, config: MatchConfig) -> Self {
        Self {
            trains: Arc::new(trains),
            events: Arc::new(events),
            config: Arc::new(config),
        }
    }
}
