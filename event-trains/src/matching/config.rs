//! Matching configuration.

use chrono::Duration;

use crate::domain::StationCode;

/// Stations monitored when none are configured.
pub const DEFAULT_STATIONS: [&str; 5] = ["ERN", "ERS", "AWY", "KLMR", "IPL"];

/// Configuration for a matching cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    /// Stations whose live boards are fetched, in fetch order.
    pub stations: Vec<StationCode>,
}

impl MatchConfig {
    /// Create a configuration monitoring the given stations.
    pub fn new(stations: Vec<StationCode>) -> Self {
        Self { stations }
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            stations: DEFAULT_STATIONS
                .iter()
                .filter_map(|s| StationCode::parse(s).ok())
                .collect(),
        }
    }
}

/// Convert a wait in minutes to a duration.
///
/// Returns `None` if the value is too large to represent. Negative values
/// are allowed; they simply never match anything.
pub fn wait_from_minutes(minutes: i64) -> Option<Duration> {
    Duration::try_minutes(minutes)
}
