//! Cycle error types.

use std::fmt;

use crate::domain::ConversionError;
use crate::events_api::EventsError;
use crate::live_station::LiveStationError;

/// Which upstream feed an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    /// Live train positions
    Trains,
    /// Community events
    Events,
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feed::Trains => f.write_str("train feed"),
            Feed::Events => f.write_str("events feed"),
        }
    }
}

/// Errors that abort a matching cycle.
///
/// There are no partial results: the first failure ends the cycle.
#[derive(Debug, thiserror::Error)]
pub enum CycleError {
    /// A timestamp or delay token could not be parsed
    #[error("{feed}: {message}")]
    Parse { feed: Feed, message: String },

    /// Transport failure talking to a feed
    #[error("{feed} unreachable: {message}")]
    Network { feed: Feed, message: String },

    /// Feed answered with an error status or an undecodable payload
    #[error("{feed} returned an invalid response: {message}")]
    InvalidResponse { feed: Feed, message: String },

    /// Not logged in, or the credential was rejected after a refresh
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The credential store could not be read or written
    #[error("credential store error: {0}")]
    Credentials(String),
}

impl CycleError {
    /// Wrap a record conversion failure from `feed`.
    pub fn parse(feed: Feed, err: ConversionError) -> Self {
        CycleError::Parse {
            feed,
            message: err.to_string(),
        }
    }

    /// Whether this error means the caller needs to log in again.
    pub fn is_auth(&self) -> bool {
        matches!(self, CycleError::Auth(_))
    }
}

impl From<LiveStationError> for CycleError {
    fn from(e: LiveStationError) -> Self {
        let feed = Feed::Trains;
        match e {
            LiveStationError::Http(_) => CycleError::Network {
                feed,
                message: e.to_string(),
            },
            LiveStationError::Api { .. } | LiveStationError::Json { .. } => {
                CycleError::InvalidResponse {
                    feed,
                    message: e.to_string(),
                }
            }
        }
    }
}

impl From<EventsError> for CycleError {
    fn from(e: EventsError) -> Self {
        let feed = Feed::Events;
        match e {
            EventsError::Http(_) => CycleError::Network {
                feed,
                message: e.to_string(),
            },
            EventsError::Api { .. } | EventsError::Json { .. } => CycleError::InvalidResponse {
                feed,
                message: e.to_string(),
            },
            EventsError::NotLoggedIn | EventsError::Unauthorized => {
                CycleError::Auth(e.to_string())
            }
            EventsError::Credentials(_) => CycleError::Credentials(e.to_string()),
        }
    }
}
