//! Live station feed response DTOs.
//!
//! These types map directly to the feed's JSON. Only the fields needed for
//! matching are declared; the feed sends many more, which serde ignores.

use std::fmt;

use serde::Deserialize;

/// Response from the live station endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LiveStationBoard {
    /// Trains currently shown on the station's board, in feed order.
    pub live_station_info: Vec<LiveTrainEntry>,
}

/// One train on a live station board.
#[derive(Debug, Clone, Deserialize)]
pub struct LiveTrainEntry {
    /// Train number. Sent as a string by some endpoints, a number by others.
    pub train_no: TrainNumber,

    /// Display name of the train.
    pub train_name: String,

    /// Timetabled arrival at this station (ISO 8601 with offset).
    ///
    /// Flagged entries sometimes carry `null` here.
    pub scheduled_arrival: Option<String>,

    /// `"HH:MM"` delay, or `"RIGHT TIME"`.
    pub delay_in_arrival: Option<String>,

    /// Station code where the train currently is.
    pub cur_stn: Option<String>,

    /// Whether the train has been diverted away from this station.
    pub diverted: bool,

    /// Whether the train is cancelled.
    pub cancelled: bool,

    /// Whether the train has already arrived.
    pub arrived: bool,
}

impl LiveTrainEntry {
    /// Whether this entry must be dropped before matching.
    pub fn is_excluded(&self) -> bool {
        self.diverted || self.cancelled || self.arrived
    }
}

/// A train number as sent by the feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TrainNumber {
    Text(String),
    Number(u64),
}

impl fmt::Display for TrainNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainNumber::Text(s) => f.write_str(s),
            TrainNumber::Number(n) => write!(f, "{n}"),
        }
    }
}
