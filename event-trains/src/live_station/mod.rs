//! Live station feed client.
//!
//! Fetches the live arrival board for one station at a time from the
//! train-tracking feed and converts its entries into [`TrainArrival`]s.
//!
//! Key characteristics of the feed:
//! - Times are full ISO 8601 instants with a UTC offset
//! - Delays are reported separately as `"HH:MM"` or `"RIGHT TIME"`
//! - Diverted, cancelled and already-arrived trains stay on the board
//!   and must be filtered out
//!
//! [`TrainArrival`]: crate::domain::TrainArrival

mod client;
mod convert;
mod error;
mod types;

pub use client::{LiveStationClient, LiveStationConfig};
pub use convert::{convert_board, convert_entry};
pub use error::LiveStationError;
pub use types::{LiveStationBoard, LiveTrainEntry, TrainNumber};
