//! Domain types for matching trains to events.
//!
//! This module contains the validated values that both feeds are
//! normalized into. Types enforce their invariants at construction time,
//! so the matcher can trust any value it is handed.

mod arrival;
mod error;
mod event;
mod station;
mod time;

pub use arrival::TrainArrival;
pub use error::ConversionError;
pub use event::Event;
pub use station::{InvalidStationCode, StationCode};
pub use time::{
    FeedTime, ON_TIME, TimeError, apply_delay, effective_arrival, parse_delay, parse_timestamp,
    to_iso8601,
};
