//! Train/event matching.
//!
//! This module answers: "which trains arriving at the monitored stations
//! get in shortly before an event starts?" Both feeds are fetched,
//! normalized to domain values, and every (train, event) pair is tested
//! against the wait window.

mod config;
mod cycle;
mod error;
mod ingest;
mod record;
mod window;

pub use config::{DEFAULT_STATIONS, MatchConfig, wait_from_minutes};
pub use cycle::compute_matches;
pub use error::{CycleError, Feed};
pub use ingest::{EventFeed, TrainFeed, collect_events, collect_trains};
pub use record::{EventRecord, MatchRecord, format_wait, render_table};
pub use window::{Match, match_events};
