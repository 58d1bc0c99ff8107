//! Event train matcher.
//!
//! A small service that answers: "which trains arriving at the monitored
//! stations get in shortly before a community event starts?"

pub mod config;
pub mod domain;
pub mod events_api;
pub mod live_station;
pub mod matching;
pub mod web;
