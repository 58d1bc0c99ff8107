//! Result records.
//!
//! A [`MatchRecord`] is the caller-facing view of a [`Match`]: the train
//! label, where the train is now, both instants as ISO-8601 strings and
//! the gap in whole seconds.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::domain::to_iso8601;

use super::window::Match;

/// Event part of a [`MatchRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub name: String,
    pub description: String,
    /// ISO-8601 start time
    pub date: String,
}

/// One matched (train, event) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// `"<name> (<number>)"`
    pub train: String,
    /// Station the train is currently at
    pub cur_stn: String,
    /// ISO-8601 expected arrival
    pub train_time: String,
    pub event: EventRecord,
    /// Seconds between arrival and event start
    pub time_diff: i64,
}

impl From<&Match> for MatchRecord {
    fn from(m: &Match) -> Self {
        Self {
            train: m.train.label(),
            cur_stn: m.train.current_station.clone(),
            train_time: to_iso8601(&m.train.scheduled_arrival),
            event: EventRecord {
                name: m.event.name.clone(),
                description: m.event.description.clone(),
                date: to_iso8601(&m.event.date),
            },
            time_diff: m.time_diff.num_seconds(),
        }
    }
}

/// Format a wait in seconds as `"H hours M minutes"`.
///
/// # Examples
///
/// ```
/// use event_trains::matching::format_wait;
///
/// assert_eq!(format_wait(600), "0 hours 10 minutes");
/// assert_eq!(format_wait(3_900), "1 hours 5 minutes");
/// ```
pub fn format_wait(seconds: i64) -> String {
    let minutes = seconds / 60;
    format!("{} hours {} minutes", minutes / 60, minutes % 60)
}

/// Render records as a plain-text table for the terminal.
pub fn render_table(records: &[MatchRecord]) -> String {
    if records.is_empty() {
        return "No trains match the upcoming events.\n".to_string();
    }

    let headers = ["Train", "Now at", "Arrives", "Event", "Starts", "Wait"];
    let rows: Vec<[String; 6]> = records
        .iter()
        .map(|r| {
            [
                r.train.clone(),
                r.cur_stn.clone(),
                r.train_time.clone(),
                r.event.name.clone(),
                r.event.date.clone(),
                format_wait(r.time_diff),
            ]
        })
        .collect();

    let mut widths = headers.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let mut push_line = |cells: &[&str]| {
        let line = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        // Writing to a String cannot fail
        let _ = writeln!(out, "{}", line.trim_end());
    };

    push_line(&headers);
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        push_line(&cells);
    }

    out
}
