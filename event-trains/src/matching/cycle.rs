//! One request/response matching cycle.

use chrono::Duration;
use tracing::info;

use super::config::MatchConfig;
use super::error::CycleError;
use super::ingest::{EventFeed, TrainFeed, collect_events, collect_trains};
use super::record::MatchRecord;
use super::window::match_events;

/// Fetch both feeds and return every train that arrives at most `wait`
/// before an event starts.
///
/// Events are fetched first, then each configured station in order. Every
/// await is sequential and any failure aborts the cycle.
pub async fn compute_matches<T, E>(
    trains: &T,
    events: &E,
    config: &MatchConfig,
    wait: Duration,
) -> Result<Vec<MatchRecord>, CycleError>
where
    T: TrainFeed,
    E: EventFeed,
{
    let events = collect_events(events).await?;
    let arrivals = collect_trains(trains, &config.stations).await?;

    let records: Vec<MatchRecord> = match_events(&arrivals, &events, wait)
        .iter()
        .map(MatchRecord::from)
        .collect();

    info!(
        stations = config.stations.len(),
        trains = arrivals.len(),
        events = events.len(),
        matches = records.len(),
        wait_minutes = wait.num_minutes(),
        "matching cycle complete"
    );

    Ok(records)
}
