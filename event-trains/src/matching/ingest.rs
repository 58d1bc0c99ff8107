//! Feed ingestion.
//!
//! The cycle only needs "give me a station's board" and "give me the
//! event list". Both are traits so tests can substitute in-memory feeds.

use std::future::Future;

use tracing::debug;

use crate::domain::{Event, StationCode, TrainArrival};
use crate::events_api::{EventList, EventsClient, EventsError, convert_events};
use crate::live_station::{LiveStationBoard, LiveStationClient, LiveStationError, convert_board};

use super::error::{CycleError, Feed};

/// Source of live station boards.
pub trait TrainFeed {
    /// Fetch the raw board for one station.
    fn fetch_live_station(
        &self,
        station: &StationCode,
    ) -> impl Future<Output = Result<LiveStationBoard, LiveStationError>> + Send;
}

/// Source of upcoming events.
pub trait EventFeed {
    /// Fetch the raw event list.
    fn fetch_events(&self) -> impl Future<Output = Result<EventList, EventsError>> + Send;
}

impl TrainFeed for LiveStationClient {
    async fn fetch_live_station(
        &self,
        station: &StationCode,
    ) -> Result<LiveStationBoard, LiveStationError> {
        self.get_board(station).await
    }
}

impl EventFeed for EventsClient {
    async fn fetch_events(&self) -> Result<EventList, EventsError> {
        self.get_event_list().await
    }
}

/// Fetch and convert every station's board, one station at a time.
///
/// Arrivals are concatenated in station order, then feed order within a
/// station.
pub async fn collect_trains<F: TrainFeed>(
    feed: &F,
    stations: &[StationCode],
) -> Result<Vec<TrainArrival>, CycleError> {
    let mut arrivals = Vec::new();

    for station in stations {
        let board = feed.fetch_live_station(station).await?;
        let converted = convert_board(&board).map_err(|e| CycleError::parse(Feed::Trains, e))?;

        debug!(
            station = station.as_str(),
            entries = board.live_station_info.len(),
            kept = converted.len(),
            "collected arrivals"
        );

        arrivals.extend(converted);
    }

    Ok(arrivals)
}

/// Fetch and convert the event list.
pub async fn collect_events<F: EventFeed>(feed: &F) -> Result<Vec<Event>, CycleError> {
    let list = feed.fetch_events().await?;
    let events = convert_events(&list).map_err(|e| CycleError::parse(Feed::Events, e))?;

    debug!(events = events.len(), "collected events");

    Ok(events)
}
