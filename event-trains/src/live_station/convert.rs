//! Conversion from live station DTOs to domain types.
//!
//! Filtering happens here: diverted, cancelled and already-arrived trains
//! never become a [`TrainArrival`]. Unlike a departure board, a bad time
//! on any surviving entry fails the whole board so that feed-format drift
//! is surfaced instead of silently shrinking the result.

use tracing::trace;

use crate::domain::{
    ConversionError, TimeError, TrainArrival, apply_delay, parse_delay, parse_timestamp,
};

use super::types::{LiveStationBoard, LiveTrainEntry};

/// Convert a live station board into train arrivals, in feed order.
pub fn convert_board(board: &LiveStationBoard) -> Result<Vec<TrainArrival>, ConversionError> {
    let mut arrivals = Vec::with_capacity(board.live_station_info.len());

    for entry in &board.live_station_info {
        if let Some(arrival) = convert_entry(entry)? {
            arrivals.push(arrival);
        }
    }

    Ok(arrivals)
}

/// Convert a single board entry.
///
/// Returns `Ok(None)` for entries that are filtered out.
pub fn convert_entry(entry: &LiveTrainEntry) -> Result<Option<TrainArrival>, ConversionError> {
    let train_no = entry.train_no.to_string();

    if entry.is_excluded() {
        trace!(
            train_no,
            diverted = entry.diverted,
            cancelled = entry.cancelled,
            arrived = entry.arrived,
            "skipping train"
        );
        return Ok(None);
    }

    let record = || format!("train {train_no}");
    let required = |field: &'static str, value: &Option<String>| {
        value
            .clone()
            .ok_or_else(|| ConversionError::time(record(), field, "null", TimeError::missing()))
    };

    let scheduled_raw = required("scheduled_arrival", &entry.scheduled_arrival)?;
    let delay_raw = required("delay_in_arrival", &entry.delay_in_arrival)?;

    let scheduled = parse_timestamp(&scheduled_raw)
        .map_err(|e| ConversionError::time(record(), "scheduled_arrival", &scheduled_raw, e))?;
    let delay = parse_delay(&delay_raw)
        .map_err(|e| ConversionError::time(record(), "delay_in_arrival", &delay_raw, e))?;
    let scheduled_arrival = apply_delay(scheduled, delay)
        .map_err(|e| ConversionError::time(record(), "delay_in_arrival", &delay_raw, e))?;

    Ok(Some(TrainArrival {
        train_no,
        train_name: entry.train_name.clone(),
        scheduled_arrival,
        current_station: entry.cur_stn.clone().unwrap_or_default(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::live_station::TrainNumber;

    fn entry(no: &str, arrival: &str, delay: &str) -> LiveTrainEntry {
        LiveTrainEntry {
            train_no: TrainNumber::Text(no.to_string()),
            train_name: format!("Train {no}"),
            scheduled_arrival: Some(arrival.to_string()),
            delay_in_arrival: Some(delay.to_string()),
            cur_stn: Some("ERN".to_string()),
            diverted: false,
            cancelled: false,
            arrived: false,
        }
    }

    fn board(entries: Vec<LiveTrainEntry>) -> LiveStationBoard {
        LiveStationBoard {
            live_station_info: entries,
        }
    }

    #[test]
    fn converts_on_time_train() {
        let arrival = convert_entry(&entry("123", "2024-05-01T10:00:00+05:30", "RIGHT TIME"))
            .unwrap()
            .unwrap();

        assert_eq!(arrival.train_no, "123");
        assert_eq!(arrival.train_name, "Train 123");
        assert_eq!(arrival.current_station, "ERN");
        assert_eq!(
            arrival.scheduled_arrival,
            parse_timestamp("2024-05-01T10:00:00+05:30").unwrap()
        );
    }

    #[test]
    fn applies_delay() {
        let arrival = convert_entry(&entry("123", "2024-05-01T10:00:00+05:30", "00:15"))
            .unwrap()
            .unwrap();

        assert_eq!(
            arrival.scheduled_arrival,
            parse_timestamp("2024-05-01T10:15:00+05:30").unwrap()
        );
    }

    #[test]
    fn filters_flagged_trains() {
        let mut diverted = entry("1", "2024-05-01T10:00:00+05:30", "RIGHT TIME");
        diverted.diverted = true;
        let mut cancelled = entry("2", "2024-05-01T10:00:00+05:30", "RIGHT TIME");
        cancelled.cancelled = true;
        let mut arrived = entry("3", "2024-05-01T10:00:00+05:30", "RIGHT TIME");
        arrived.arrived = true;
        let running = entry("4", "2024-05-01T10:00:00+05:30", "RIGHT TIME");

        let arrivals = convert_board(&board(vec![diverted, cancelled, arrived, running])).unwrap();

        assert_eq!(arrivals.len(), 1);
        assert_eq!(arrivals[0].train_no, "4");
    }

    #[test]
    fn flagged_train_with_bad_time_is_still_skipped() {
        let mut cancelled = entry("1", "not a time", "whenever");
        cancelled.cancelled = true;

        assert_eq!(convert_entry(&cancelled).unwrap(), None);
    }

    #[test]
    fn flagged_train_with_null_times_is_skipped() {
        let mut cancelled = entry("1", "", "");
        cancelled.cancelled = true;
        cancelled.scheduled_arrival = None;
        cancelled.delay_in_arrival = None;
        let running = entry("2", "2024-05-01T10:00:00+05:30", "RIGHT TIME");

        let arrivals = convert_board(&board(vec![cancelled, running])).unwrap();

        assert_eq!(arrivals.len(), 1);
        assert_eq!(arrivals[0].train_no, "2");
    }

    #[test]
    fn running_train_with_null_time_fails_board() {
        let mut missing_schedule = entry("5", "", "RIGHT TIME");
        missing_schedule.scheduled_arrival = None;

        let err = convert_board(&board(vec![missing_schedule])).unwrap_err();
        assert_eq!(err.record, "train 5");
        assert_eq!(err.field, "scheduled_arrival");
        assert_eq!(err.source, TimeError::missing());

        let mut missing_delay = entry("6", "2024-05-01T10:00:00+05:30", "");
        missing_delay.delay_in_arrival = None;

        let err = convert_entry(&missing_delay).unwrap_err();
        assert_eq!(err.field, "delay_in_arrival");
    }

    #[test]
    fn keeps_feed_order() {
        let arrivals = convert_board(&board(vec![
            entry("3", "2024-05-01T12:00:00+05:30", "RIGHT TIME"),
            entry("1", "2024-05-01T09:00:00+05:30", "RIGHT TIME"),
            entry("2", "2024-05-01T10:00:00+05:30", "RIGHT TIME"),
        ]))
        .unwrap();

        let numbers: Vec<_> = arrivals.iter().map(|a| a.train_no.as_str()).collect();
        assert_eq!(numbers, ["3", "1", "2"]);
    }

    #[test]
    fn bad_delay_fails_board() {
        let result = convert_board(&board(vec![
            entry("1", "2024-05-01T10:00:00+05:30", "RIGHT TIME"),
            entry("2", "2024-05-01T10:00:00+05:30", "-00:05"),
        ]));

        let err = result.unwrap_err();
        assert_eq!(err.record, "train 2");
        assert_eq!(err.field, "delay_in_arrival");
        assert_eq!(err.value, "-00:05");
    }

    #[test]
    fn bad_schedule_names_schedule_field() {
        let err = convert_entry(&entry("7", "2024-05-01 10:00", "00:05")).unwrap_err();
        assert_eq!(err.field, "scheduled_arrival");
        assert_eq!(err.value, "2024-05-01 10:00");
    }

    #[test]
    fn missing_current_station_is_empty() {
        let mut e = entry("1", "2024-05-01T10:00:00+05:30", "RIGHT TIME");
        e.cur_stn = None;

        let arrival = convert_entry(&e).unwrap().unwrap();
        assert_eq!(arrival.current_station, "");
    }

    #[test]
    fn empty_board() {
        assert!(convert_board(&board(vec![])).unwrap().is_empty());
    }
}
