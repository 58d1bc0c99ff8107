//! Conversion from events API DTOs to domain types.

use crate::domain::{ConversionError, Event, parse_timestamp};

use super::types::EventList;

/// Convert the event list, in API order.
///
/// A single malformed start date fails the whole list.
pub fn convert_events(list: &EventList) -> Result<Vec<Event>, ConversionError> {
    list.data
        .iter()
        .map(|entry| {
            let date = parse_timestamp(&entry.start_date).map_err(|e| {
                ConversionError::time(
                    format!("event {:?}", entry.name),
                    "startDate",
                    &entry.start_date,
                    e,
                )
            })?;

            Ok(Event {
                name: entry.name.clone(),
                description: entry.description.clone().unwrap_or_default(),
                date,
            })
        })
        .collect()
}
