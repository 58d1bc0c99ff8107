//! Train arrival types.
//!
//! A `TrainArrival` is one live-station board entry that survived
//! filtering: not diverted, not cancelled, not yet arrived. Its arrival
//! time already includes the reported delay.

use super::FeedTime;

/// A train expected at one of the monitored stations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainArrival {
    /// Train number (e.g., "16305")
    pub train_no: String,
    /// Display name (e.g., "Ernakulam Express")
    pub train_name: String,
    /// Expected arrival, delay already applied
    pub scheduled_arrival: FeedTime,
    /// Station code where the train currently is
    pub current_station: String,
}

impl TrainArrival {
    /// Creates a new train arrival.
    pub fn new(
        train_no: impl Into<String>,
        train_name: impl Into<String>,
        scheduled_arrival: FeedTime,
        current_station: impl Into<String>,
    ) -> Self {
        Self {
            train_no: train_no.into(),
            train_name: train_name.into(),
            scheduled_arrival,
            current_station: current_station.into(),
        }
    }

    /// Display label combining name and number, e.g. `"Express (123)"`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.train_name, self.train_no)
    }
}
