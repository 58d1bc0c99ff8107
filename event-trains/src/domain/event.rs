//! Community event types.

use super::FeedTime;

/// An upcoming event from the events feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Event title
    pub name: String,
    /// Free-form description (empty when the feed sends none)
    pub description: String,
    /// Start time
    pub date: FeedTime,
}

impl Event {
    /// Creates a new event.
    pub fn new(name: impl Into<String>, description: impl Into<String>, date: FeedTime) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            date,
        }
    }
}
