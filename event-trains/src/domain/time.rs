//! Feed time handling.
//!
//! Both upstream feeds send instants as `YYYY-MM-DDTHH:MM:SS±HH:MM`. The
//! live-station feed additionally reports a delay token, either the
//! sentinel `"RIGHT TIME"` or an `HH:MM` offset. This module turns those
//! into a single timezone-aware instant so the matcher never has to know
//! which feed a time came from.

use chrono::{DateTime, Duration, FixedOffset, SecondsFormat};

/// Format of every timestamp sent by the feeds.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Delay token meaning "no delay".
pub const ON_TIME: &str = "RIGHT TIME";

/// A timezone-aware instant as reported by a feed.
pub type FeedTime = DateTime<FixedOffset>;

/// Error returned when a timestamp or delay token cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }

    /// The feed sent no value at all.
    pub fn missing() -> Self {
        Self::new("value is missing")
    }

    /// Short description of what was wrong with the input.
    pub fn reason(&self) -> &'static str {
        self.reason
    }
}

/// Parse a feed timestamp with an explicit UTC offset.
///
/// # Examples
///
/// ```
/// use event_trains::domain::parse_timestamp;
///
/// let t = parse_timestamp("2024-05-01T10:00:00+05:30").unwrap();
/// assert_eq!(t.offset().local_minus_utc(), 5 * 3600 + 30 * 60);
///
/// assert!(parse_timestamp("2024-05-01T10:00:00").is_err());
/// assert!(parse_timestamp("01/05/2024 10:00").is_err());
/// ```
pub fn parse_timestamp(s: &str) -> Result<FeedTime, TimeError> {
    DateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .map_err(|_| TimeError::new("expected YYYY-MM-DDTHH:MM:SS±HH:MM"))
}

/// Parse a delay token into a duration.
///
/// `"RIGHT TIME"` is no delay. Anything else must be exactly `HH:MM`
/// with hours 00-23 and minutes 00-59.
///
/// # Examples
///
/// ```
/// use chrono::Duration;
/// use event_trains::domain::parse_delay;
///
/// assert_eq!(parse_delay("RIGHT TIME").unwrap(), Duration::zero());
/// assert_eq!(parse_delay("01:05").unwrap(), Duration::minutes(65));
///
/// assert!(parse_delay("-00:15").is_err());
/// assert!(parse_delay("1:05").is_err());
/// ```
pub fn parse_delay(token: &str) -> Result<Duration, TimeError> {
    if token == ON_TIME {
        return Ok(Duration::zero());
    }

    if token.len() != 5 {
        return Err(TimeError::new("expected HH:MM delay or RIGHT TIME"));
    }

    let bytes = token.as_bytes();

    if bytes[2] != b':' {
        return Err(TimeError::new("expected colon at position 2"));
    }

    let hours = parse_two_digits(&bytes[0..2])
        .ok_or_else(|| TimeError::new("invalid delay hour digits"))?;
    if hours > 23 {
        return Err(TimeError::new("delay hours must be 0-23"));
    }

    let minutes = parse_two_digits(&bytes[3..5])
        .ok_or_else(|| TimeError::new("invalid delay minute digits"))?;
    if minutes > 59 {
        return Err(TimeError::new("delay minutes must be 0-59"));
    }

    Ok(Duration::hours(i64::from(hours)) + Duration::minutes(i64::from(minutes)))
}

/// The expected arrival: scheduled time plus the reported delay.
///
/// # Examples
///
/// ```
/// use event_trains::domain::{effective_arrival, parse_timestamp};
///
/// let t = effective_arrival("2024-05-01T10:00:00+05:30", "00:15").unwrap();
/// assert_eq!(t, parse_timestamp("2024-05-01T10:15:00+05:30").unwrap());
/// ```
pub fn effective_arrival(scheduled: &str, delay: &str) -> Result<FeedTime, TimeError> {
    let base = parse_timestamp(scheduled)?;
    let delay = parse_delay(delay)?;
    apply_delay(base, delay)
}

/// Shift an instant by a delay, keeping its offset.
pub fn apply_delay(base: FeedTime, delay: Duration) -> Result<FeedTime, TimeError> {
    base.checked_add_signed(delay)
        .ok_or_else(|| TimeError::new("arrival out of range"))
}

/// Format an instant as RFC 3339 with whole seconds and a `±HH:MM` offset.
pub fn to_iso8601(time: &FeedTime) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}
