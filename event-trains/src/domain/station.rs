//! Station code types.

use std::fmt;

/// Longest station code accepted.
const MAX_LEN: usize = 6;

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

/// A validated station code such as `ERN` or `KLMR`.
///
/// Station codes are 1 to 6 uppercase ASCII letters or digits. This type
/// guarantees that any `StationCode` value is valid by construction.
///
/// # Examples
///
/// ```
/// use event_trains::domain::StationCode;
///
/// let ern = StationCode::parse("ERN").unwrap();
/// assert_eq!(ern.as_str(), "ERN");
///
/// // Lowercase is rejected unless normalized
/// assert!(StationCode::parse("ern").is_err());
/// assert_eq!(StationCode::parse_normalized(" ern ").unwrap(), ern);
///
/// assert!(StationCode::parse("").is_err());
/// assert!(StationCode::parse("TOOLONG").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationCode(String);

impl StationCode {
    /// Parse a station code from a string.
    ///
    /// The input must be 1 to 6 uppercase ASCII letters or digits.
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        if s.is_empty() || s.len() > MAX_LEN {
            return Err(InvalidStationCode {
                reason: "must be 1 to 6 characters",
            });
        }

        if !s
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        {
            return Err(InvalidStationCode {
                reason: "must be uppercase ASCII letters or digits",
            });
        }

        Ok(StationCode(s.to_string()))
    }

    /// Parse after trimming whitespace and upper-casing.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidStationCode> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Parse a comma-separated list such as `"ERN, ers,AWY"`.
    ///
    /// Empty entries are skipped.
    pub fn parse_list(s: &str) -> Result<Vec<Self>, InvalidStationCode> {
        s.split(',')
            .filter(|part| !part.trim().is_empty())
            .map(Self::parse_normalized)
            .collect()
    }

    /// Returns the station code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.0)
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
