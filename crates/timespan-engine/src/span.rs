//! The two span kinds behind one closed type.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::absolute::AbsoluteTimeSpan;
use crate::error::{Result, SpanError};
use crate::overlap::overlap;
use crate::relative::RelativeTimeSpan;

/// "Does this span contain instant T?"
pub trait ContainsInstant {
    fn contains_instant<Z: TimeZone>(&self, instant: &DateTime<Z>) -> bool;
}

impl ContainsInstant for RelativeTimeSpan {
    fn contains_instant<Z: TimeZone>(&self, instant: &DateTime<Z>) -> bool {
        self.contains(instant)
    }
}

impl ContainsInstant for AbsoluteTimeSpan {
    fn contains_instant<Z: TimeZone>(&self, instant: &DateTime<Z>) -> bool {
        self.contains(instant)
    }
}

/// Either a weekly recurring window or a single calendar interval.
///
/// Serialized externally tagged:
///
/// ```json
/// { "relative": "Mon-Fri 07:00-16:00 UTC" }
/// { "absolute": { "from": "2024-01-01T00:00:00Z", "to": "2024-02-01T00:00:00Z" } }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeSpan {
    Relative(RelativeTimeSpan),
    Absolute(AbsoluteTimeSpan),
}

impl TimeSpan {
    /// Do the two spans share at least one instant? See [`overlap`].
    pub fn overlaps(&self, other: &TimeSpan) -> bool {
        overlap(self, other)
    }
}

impl ContainsInstant for TimeSpan {
    fn contains_instant<Z: TimeZone>(&self, instant: &DateTime<Z>) -> bool {
        match self {
            TimeSpan::Relative(span) => span.contains_instant(instant),
            TimeSpan::Absolute(span) => span.contains_instant(instant),
        }
    }
}

impl From<RelativeTimeSpan> for TimeSpan {
    fn from(span: RelativeTimeSpan) -> Self {
        TimeSpan::Relative(span)
    }
}

impl From<AbsoluteTimeSpan> for TimeSpan {
    fn from(span: AbsoluteTimeSpan) -> Self {
        TimeSpan::Absolute(span)
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeSpan::Relative(span) => fmt::Display::fmt(span, f),
            TimeSpan::Absolute(span) => fmt::Display::fmt(span, f),
        }
    }
}

impl FromStr for TimeSpan {
    type Err = SpanError;

    fn from_str(s: &str) -> Result<Self> {
        parse_time_span(s)
    }
}

/// Parse either span kind.
///
/// Input starting with a digit is read as an absolute `<RFC 3339>/<RFC 3339>`
/// interval; anything else as a relative span.
///
/// # Examples
///
/// ```
/// use timespan_engine::{parse_time_span, TimeSpan};
///
/// let weekly = parse_time_span("Mon-Fri 07:00-16:00 UTC").unwrap();
/// assert!(matches!(weekly, TimeSpan::Relative(_)));
///
/// let once = parse_time_span("2024-01-01T00:00:00Z/2024-02-01T00:00:00Z").unwrap();
/// assert!(matches!(once, TimeSpan::Absolute(_)));
/// ```
pub fn parse_time_span(s: &str) -> Result<TimeSpan> {
    if s.starts_with(|c: char| c.is_ascii_digit()) {
        s.parse::<AbsoluteTimeSpan>().map(TimeSpan::Absolute)
    } else {
        s.parse::<RelativeTimeSpan>().map(TimeSpan::Relative)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
