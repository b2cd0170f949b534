//! Absolute time spans: a single calendar interval between two instants.
//!
//! Spans are half-open, `[from, to)`. All comparisons are on the instant, so
//! the zone the endpoints were expressed in does not matter.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SpanError;

/// A single concrete interval `[from, to)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbsoluteTimeSpan {
    from: DateTime<Utc>,
    to: DateTime<Utc>,
}

impl AbsoluteTimeSpan {
    /// Build a span from two instants in any zone. A `to` at or before `from`
    /// yields an empty span, which contains nothing and overlaps nothing.
    pub fn new<A: TimeZone, B: TimeZone>(from: DateTime<A>, to: DateTime<B>) -> Self {
        Self {
            from: from.with_timezone(&Utc),
            to: to.with_timezone(&Utc),
        }
    }

    /// Inclusive start.
    pub fn from(&self) -> DateTime<Utc> {
        self.from
    }

    /// Exclusive end.
    pub fn to(&self) -> DateTime<Utc> {
        self.to
    }

    pub fn duration(&self) -> Duration {
        self.to - self.from
    }

    pub fn is_empty(&self) -> bool {
        self.from >= self.to
    }

    /// `from <= instant < to`.
    pub fn contains<Z: TimeZone>(&self, instant: &DateTime<Z>) -> bool {
        let instant = instant.with_timezone(&Utc);
        self.from <= instant && instant < self.to
    }

    /// Closed-open interval intersection.
    ///
    /// Two spans intersect when `a.from < b.to && b.from < a.to`. Adjacent
    /// spans, where one ends exactly when the other starts, do NOT intersect.
    pub fn intersects(&self, other: &AbsoluteTimeSpan) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.from < other.to && other.from < self.to
    }
}

impl fmt::Display for AbsoluteTimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.from.to_rfc3339(), self.to.to_rfc3339())
    }
}

/// Parses the ISO 8601 interval form `<RFC 3339>/<RFC 3339>`.
impl FromStr for AbsoluteTimeSpan {
    type Err = SpanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (from, to) = s
            .trim()
            .split_once('/')
            .ok_or_else(|| SpanError::InvalidAbsoluteSpan(format!("'{s}': expected 'start/end'")))?;
        Ok(Self::new(parse_rfc3339(from)?, parse_rfc3339(to)?))
    }
}

fn parse_rfc3339(s: &str) -> Result<DateTime<Utc>, SpanError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| SpanError::InvalidAbsoluteSpan(format!("'{}': {}", s, e)))
}

// ── Tests ───────────────────────────────────────────────────────────────────
