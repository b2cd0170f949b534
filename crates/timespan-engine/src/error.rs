//! Error types for timespan-engine operations.

use std::fmt;

use thiserror::Error;

/// The segment of a relative span string that failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanSegment {
    /// Wrong token count or missing `-` separators.
    Structure,
    /// Unrecognized weekday abbreviation.
    Weekday,
    /// Time not in strict `HH:MM` form.
    Time,
    /// Timezone name the resolver does not know.
    Timezone,
}

impl fmt::Display for SpanSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpanSegment::Structure => "structure",
            SpanSegment::Weekday => "weekday",
            SpanSegment::Time => "time",
            SpanSegment::Timezone => "timezone",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpanError {
    #[error("Malformed relative time span ({segment}): {detail}")]
    MalformedRelativeSpan { segment: SpanSegment, detail: String },

    #[error("Invalid absolute time span: {0}")]
    InvalidAbsoluteSpan(String),
}

impl SpanError {
    pub(crate) fn malformed(segment: SpanSegment, detail: impl Into<String>) -> Self {
        SpanError::MalformedRelativeSpan {
            segment,
            detail: detail.into(),
        }
    }

    /// The failing segment, if this is a relative span parse error.
    pub fn segment(&self) -> Option<SpanSegment> {
        match self {
            SpanError::MalformedRelativeSpan { segment, .. } => Some(*segment),
            SpanError::InvalidAbsoluteSpan(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SpanError>;
