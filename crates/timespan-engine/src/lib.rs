//! # timespan-engine
//!
//! Deterministic time span computation for scheduling and availability checks.
//!
//! A span is either a weekly recurring window (`"Mon-Fri 07:00-16:00 UTC"`) or
//! a single absolute interval between two instants. The engine answers two
//! questions: "is this instant inside the span?" and "do these two spans
//! share any instant?", for any combination of span kinds.
//!
//! All functions are pure: no clock access, no shared state, no I/O beyond the
//! timezone lookup done while parsing.
//!
//! ## Modules
//!
//! - [`range`] — Weekday and time-of-day range predicates with wraparound
//! - [`relative`] — Weekly recurring spans: parser, containment, materialization
//! - [`absolute`] — Half-open calendar intervals
//! - [`span`] — The two-variant [`TimeSpan`] and the [`ContainsInstant`] capability
//! - [`overlap`](mod@overlap) — Overlap detection across span kinds
//! - [`error`] — Error types

pub mod absolute;
pub mod error;
pub mod overlap;
pub mod range;
pub mod relative;
pub mod span;

pub use absolute::AbsoluteTimeSpan;
pub use error::{SpanError, SpanSegment};
pub use overlap::{overlap, overlap_with_options, OverlapOptions};
pub use range::{is_time_of_day_in_range, is_weekday_in_range, time_of_day};
pub use relative::{parse_relative_span, IanaZoneResolver, RelativeTimeSpan, ZoneResolver};
pub use span::{parse_time_span, ContainsInstant, TimeSpan};
