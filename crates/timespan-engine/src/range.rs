//! Weekday and time-of-day range predicates.
//!
//! Both checkers accept ranges whose lower bound is "after" the upper bound and
//! treat them as wrapping: past the end of the week for weekdays, past midnight
//! for times of day.
//!
//! Weekday bounds are inclusive on both ends. Time-of-day ranges are half-open:
//! `from` is inside, `to` is not, so a window ending at 16:00 does not contain
//! 16:00:00 itself.

use chrono::{DateTime, NaiveTime, TimeZone, Weekday};

/// Is `candidate` within the inclusive weekday range `from..=to`?
///
/// Ordinals run Sunday = 0 through Saturday = 6. When `from` is numerically
/// greater than `to` the range wraps, e.g. `Sat..=Sun` covers the weekend.
pub fn is_weekday_in_range(from: Weekday, to: Weekday, candidate: Weekday) -> bool {
    let from = from.num_days_from_sunday();
    let to = to.num_days_from_sunday();
    let candidate = candidate.num_days_from_sunday();

    if from <= to {
        from <= candidate && candidate <= to
    } else {
        candidate >= from || candidate <= to
    }
}

/// Is `candidate` within the half-open time-of-day range `[from, to)`?
///
/// When `from` is later than `to` the range crosses midnight and covers
/// `[from, 24:00) ∪ [00:00, to)`. Equal bounds describe an empty range.
pub fn is_time_of_day_in_range(from: NaiveTime, to: NaiveTime, candidate: NaiveTime) -> bool {
    if from <= to {
        from <= candidate && candidate < to
    } else {
        candidate >= from || candidate < to
    }
}

/// Project an instant onto the time-of-day domain, using the wall clock of the
/// zone it is expressed in.
pub fn time_of_day<Z: TimeZone>(instant: &DateTime<Z>) -> NaiveTime {
    instant.time()
}

// ── Tests ───────────────────────────────────────────────────────────────────
