//! Overlap detection across any combination of span kinds.
//!
//! Two spans overlap when at least one instant lies inside both.
//!
//! - **Absolute × Absolute** is an exact closed-open interval test.
//! - **Relative × Relative** materializes both weekly windows over the same
//!   reference dates and intersects the concrete intervals pairwise.
//! - **Relative × Absolute** materializes the weekly window over the local
//!   dates the absolute span touches and intersects.
//!
//! Every case is symmetric: `overlap(a, b) == overlap(b, a)`.

use chrono::{Duration, NaiveDate};
use tracing::trace;

use crate::absolute::AbsoluteTimeSpan;
use crate::relative::RelativeTimeSpan;
use crate::span::TimeSpan;

/// Local dates materialized before and after each reference week.
///
/// UTC offsets are at most 26 hours apart, so two days on each side leave a
/// full week in which both spans are materialized completely.
const REFERENCE_MARGIN_DAYS: i64 = 2;

/// An absolute span longer than this holds every local weekday at least twice
/// in any zone, so a DST gap cannot swallow every occurrence of a window.
const FULL_COVERAGE_DAYS: i64 = 15;

/// First Sunday of the default reference weeks.
const REFERENCE_YEAR_START: (i32, u32, u32) = (2023, 12, 31);

/// Every week of the reference year, so each pairing of two zones' DST states
/// (including the weeks where one zone has switched and the other has not) is
/// compared at least once.
const REFERENCE_WEEK_COUNT: i64 = 53;

/// Options for [`overlap_with_options`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlapOptions {
    /// First day of each week used to compare two relative spans. An empty
    /// list falls back to the defaults.
    pub reference_weeks: Vec<NaiveDate>,
}

impl Default for OverlapOptions {
    fn default() -> Self {
        Self {
            reference_weeks: default_reference_weeks(),
        }
    }
}

fn default_reference_weeks() -> Vec<NaiveDate> {
    let (y, m, d) = REFERENCE_YEAR_START;
    let Some(start) = NaiveDate::from_ymd_opt(y, m, d) else {
        return Vec::new();
    };
    (0..REFERENCE_WEEK_COUNT)
        .filter_map(|week| start.checked_add_signed(Duration::weeks(week)))
        .collect()
}

/// Do `a` and `b` share at least one instant?
///
/// Uses the default [`OverlapOptions`]. See [`overlap_with_options`].
///
/// # Examples
///
/// ```
/// use timespan_engine::{overlap, TimeSpan};
///
/// let office: TimeSpan = "Mon-Fri 08:00-20:00 UTC".parse().unwrap();
/// let meeting: TimeSpan = "Mon-Mon 12:00-18:00 UTC".parse().unwrap();
/// let late: TimeSpan = "Tue-Tue 22:00-23:00 UTC".parse().unwrap();
///
/// assert!(overlap(&office, &meeting));
/// assert!(!overlap(&office, &late));
/// ```
pub fn overlap(a: &TimeSpan, b: &TimeSpan) -> bool {
    overlap_with_options(a, b, &OverlapOptions::default())
}

/// Do `a` and `b` share at least one instant?
///
/// Relative spans recur weekly in their own timezone and cannot be reduced to
/// one interval. Two relative spans are compared over each reference week in
/// `options`; a relative and an absolute span are compared over the dates the
/// absolute span covers.
pub fn overlap_with_options(a: &TimeSpan, b: &TimeSpan, options: &OverlapOptions) -> bool {
    match (a, b) {
        (TimeSpan::Absolute(a), TimeSpan::Absolute(b)) => a.intersects(b),
        (TimeSpan::Relative(a), TimeSpan::Relative(b)) => relative_overlap(a, b, options),
        (TimeSpan::Relative(r), TimeSpan::Absolute(x))
        | (TimeSpan::Absolute(x), TimeSpan::Relative(r)) => relative_absolute_overlap(r, x),
    }
}

fn relative_overlap(a: &RelativeTimeSpan, b: &RelativeTimeSpan, options: &OverlapOptions) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }

    let weeks = if options.reference_weeks.is_empty() {
        default_reference_weeks()
    } else {
        options.reference_weeks.clone()
    };

    weeks.iter().any(|&week| {
        let first = week.checked_sub_signed(Duration::days(REFERENCE_MARGIN_DAYS));
        let last = week.checked_add_signed(Duration::days(6 + REFERENCE_MARGIN_DAYS));
        let (Some(first), Some(last)) = (first, last) else {
            return false;
        };

        let spans_a = a.occurrences(first, last);
        let spans_b = b.occurrences(first, last);
        trace!(
            %week,
            a = spans_a.len(),
            b = spans_b.len(),
            "comparing relative spans over reference week"
        );

        any_intersection(&spans_a, &spans_b)
    })
}

fn relative_absolute_overlap(relative: &RelativeTimeSpan, absolute: &AbsoluteTimeSpan) -> bool {
    if relative.is_empty() || absolute.is_empty() {
        return false;
    }
    if absolute.duration() > Duration::days(FULL_COVERAGE_DAYS) {
        trace!(%absolute, "absolute span covers every weekday");
        return true;
    }

    let tz = relative.timezone();
    let first = absolute.from().with_timezone(&tz).date_naive();
    let last = absolute.to().with_timezone(&tz).date_naive();
    let first = first.checked_sub_signed(Duration::days(1)).unwrap_or(first);
    let last = last.checked_add_signed(Duration::days(1)).unwrap_or(last);

    relative
        .occurrences(first, last)
        .iter()
        .any(|occurrence| occurrence.intersects(absolute))
}

/// Pairwise intersection over two interval lists, each sorted by start.
fn any_intersection(a: &[AbsoluteTimeSpan], b: &[AbsoluteTimeSpan]) -> bool {
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if a[i].intersects(&b[j]) {
            return true;
        }
        // Advance whichever interval ends first; it cannot meet anything later.
        if a[i].to() <= b[j].to() {
            i += 1;
        } else {
            j += 1;
        }
    }
    false
}

// ── Tests ───────────────────────────────────────────────────────────────────
