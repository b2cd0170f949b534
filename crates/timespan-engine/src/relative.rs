//! Relative time spans: a window that recurs every week.
//!
//! A relative span is written as
//!
//! ```text
//! <WeekdayFrom>-<WeekdayTo> <HH:MM>-<HH:MM> <Timezone>
//! ```
//!
//! e.g. `"Mon-Fri 07:00-16:00 Europe/Berlin"`. Weekday and time comparisons
//! happen in the span's own timezone. An instant is inside the span when its
//! local weekday is in the (inclusive, possibly wrapping) weekday range AND its
//! local time of day is in the (half-open, possibly midnight-crossing) time
//! range. Both checks look at the same local date: `Sat-Sun 20:00-06:00`
//! contains Saturday 03:00 and Sunday 22:00, but not Monday 03:00.
//!
//! # Grammar
//!
//! Parsing is strict and never guesses:
//! - exactly three tokens separated by single spaces
//! - weekdays are `Mon`, `Tue`, `Wed`, `Thu`, `Fri`, `Sat`, `Sun` (case-sensitive)
//! - times are zero-padded 24-hour `HH:MM`, no seconds
//! - the timezone is any name the [`ZoneResolver`] knows (IANA names by default)

use std::fmt;
use std::str::FromStr;

use chrono::{
    DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc,
    Weekday,
};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::absolute::AbsoluteTimeSpan;
use crate::error::{Result, SpanError, SpanSegment};
use crate::range::{is_time_of_day_in_range, is_weekday_in_range};

/// Upper bound on any UTC offset, historical local mean time included.
const MAX_OFFSET_HOURS: i64 = 16;

/// Step used to look for UTC offset changes around a local interval.
const TRANSITION_SCAN_HOURS: i64 = 6;

// ── Timezone resolution ─────────────────────────────────────────────────────

/// Resolves a timezone name into a [`Tz`].
///
/// The parser calls the resolver exactly once per parse, for the third token.
pub trait ZoneResolver {
    fn resolve(&self, name: &str) -> Option<Tz>;
}

/// Looks names up in the IANA database bundled with `chrono-tz`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IanaZoneResolver;

impl ZoneResolver for IanaZoneResolver {
    fn resolve(&self, name: &str) -> Option<Tz> {
        name.parse::<Tz>().ok()
    }
}

impl<F> ZoneResolver for F
where
    F: Fn(&str) -> Option<Tz>,
{
    fn resolve(&self, name: &str) -> Option<Tz> {
        self(name)
    }
}

// ── RelativeTimeSpan ────────────────────────────────────────────────────────

/// A weekly recurring window in a fixed timezone.
///
/// Bounds are stored verbatim: `weekday_from` may come after `weekday_to` in
/// the week and `time_from` may be later than `time_to`; both denote ranges
/// that wrap around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelativeTimeSpan {
    timezone: Tz,
    weekday_from: Weekday,
    weekday_to: Weekday,
    time_from: NaiveTime,
    time_to: NaiveTime,
}

impl RelativeTimeSpan {
    /// Build a span from its parts. Bounds are stored as given; a `from` later
    /// than its `to` wraps around.
    pub fn new(
        timezone: Tz,
        weekday_from: Weekday,
        weekday_to: Weekday,
        time_from: NaiveTime,
        time_to: NaiveTime,
    ) -> Self {
        Self {
            timezone,
            weekday_from,
            weekday_to,
            time_from,
            time_to,
        }
    }

    /// Parse a span, resolving its timezone with `resolver`.
    ///
    /// # Errors
    ///
    /// Returns [`SpanError::MalformedRelativeSpan`] naming the failing
    /// segment: the overall structure, a weekday, a time, or the timezone.
    pub fn parse_with_resolver<R: ZoneResolver + ?Sized>(s: &str, resolver: &R) -> Result<Self> {
        parse(s, resolver)
            .inspect_err(|e| debug!(input = s, error = %e, "rejected relative span"))
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn weekday_from(&self) -> Weekday {
        self.weekday_from
    }

    pub fn weekday_to(&self) -> Weekday {
        self.weekday_to
    }

    pub fn time_from(&self) -> NaiveTime {
        self.time_from
    }

    pub fn time_to(&self) -> NaiveTime {
        self.time_to
    }

    /// A span with equal time bounds can never contain an instant.
    pub fn is_empty(&self) -> bool {
        self.time_from == self.time_to
    }

    /// Is `weekday` within this span's weekday range?
    pub fn is_weekday_in_range(&self, weekday: Weekday) -> bool {
        is_weekday_in_range(self.weekday_from, self.weekday_to, weekday)
    }

    /// Is `time` within this span's time-of-day range?
    pub fn is_time_of_day_in_range(&self, time: NaiveTime) -> bool {
        is_time_of_day_in_range(self.time_from, self.time_to, time)
    }

    /// Does the weekly window contain `instant`?
    pub fn contains<Z: TimeZone>(&self, instant: &DateTime<Z>) -> bool {
        let local = instant.with_timezone(&self.timezone);
        self.is_weekday_in_range(local.weekday()) && self.is_time_of_day_in_range(local.time())
    }

    /// Materialize the window over the local dates `first..=last`.
    ///
    /// Returns the concrete intervals, in date order, whose union is exactly
    /// the set of instants on those local dates that [`contains`](Self::contains)
    /// accepts. A window crossing midnight contributes two intervals per date:
    /// the early-morning tail and the late-evening head. A fall-back DST
    /// transition can split an interval in two.
    pub fn occurrences(&self, first: NaiveDate, last: NaiveDate) -> Vec<AbsoluteTimeSpan> {
        let mut spans = Vec::new();

        for date in first.iter_days().take_while(|d| *d <= last) {
            if !self.is_weekday_in_range(date.weekday()) {
                continue;
            }
            let Some(next_midnight) = date.succ_opt().map(|d| d.and_time(NaiveTime::MIN)) else {
                break;
            };

            let tz = &self.timezone;
            if self.time_from < self.time_to {
                let (from, to) = (date.and_time(self.time_from), date.and_time(self.time_to));
                push_local_interval(tz, from, to, &mut spans);
            } else if self.time_from > self.time_to {
                let midnight = date.and_time(NaiveTime::MIN);
                push_local_interval(tz, midnight, date.and_time(self.time_to), &mut spans);
                push_local_interval(tz, date.and_time(self.time_from), next_midnight, &mut spans);
            }
        }

        spans
    }
}

/// Push every instant whose wall-clock time in `tz` falls in `[from, to)`.
///
/// The UTC window `[from - 16h, to + 16h]` holds the whole preimage. It is
/// walked in 6-hour steps and cut at each offset change found between steps;
/// every constant-offset segment contributes the shifted interval clipped to
/// that segment. A DST gap shrinks the result, a fall-back repeat can split
/// it in two. Two changes closer together than one step are not told apart.
fn push_local_interval(
    tz: &Tz,
    from: NaiveDateTime,
    to: NaiveDateTime,
    out: &mut Vec<AbsoluteTimeSpan>,
) {
    let reach = Duration::hours(MAX_OFFSET_HOURS);
    let (Some(lo), Some(hi)) = (from.checked_sub_signed(reach), to.checked_add_signed(reach))
    else {
        return;
    };
    let (lo, hi) = (lo.and_utc(), hi.and_utc());
    let step = Duration::hours(TRANSITION_SCAN_HOURS);

    let mut segment_start = lo;
    let mut offset = utc_offset(tz, lo);
    let mut cursor = lo;
    while cursor < hi {
        let next = cursor.checked_add_signed(step).map_or(hi, |t| t.min(hi));
        if utc_offset(tz, next) == offset {
            cursor = next;
            continue;
        }
        let transition = find_transition(tz, cursor, next, offset);
        push_nonempty(
            out,
            shift(from, offset).max(segment_start),
            shift(to, offset).min(transition),
        );
        segment_start = transition;
        offset = utc_offset(tz, transition);
        cursor = transition;
    }
    push_nonempty(out, shift(from, offset).max(segment_start), shift(to, offset).min(hi));
}

fn push_nonempty(out: &mut Vec<AbsoluteTimeSpan>, from: DateTime<Utc>, to: DateTime<Utc>) {
    if from < to {
        out.push(AbsoluteTimeSpan::new(from, to));
    }
}

/// The instant at which `local` wall-clock time occurs under `offset`.
fn shift(local: NaiveDateTime, offset: Duration) -> DateTime<Utc> {
    (local - offset).and_utc()
}

fn utc_offset(tz: &Tz, instant: DateTime<Utc>) -> Duration {
    let seconds = instant.with_timezone(tz).offset().fix().local_minus_utc();
    Duration::seconds(i64::from(seconds))
}

/// First whole second in `(lo, hi]` whose offset differs from `before`.
fn find_transition(
    tz: &Tz,
    lo: DateTime<Utc>,
    hi: DateTime<Utc>,
    before: Duration,
) -> DateTime<Utc> {
    let (mut lo_secs, mut hi_secs) = (lo.timestamp(), hi.timestamp());
    while hi_secs - lo_secs > 1 {
        let mid = lo_secs + (hi_secs - lo_secs) / 2;
        match DateTime::from_timestamp(mid, 0) {
            Some(t) if utc_offset(tz, t) == before => lo_secs = mid,
            _ => hi_secs = mid,
        }
    }
    DateTime::from_timestamp(hi_secs, 0).unwrap_or(hi)
}

impl fmt::Display for RelativeTimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{} {}-{} {}",
            weekday_abbrev(self.weekday_from),
            weekday_abbrev(self.weekday_to),
            self.time_from.format("%H:%M"),
            self.time_to.format("%H:%M"),
            self.timezone.name()
        )
    }
}

impl FromStr for RelativeTimeSpan {
    type Err = SpanError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_with_resolver(s, &IanaZoneResolver)
    }
}

/// Serialized as its grammar string, e.g. `"Mon-Fri 07:00-16:00 UTC"`.
impl Serialize for RelativeTimeSpan {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RelativeTimeSpan {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Parse a relative span string using the bundled IANA timezone database.
///
/// # Examples
///
/// ```
/// use chrono::Weekday;
/// use timespan_engine::parse_relative_span;
///
/// let span = parse_relative_span("Mon-Fri 07:00-16:00 UTC").unwrap();
/// assert_eq!(span.weekday_from(), Weekday::Mon);
/// assert_eq!(span.weekday_to(), Weekday::Fri);
/// assert_eq!(span.to_string(), "Mon-Fri 07:00-16:00 UTC");
/// ```
pub fn parse_relative_span(s: &str) -> Result<RelativeTimeSpan> {
    s.parse()
}

// ── Parsing helpers ─────────────────────────────────────────────────────────

fn parse<R: ZoneResolver + ?Sized>(s: &str, resolver: &R) -> Result<RelativeTimeSpan> {
    let tokens: Vec<&str> = s.split(' ').collect();
    let &[weekdays, times, zone] = tokens.as_slice() else {
        return Err(SpanError::malformed(
            SpanSegment::Structure,
            format!(
                "expected 3 space-separated tokens, found {} in '{s}'",
                tokens.len()
            ),
        ));
    };

    let (weekday_from, weekday_to) = split_range(weekdays)?;
    let (time_from, time_to) = split_range(times)?;

    let weekday_from = parse_weekday(weekday_from)?;
    let weekday_to = parse_weekday(weekday_to)?;
    let time_from = parse_hh_mm(time_from)?;
    let time_to = parse_hh_mm(time_to)?;

    let timezone = resolver.resolve(zone).ok_or_else(|| {
        SpanError::malformed(SpanSegment::Timezone, format!("unknown timezone '{zone}'"))
    })?;

    Ok(RelativeTimeSpan {
        timezone,
        weekday_from,
        weekday_to,
        time_from,
        time_to,
    })
}

/// Split `"a-b"` on its single `-`.
fn split_range(token: &str) -> Result<(&str, &str)> {
    match token.split_once('-') {
        Some((from, to)) if !to.contains('-') => Ok((from, to)),
        _ => Err(SpanError::malformed(
            SpanSegment::Structure,
            format!("expected '<from>-<to>', found '{token}'"),
        )),
    }
}

fn parse_weekday(s: &str) -> Result<Weekday> {
    match s {
        "Mon" => Ok(Weekday::Mon),
        "Tue" => Ok(Weekday::Tue),
        "Wed" => Ok(Weekday::Wed),
        "Thu" => Ok(Weekday::Thu),
        "Fri" => Ok(Weekday::Fri),
        "Sat" => Ok(Weekday::Sat),
        "Sun" => Ok(Weekday::Sun),
        _ => Err(SpanError::malformed(
            SpanSegment::Weekday,
            format!("unknown weekday '{s}'"),
        )),
    }
}

fn weekday_abbrev(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// Strict `HH:MM`: exactly two digits, a colon, two digits.
fn parse_hh_mm(s: &str) -> Result<NaiveTime> {
    let invalid =
        || SpanError::malformed(SpanSegment::Time, format!("expected HH:MM, found '{s}'"));

    let bytes = s.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return Err(invalid());
    }
    let digits = [bytes[0], bytes[1], bytes[3], bytes[4]];
    if !digits.iter().all(u8::is_ascii_digit) {
        return Err(invalid());
    }
    let [h1, h0, m1, m0] = digits.map(|b| u32::from(b - b'0'));

    NaiveTime::from_hms_opt(h1 * 10 + h0, m1 * 10 + m0, 0).ok_or_else(invalid)
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn segment_of(input: &str) -> SpanSegment {
        parse_relative_span(input).unwrap_err().segment().unwrap()
    }

    // ── parsing ─────────────────────────────────────────────────────────

    #[test]
    fn test_parse_valid() {
        let span = parse_relative_span("Mon-Fri 07:00-16:00 UTC").unwrap();
        assert_eq!(
            span,
            RelativeTimeSpan::new(Tz::UTC, Weekday::Mon, Weekday::Fri, hm(7, 0), hm(16, 0))
        );
    }

    #[test]
    fn test_parse_reverse_kept_verbatim() {
        let span = parse_relative_span("Sat-Sun 20:00-06:00 UTC").unwrap();
        assert_eq!(span.weekday_from(), Weekday::Sat);
        assert_eq!(span.weekday_to(), Weekday::Sun);
        assert_eq!(span.time_from(), hm(20, 0));
        assert_eq!(span.time_to(), hm(6, 0));
        assert_eq!(span.timezone(), Tz::UTC);
    }

    #[test]
    fn test_new_keeps_reversed_bounds() {
        let span = RelativeTimeSpan::new(Tz::UTC, Weekday::Fri, Weekday::Mon, hm(22, 0), hm(3, 0));
        assert_eq!(span.weekday_from(), Weekday::Fri);
        assert_eq!(span.time_from(), hm(22, 0));
        assert_eq!(span.to_string(), "Fri-Mon 22:00-03:00 UTC");
        // Sun Jan 7 2024, both ranges wrapped
        assert!(span.contains(&utc(2024, 1, 7, 23, 0)));
        assert!(span.contains(&utc(2024, 1, 7, 2, 0)));
        assert!(!span.contains(&utc(2024, 1, 10, 23, 0)));
    }

    #[test]
    fn test_parse_iana_zone() {
        let span = parse_relative_span("Tue-Thu 09:30-17:45 America/New_York").unwrap();
        assert_eq!(span.timezone(), Tz::America__New_York);
        assert_eq!(span.time_from(), hm(9, 30));
        assert_eq!(span.time_to(), hm(17, 45));
    }

    #[test]
    fn test_parse_invalid_timezone() {
        assert_eq!(segment_of("Mon-Fri 07:00-16:00 Invalid"), SpanSegment::Timezone);
    }

    #[test]
    fn test_parse_invalid_minute() {
        assert_eq!(segment_of("Mon-Fri 03:00-04:0 UTC"), SpanSegment::Time);
    }

    #[test]
    fn test_parse_invalid_times() {
        for input in [
            "Mon-Fri 24:00-16:00 UTC",
            "Mon-Fri 07:60-16:00 UTC",
            "Mon-Fri 7:00-16:00 UTC",
            "Mon-Fri 07:00-16:00:00 UTC",
            "Mon-Fri 07h00-16:00 UTC",
            "Mon-Fri +7:00-16:00 UTC",
        ] {
            assert_eq!(segment_of(input), SpanSegment::Time, "{input}");
        }
    }

    #[test]
    fn test_parse_invalid_weekday() {
        assert_eq!(segment_of("Mon-Fry 07:00-16:00 UTC"), SpanSegment::Weekday);
        assert_eq!(segment_of("mon-fri 07:00-16:00 UTC"), SpanSegment::Weekday);
        assert_eq!(segment_of("Monday-Friday 07:00-16:00 UTC"), SpanSegment::Weekday);
    }

    #[test]
    fn test_parse_invalid_structure() {
        for input in [
            "",
            "Mon-Fri 07:00-16:00",
            "Mon-Fri 07:00-16:00 UTC extra",
            "Mon-Fri  07:00-16:00 UTC",
            "MonFri 07:00-16:00 UTC",
            "Mon-Fri 07:00 UTC",
            "Mon-Fri-Sat 07:00-16:00 UTC",
        ] {
            assert_eq!(segment_of(input), SpanSegment::Structure, "{input:?}");
        }
    }

    #[test]
    fn test_parse_error_message_names_segment() {
        let err = parse_relative_span("Mon-Fri 07:00-16:00 Mars/Olympus").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("timezone"), "{msg}");
        assert!(msg.contains("Mars/Olympus"), "{msg}");
    }

    #[test]
    fn test_parse_with_custom_resolver() {
        let resolver = |name: &str| match name {
            "Office" => Some(Tz::Europe__Berlin),
            _ => None,
        };
        let span =
            RelativeTimeSpan::parse_with_resolver("Mon-Fri 08:00-17:00 Office", &resolver).unwrap();
        assert_eq!(span.timezone(), Tz::Europe__Berlin);

        let err = RelativeTimeSpan::parse_with_resolver("Mon-Fri 08:00-17:00 UTC", &resolver)
            .unwrap_err();
        assert_eq!(err.segment(), Some(SpanSegment::Timezone));
    }

    #[test]
    fn test_display_round_trips() {
        for input in [
            "Mon-Fri 07:00-16:00 UTC",
            "Sat-Sun 20:00-06:00 UTC",
            "Fri-Mon 22:15-03:45 Asia/Kolkata",
        ] {
            assert_eq!(parse_relative_span(input).unwrap().to_string(), input);
        }
    }

    // ── contains ────────────────────────────────────────────────────────

    #[test]
    fn test_contains_business_hours() {
        let span = parse_relative_span("Mon-Fri 07:00-16:00 UTC").unwrap();
        // Wed Jan 10 2024
        assert!(span.contains(&utc(2024, 1, 10, 7, 0)));
        assert!(span.contains(&utc(2024, 1, 10, 15, 59)));
        assert!(!span.contains(&utc(2024, 1, 10, 16, 0)));
        // Sat Jan 13 2024
        assert!(!span.contains(&utc(2024, 1, 13, 10, 0)));
    }

    #[test]
    fn test_contains_uses_span_timezone() {
        let span = parse_relative_span("Mon-Fri 09:00-17:00 America/New_York").unwrap();
        // Mon Jan 8 2024 14:00 UTC = 09:00 EST
        assert!(span.contains(&utc(2024, 1, 8, 14, 0)));
        assert!(!span.contains(&utc(2024, 1, 8, 13, 59)));
        // Sat Jan 13 2024 03:00 UTC is still Friday 22:00 in New York, outside the hours
        assert!(!span.contains(&utc(2024, 1, 13, 3, 0)));
        // Jul 8 2024 13:00 UTC = 09:00 EDT
        assert!(span.contains(&utc(2024, 7, 8, 13, 0)));
    }

    #[test]
    fn test_contains_weekday_follows_zone() {
        // Mon Jan 8 2024 23:30 UTC is Tuesday 05:00 in Kolkata
        let span = parse_relative_span("Tue-Tue 04:00-06:00 Asia/Kolkata").unwrap();
        assert!(span.contains(&utc(2024, 1, 8, 23, 30)));
    }

    #[test]
    fn test_contains_wrapping_window() {
        let span = parse_relative_span("Sat-Sun 20:00-06:00 UTC").unwrap();
        // Sat Jan 6 2024
        assert!(span.contains(&utc(2024, 1, 6, 3, 0)));
        assert!(span.contains(&utc(2024, 1, 6, 20, 0)));
        assert!(!span.contains(&utc(2024, 1, 6, 12, 0)));
        // Sun Jan 7 2024
        assert!(span.contains(&utc(2024, 1, 7, 22, 0)));
        // Mon Jan 8 2024: early morning belongs to Monday, outside the weekday range
        assert!(!span.contains(&utc(2024, 1, 8, 3, 0)));
    }

    // ── occurrences ─────────────────────────────────────────────────────

    #[test]
    fn test_occurrences_normal_window() {
        let span = parse_relative_span("Mon-Fri 08:00-20:00 UTC").unwrap();
        // Sun Jan 7 .. Sat Jan 13 2024
        let spans = span.occurrences(date(2024, 1, 7), date(2024, 1, 13));
        assert_eq!(spans.len(), 5);
        assert_eq!(
            spans[0],
            AbsoluteTimeSpan::new(utc(2024, 1, 8, 8, 0), utc(2024, 1, 8, 20, 0))
        );
        assert_eq!(
            spans[4],
            AbsoluteTimeSpan::new(utc(2024, 1, 12, 8, 0), utc(2024, 1, 12, 20, 0))
        );
    }

    #[test]
    fn test_occurrences_crossing_midnight() {
        let span = parse_relative_span("Sat-Sat 20:00-06:00 UTC").unwrap();
        let spans = span.occurrences(date(2024, 1, 6), date(2024, 1, 6));
        assert_eq!(
            spans,
            vec![
                AbsoluteTimeSpan::new(utc(2024, 1, 6, 0, 0), utc(2024, 1, 6, 6, 0)),
                AbsoluteTimeSpan::new(utc(2024, 1, 6, 20, 0), utc(2024, 1, 7, 0, 0)),
            ]
        );
    }

    #[test]
    fn test_occurrences_until_midnight_has_no_morning_tail() {
        let span = RelativeTimeSpan::new(Tz::UTC, Weekday::Tue, Weekday::Tue, hm(22, 0), hm(0, 0));
        let spans = span.occurrences(date(2024, 1, 7), date(2024, 1, 13));
        assert_eq!(
            spans,
            vec![AbsoluteTimeSpan::new(utc(2024, 1, 9, 22, 0), utc(2024, 1, 10, 0, 0))]
        );
    }

    #[test]
    fn test_occurrences_empty_window() {
        let span = parse_relative_span("Mon-Sun 09:00-09:00 UTC").unwrap();
        assert!(span.is_empty());
        assert!(span.occurrences(date(2024, 1, 1), date(2024, 1, 31)).is_empty());
    }

    #[test]
    fn test_occurrences_in_zone() {
        let span = parse_relative_span("Mon-Mon 09:00-17:00 Europe/Berlin").unwrap();
        let spans = span.occurrences(date(2024, 7, 8), date(2024, 7, 8));
        // CEST is UTC+2
        assert_eq!(
            spans,
            vec![AbsoluteTimeSpan::new(utc(2024, 7, 8, 7, 0), utc(2024, 7, 8, 15, 0))]
        );
    }

    #[test]
    fn test_occurrences_dst_gap_start() {
        // Mar 10 2024: New York clocks jump from 02:00 to 03:00 EST→EDT (07:00 UTC)
        let span = parse_relative_span("Sun-Sun 02:30-04:00 America/New_York").unwrap();
        let spans = span.occurrences(date(2024, 3, 10), date(2024, 3, 10));
        assert_eq!(
            spans,
            vec![AbsoluteTimeSpan::new(utc(2024, 3, 10, 7, 0), utc(2024, 3, 10, 8, 0))]
        );
    }

    #[test]
    fn test_occurrences_dst_repeated_hour() {
        // Nov 3 2024: New York repeats 01:00-02:00, EDT→EST at 06:00 UTC
        let span = parse_relative_span("Sun-Sun 00:30-01:30 America/New_York").unwrap();
        let spans = span.occurrences(date(2024, 11, 3), date(2024, 11, 3));
        assert_eq!(
            spans,
            vec![
                AbsoluteTimeSpan::new(utc(2024, 11, 3, 4, 30), utc(2024, 11, 3, 5, 30)),
                AbsoluteTimeSpan::new(utc(2024, 11, 3, 6, 0), utc(2024, 11, 3, 6, 30)),
            ]
        );
    }

    #[test]
    fn test_occurrences_match_containment() {
        let span = parse_relative_span("Fri-Mon 22:00-03:00 Europe/London").unwrap();
        for (first, last) in [
            (date(2024, 3, 1), date(2024, 3, 31)),
            (date(2024, 10, 1), date(2024, 10, 31)),
        ] {
            let spans = span.occurrences(first, last);
            let mut t = first.and_time(NaiveTime::MIN).and_utc();
            let end = last.and_time(NaiveTime::MIN).and_utc();
            while t < end {
                let materialized = spans.iter().any(|s| s.contains(&t));
                assert_eq!(materialized, span.contains(&t), "{t}");
                t += Duration::minutes(15);
            }
        }
    }

    #[test]
    fn test_local_interval_across_several_offset_changes() {
        // Both 2024 New York changes fall inside the window, and the interval
        // ends inside the repeated hour. Start and end share the EST offset.
        let tz = Tz::America__New_York;
        let from = date(2024, 3, 1).and_time(NaiveTime::MIN);
        let to = date(2024, 11, 3).and_time(hm(1, 30));
        let mut spans = Vec::new();
        push_local_interval(&tz, from, to, &mut spans);

        let covered = |t: DateTime<Utc>| spans.iter().any(|s| s.contains(&t));
        assert!(covered(utc(2024, 3, 10, 7, 30)));
        assert!(covered(utc(2024, 11, 3, 5, 15)));
        // 01:45 EDT, then 01:15 EST
        assert!(!covered(utc(2024, 11, 3, 5, 45)));
        assert!(covered(utc(2024, 11, 3, 6, 15)));
        assert!(!covered(utc(2024, 11, 3, 6, 30)));

        let start = spans.iter().map(|s| s.from()).min();
        let end = spans.iter().map(|s| s.to()).max();
        assert_eq!(start, Some(utc(2024, 3, 1, 5, 0)));
        assert_eq!(end, Some(utc(2024, 11, 3, 6, 30)));
    }

    // ── serde ───────────────────────────────────────────────────────────

    #[test]
    fn test_serde_as_string() {
        let span = parse_relative_span("Mon-Fri 07:00-16:00 Europe/Berlin").unwrap();
        let json = serde_json::to_string(&span).unwrap();
        assert_eq!(json, "\"Mon-Fri 07:00-16:00 Europe/Berlin\"");
        let back: RelativeTimeSpan = serde_json::from_str(&json).unwrap();
        assert_eq!(back, span);
    }

    #[test]
    fn test_serde_rejects_malformed() {
        let result: std::result::Result<RelativeTimeSpan, _> =
            serde_json::from_str("\"Mon-Fri 7-16 UTC\"");
        assert!(result.is_err());
    }
}
