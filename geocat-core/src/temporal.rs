//! Time intervals and the interval algebra used by the similarity scorers.
//!
//! Instants use a single fixed textual form, `YYYY-MM-DDTHH:MM:SSZ`, always
//! in UTC. Parsing is strict: no offsets, no fractional seconds and no
//! alternative separators are accepted.

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use thiserror::Error;

/// Format accepted by [`parse_instant`].
pub const INSTANT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Byte length of a well-formed instant.
const INSTANT_LEN: usize = 20;

/// Seconds in one thousand 365-day years.
pub const SECONDS_PER_MILLENNIUM: i64 = 1_000 * 365 * 86_400;

/// Errors raised while parsing or validating time intervals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemporalError {
    /// The text did not have the shape of a fixed-format instant.
    #[error("timestamp {text:?} does not match {INSTANT_FORMAT}")]
    Format {
        /// Rejected input.
        text: String,
    },
    /// The text had the right shape but was not a valid instant.
    #[error("failed to parse timestamp {text:?}")]
    Parse {
        /// Rejected input.
        text: String,
        /// Underlying `chrono` failure.
        #[source]
        source: chrono::ParseError,
    },
    /// The interval ended before it started.
    #[error("interval start {start} is after end {end}")]
    Reversed {
        /// Supplied start.
        start: DateTime<Utc>,
        /// Supplied end.
        end: DateTime<Utc>,
    },
}

/// Parse a fixed-format UTC instant.
///
/// # Errors
/// Returns [`TemporalError::Format`] when the text has the wrong length or
/// does not end in `Z`, and [`TemporalError::Parse`] when `chrono` rejects
/// the fields.
///
/// # Examples
/// ```
/// use geocat_core::temporal::parse_instant;
///
/// let instant = parse_instant("2020-01-01T00:00:00Z").expect("valid instant");
/// assert_eq!(instant.timestamp(), 1_577_836_800);
/// assert!(parse_instant("2020-01-01").is_err());
/// ```
pub fn parse_instant(text: &str) -> Result<DateTime<Utc>, TemporalError> {
    if text.len() != INSTANT_LEN || !text.ends_with('Z') {
        return Err(TemporalError::Format {
            text: text.to_owned(),
        });
    }
    NaiveDateTime::parse_from_str(text, INSTANT_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|source| TemporalError::Parse {
            text: text.to_owned(),
            source,
        })
}

/// Closed time interval attached to a catalogue entry.
///
/// `start == end` denotes a single point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeInterval {
    /// Construct an interval.
    ///
    /// # Errors
    /// Returns [`TemporalError::Reversed`] when `start > end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, TemporalError> {
        if start > end {
            return Err(TemporalError::Reversed { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parse an interval from two fixed-format instants.
    ///
    /// # Errors
    /// Propagates [`parse_instant`] failures and rejects reversed intervals.
    ///
    /// # Examples
    /// ```
    /// use geocat_core::TimeInterval;
    ///
    /// let interval = TimeInterval::parse("2020-01-01T00:00:00Z", "2020-01-02T00:00:00Z")
    ///     .expect("valid interval");
    /// assert!(!interval.is_instant());
    /// ```
    pub fn parse(start: &str, end: &str) -> Result<Self, TemporalError> {
        Self::new(parse_instant(start)?, parse_instant(end)?)
    }

    /// Construct a point-in-time interval.
    #[must_use]
    pub const fn instant(at: DateTime<Utc>) -> Self {
        Self { start: at, end: at }
    }

    /// Interval start.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Interval end.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Report whether the interval is a single point in time.
    #[must_use]
    pub fn is_instant(&self) -> bool {
        self.start == self.end
    }

    /// Report whether `at` lies within the closed interval.
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }

    /// Report whether this interval lies entirely within `other`.
    #[must_use]
    pub fn is_within(&self, other: &Self) -> bool {
        other.start <= self.start && self.end <= other.end
    }
}

/// Length of the interval; zero for a point in time.
#[must_use]
pub fn duration(interval: &TimeInterval) -> TimeDelta {
    interval.end - interval.start
}

/// Midpoint of the interval.
#[must_use]
pub fn center(interval: &TimeInterval) -> DateTime<Utc> {
    interval.start + duration(interval) / 2
}

/// Length of time shared by two intervals.
///
/// Disjoint intervals share nothing, a contained interval shares its whole
/// duration, and partially overlapping intervals share the span between the
/// later start and the earlier end.
///
/// # Examples
/// ```
/// use chrono::TimeDelta;
/// use geocat_core::{TimeInterval, temporal::overlap};
///
/// let a = TimeInterval::parse("2020-01-01T00:00:00Z", "2020-01-03T00:00:00Z").expect("a");
/// let b = TimeInterval::parse("2020-01-02T00:00:00Z", "2020-01-05T00:00:00Z").expect("b");
/// assert_eq!(overlap(&a, &b), TimeDelta::days(1));
/// ```
#[must_use]
pub fn overlap(a: &TimeInterval, b: &TimeInterval) -> TimeDelta {
    if a.start > b.end || b.start > a.end {
        return TimeDelta::zero();
    }
    if a.is_within(b) {
        return duration(a);
    }
    if b.is_within(a) {
        return duration(b);
    }
    a.end.min(b.end) - a.start.max(b.start)
}

/// Express a signed span as fractional seconds.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "scores are computed in floating point from millisecond spans"
)]
#[must_use]
pub fn seconds(delta: TimeDelta) -> f64 {
    delta.num_milliseconds() as f64 / 1_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn interval(start: &str, end: &str) -> TimeInterval {
        TimeInterval::parse(start, end).expect("valid interval")
    }

    #[fixture]
    fn january() -> TimeInterval {
        interval("2020-01-01T00:00:00Z", "2020-01-31T00:00:00Z")
    }

    #[rstest]
    #[case("2020-01-01T00:00:00")]
    #[case("2020-01-01T00:00:00+00:00")]
    #[case("2020-01-01T00:00:00.5Z")]
    #[case("")]
    fn rejects_other_shapes(#[case] text: &str) {
        let err = parse_instant(text).expect_err("strict format");
        assert!(matches!(err, TemporalError::Format { .. }));
    }

    #[rstest]
    #[case("2020-01-01 00:00:00Z")]
    #[case("2020-13-01T00:00:00Z")]
    #[case("2020-02-30T00:00:00Z")]
    #[case("2020-01-01T25:00:00Z")]
    fn rejects_malformed_fields(#[case] text: &str) {
        let err = parse_instant(text).expect_err("invalid fields");
        assert!(matches!(err, TemporalError::Parse { .. }));
    }

    #[rstest]
    fn rejects_reversed_interval() {
        let err = TimeInterval::parse("2020-01-02T00:00:00Z", "2020-01-01T00:00:00Z")
            .expect_err("reversed");
        assert!(matches!(err, TemporalError::Reversed { .. }));
    }

    #[rstest]
    fn instant_has_zero_duration() {
        let at = parse_instant("2021-06-01T12:00:00Z").expect("instant");
        let point = TimeInterval::instant(at);
        assert!(point.is_instant());
        assert_eq!(duration(&point), TimeDelta::zero());
        assert_eq!(center(&point), at);
    }

    #[rstest]
    fn center_is_midpoint(january: TimeInterval) {
        let expected = parse_instant("2020-01-16T00:00:00Z").expect("midpoint");
        assert_eq!(center(&january), expected);
    }

    #[rstest]
    fn center_keeps_half_seconds() {
        let span = interval("2020-01-01T00:00:00Z", "2020-01-01T00:00:01Z");
        assert_eq!(
            center(&span) - span.start(),
            TimeDelta::milliseconds(500)
        );
    }

    #[rstest]
    fn disjoint_intervals_do_not_overlap(january: TimeInterval) {
        let march = interval("2020-03-01T00:00:00Z", "2020-03-31T00:00:00Z");
        assert_eq!(overlap(&january, &march), TimeDelta::zero());
        assert_eq!(overlap(&march, &january), TimeDelta::zero());
    }

    #[rstest]
    fn contained_interval_contributes_its_duration(january: TimeInterval) {
        let week = interval("2020-01-05T00:00:00Z", "2020-01-12T00:00:00Z");
        assert_eq!(overlap(&january, &week), TimeDelta::days(7));
        assert_eq!(overlap(&week, &january), TimeDelta::days(7));
    }

    #[rstest]
    fn partial_overlap_spans_later_start_to_earlier_end(january: TimeInterval) {
        let straddle = interval("2020-01-21T00:00:00Z", "2020-02-10T00:00:00Z");
        assert_eq!(overlap(&january, &straddle), TimeDelta::days(10));
    }

    #[rstest]
    fn touching_intervals_share_nothing(january: TimeInterval) {
        let next = interval("2020-01-31T00:00:00Z", "2020-02-10T00:00:00Z");
        assert_eq!(overlap(&january, &next), TimeDelta::zero());
    }

    #[rstest]
    #[expect(clippy::float_cmp, reason = "millisecond spans convert exactly")]
    fn seconds_are_signed() {
        assert_eq!(seconds(TimeDelta::milliseconds(-1_500)), -1.5);
    }
}
