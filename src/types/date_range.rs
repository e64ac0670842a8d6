//! Date range handling: the query window type, conversion of caller-supplied
//! boundaries into UTC, and parsing of upstream timestamp strings.

use chrono::{
    DateTime, Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat,
    TimeZone, Utc,
};
use serde::{Deserialize, Serialize};
use std::fmt;

const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// Conversion of a range boundary into a UTC instant.
///
/// Naive values are read as UTC; a bare [`NaiveDate`] means midnight UTC.
pub trait IntoUtcDateTime {
    fn into_utc(self) -> DateTime<Utc>;
}

impl IntoUtcDateTime for NaiveDate {
    fn into_utc(self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.and_time(NaiveTime::default()))
    }
}

impl IntoUtcDateTime for NaiveDateTime {
    fn into_utc(self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self)
    }
}

impl IntoUtcDateTime for DateTime<Utc> {
    fn into_utc(self) -> DateTime<Utc> {
        self
    }
}

impl IntoUtcDateTime for DateTime<Local> {
    fn into_utc(self) -> DateTime<Utc> {
        self.with_timezone(&Utc)
    }
}

impl IntoUtcDateTime for DateTime<FixedOffset> {
    fn into_utc(self) -> DateTime<Utc> {
        self.with_timezone(&Utc)
    }
}

/// The `[start, end)` window of a query.
///
/// # Examples
///
/// ```
/// use envdash::DateRange;
/// use chrono::NaiveDate;
///
/// let range = DateRange::new(
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 6).unwrap(),
/// );
/// assert_eq!(range.day_count(), 5);
/// assert_eq!(range.start_date().to_string(), "2024-01-01");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: impl IntoUtcDateTime, end: impl IntoUtcDateTime) -> Self {
        Self {
            start: start.into_utc(),
            end: end.into_utc(),
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end.date_naive()
    }

    /// Number of day slots in the window, rounding a partial last day up.
    /// Zero when `end` is not after `start`.
    pub fn day_count(&self) -> usize {
        let millis = (self.end - self.start).num_milliseconds();
        if millis <= 0 {
            return 0;
        }
        ((millis + DAY_MILLIS - 1) / DAY_MILLIS) as usize
    }

    /// `start`, `start + 1 day`, ... for each of the [`day_count`](Self::day_count) slots.
    pub fn days(&self) -> impl Iterator<Item = DateTime<Utc>> {
        let start = self.start;
        (0..self.day_count()).map(move |i| start + Duration::days(i as i64))
    }

    /// `start` in the wire format used for upstream queries.
    pub fn start_iso(&self) -> String {
        iso_timestamp(&self.start)
    }

    /// `end` in the wire format used for upstream queries.
    pub fn end_iso(&self) -> String {
        iso_timestamp(&self.end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start_iso(), self.end_iso())
    }
}

/// Renders an instant as RFC 3339 with millisecond precision and a `Z` suffix,
/// e.g. `2024-01-01T00:00:00.000Z`.
pub fn iso_timestamp(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses an upstream timestamp into its UTC wall-clock time.
///
/// Offset-carrying values are converted to UTC; naive values are taken as-is.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::default()))
}

/// Formats an upstream timestamp with a `chrono` format string, or returns
/// `None` when the text is not a recognised timestamp.
pub fn format_timestamp(raw: &str, format: &str) -> Option<String> {
    parse_timestamp(raw).map(|naive| naive.format(format).to_string())
}
