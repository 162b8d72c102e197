//! Date instances.
//!
//! [`Date`] models a calendar instant with millisecond precision that may also
//! be *invalid*, the way a date object constructed from garbage input is.
//! Validity is carried in the value itself so codecs can distinguish "a date
//! that failed to parse" from "not a date at all".

use std::fmt::{self, Display};
use std::sync::LazyLock;

use chrono::{DateTime, TimeZone, Utc};
use regex::Regex;

/// Largest magnitude, in milliseconds from the epoch, a valid date may hold.
pub const MAX_EPOCH_MILLIS: i64 = 8_640_000_000_000_000;

/// ISO 8601 simplified forms: `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, optionally
/// followed by `THH:mm`, `:ss`, `.sss` and an offset.
static ISO_8601: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([+-]\d{6}|\d{4})(?:-(\d{2})(?:-(\d{2}))?)?(?:[Tt ](\d{2}):(\d{2})(?::(\d{2})(?:\.(\d+))?)?(Z|z|[+-]\d{2}:\d{2})?)?$",
    )
    .expect("ISO 8601 pattern is valid")
});

/// A date instance.
///
/// The instant is held as milliseconds from the epoch, so the full
/// ±[`MAX_EPOCH_MILLIS`] range is representable even where `chrono` stops.
///
/// # Example
///
/// ```rust
/// use codecs::Date;
///
/// let date = Date::parse("2024-03-01T12:30:00.250Z");
/// assert!(date.is_valid());
/// assert_eq!(date.timestamp_millis(), Some(1_709_296_200_250));
/// assert_eq!(Date::from_millis(1_709_296_200_250.0), date);
///
/// assert!(!Date::parse("not-a-date").is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Date(Option<i64>);

impl Date {
    /// The current instant.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// An invalid date.
    pub fn invalid() -> Self {
        Self(None)
    }

    /// Builds a date from a `chrono` instant, truncated to milliseconds.
    pub fn from_datetime<Tz: TimeZone>(datetime: DateTime<Tz>) -> Self {
        Self::from_epoch_millis(datetime.timestamp_millis())
    }

    /// Builds a date from an epoch-millisecond timestamp.
    ///
    /// Fractions are truncated toward zero. Non-finite input and timestamps
    /// beyond [`MAX_EPOCH_MILLIS`] produce an invalid date.
    pub fn from_millis(millis: f64) -> Self {
        if !millis.is_finite() || millis.abs() > MAX_EPOCH_MILLIS as f64 {
            return Self::invalid();
        }
        Self::from_epoch_millis(millis.trunc() as i64)
    }

    /// Parses a date string.
    ///
    /// Accepts RFC 3339, the ISO 8601 simplified forms (including `±YYYYYY`
    /// expanded years) and RFC 2822. Strings without an offset are read as
    /// UTC. Anything else yields an invalid date.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();

        if let Ok(datetime) = DateTime::parse_from_rfc3339(input) {
            return Self::from_datetime(datetime);
        }
        if let Some(date) = parse_iso_8601(input) {
            return date;
        }
        if let Ok(datetime) = DateTime::parse_from_rfc2822(input) {
            return Self::from_datetime(datetime);
        }

        Self::invalid()
    }

    /// Returns true unless this is an invalid date.
    pub fn is_valid(&self) -> bool {
        self.0.is_some()
    }

    /// Milliseconds since the epoch, or `None` for an invalid date.
    pub fn timestamp_millis(&self) -> Option<i64> {
        self.0
    }

    /// The instant as a `chrono` value.
    ///
    /// `None` for an invalid date, and for valid dates near the ends of the
    /// range that `chrono` cannot represent.
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        self.0.and_then(DateTime::from_timestamp_millis)
    }

    /// Formats as `YYYY-MM-DDTHH:mm:ss.sssZ`, or `None` for an invalid date.
    ///
    /// Years outside `0..=9999` use the expanded form `±YYYYYY`, which
    /// [`Date::parse`] reads back.
    ///
    /// ```rust
    /// use codecs::Date;
    ///
    /// let far = Date::from_millis(8.64e15);
    /// assert_eq!(far.to_iso_string().as_deref(), Some("+275760-09-13T00:00:00.000Z"));
    /// assert_eq!(Date::parse(&far.to_iso_string().unwrap()), far);
    /// ```
    pub fn to_iso_string(&self) -> Option<String> {
        let millis = self.0?;
        let days = millis.div_euclid(MILLIS_PER_DAY);
        let time = millis.rem_euclid(MILLIS_PER_DAY);
        let (year, month, day) = civil_from_days(days);

        let year = if (0..=9999).contains(&year) {
            format!("{:04}", year)
        } else {
            format!("{:+07}", year)
        };
        Some(format!(
            "{}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
            year,
            month,
            day,
            time / 3_600_000,
            time / 60_000 % 60,
            time / 1000 % 60,
            time % 1000
        ))
    }

    fn from_epoch_millis(millis: i64) -> Self {
        if millis.abs() > MAX_EPOCH_MILLIS {
            return Self::invalid();
        }
        Self(Some(millis))
    }
}

impl From<DateTime<Utc>> for Date {
    fn from(datetime: DateTime<Utc>) -> Self {
        Self::from_datetime(datetime)
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_iso_string() {
            Some(iso) => f.write_str(&iso),
            None => f.write_str("Invalid Date"),
        }
    }
}

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Days since 1970-01-01 of a proleptic Gregorian date.
fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let year = if month <= 2 { year - 1 } else { year };
    let era = year.div_euclid(400);
    let year_of_era = year - era * 400;
    let day_of_year = (153 * (month + if month > 2 { -3 } else { 9 }) + 2) / 5 + day - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * 146_097 + day_of_era - 719_468
}

/// Inverse of [`days_from_civil`].
fn civil_from_days(days: i64) -> (i64, i64, i64) {
    let days = days + 719_468;
    let era = days.div_euclid(146_097);
    let day_of_era = days - era * 146_097;
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let mp = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = year_of_era + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

fn days_in_month(year: i64, month: i64) -> i64 {
    match month {
        2 if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

fn parse_iso_8601(input: &str) -> Option<Date> {
    let caps = ISO_8601.captures(input)?;
    let component = |index: usize, default: i64| -> Option<i64> {
        caps.get(index)
            .map_or(Some(default), |m| m.as_str().parse().ok())
    };

    let year_text = caps.get(1)?.as_str();
    // negative zero is not a year
    if year_text == "-000000" {
        return None;
    }
    let year: i64 = year_text.parse().ok()?;
    let month = component(2, 1)?;
    let day = component(3, 1)?;
    let hour = component(4, 0)?;
    let minute = component(5, 0)?;
    let second = component(6, 0)?;
    let millis = caps.get(7).map_or(Some(0), |m| {
        let digits: String = m
            .as_str()
            .chars()
            .chain(std::iter::repeat('0'))
            .take(3)
            .collect();
        digits.parse::<i64>().ok()
    })?;

    if !(1..=12).contains(&month)
        || !(1..=days_in_month(year, month)).contains(&day)
        || hour > 23
        || minute > 59
        || second > 59
    {
        return None;
    }

    let offset_minutes = match caps.get(8).map(|m| m.as_str()) {
        None | Some("Z") | Some("z") => 0,
        Some(offset) => {
            let sign = if offset.starts_with('-') { -1 } else { 1 };
            let hours: i64 = offset.get(1..3)?.parse().ok()?;
            let minutes: i64 = offset.get(4..6)?.parse().ok()?;
            if hours > 23 || minutes > 59 {
                return None;
            }
            sign * (hours * 60 + minutes)
        }
    };

    let local = days_from_civil(year, month, day) * MILLIS_PER_DAY
        + ((hour * 60 + minute) * 60 + second) * 1000
        + millis;
    let date = Date::from_epoch_millis(local - offset_minutes * 60_000);
    date.is_valid().then_some(date)
}
