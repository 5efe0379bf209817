//! UTC datetime utilities without timezone dependencies.
//!
//! Provides a lightweight `DateTimeUtc` struct for post dates, optimized for
//! feed and sitemap output.
//!
//! # Features
//!
//! - Zero external dependencies for date parsing
//! - Accepts the date spellings found in front-matter: date-only, `Z`,
//!   numeric offsets, fractional seconds, space instead of `T`, slashes,
//!   RFC 2822 and `January 15, 2024`
//! - RFC 2822 (RSS) and RFC 3339 (Atom, JSON Feed) formatting
//! - Unix timestamp conversion for ordering and offset normalization
//!
//! # Examples
//!
//! ```ignore
//! let dt = DateTimeUtc::parse("2024-06-15").unwrap();
//! let dt = DateTimeUtc::parse("2024-06-15T16:30:45+02:00").unwrap();
//!
//! assert_eq!(dt.to_rfc2822(), "Sat, 15 Jun 2024 14:30:45 GMT");
//! ```

use anyhow::{Result, bail};

const SECONDS_PER_DAY: i64 = 86_400;

const MONTH_NAMES: [&str; 12] = [
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];
const WEEKDAY_NAMES: [&str; 7] = [
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
];

/// UTC datetime without timezone complexity.
///
/// Field order makes the derived `Ord` chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTimeUtc {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DateTimeUtc {
    /// 1970-01-01T00:00:00Z
    pub const EPOCH: Self = Self::from_ymd(1970, 1, 1);

    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    pub const fn from_ymd(year: u16, month: u8, day: u8) -> Self {
        Self::new(year, month, day, 0, 0, 0)
    }

    /// Parse a front-matter date.
    ///
    /// Accepted shapes:
    /// - `YYYY-MM-DD`, also with `/` separators or unpadded month and day
    /// - `YYYY-MM-DDTHH:MM[:SS[.fff]]` (no zone means UTC)
    /// - any of the above followed by `Z`, `+HH:MM`, `-HH:MM`, `+HHMM` or `GMT`
    /// - a space instead of `T`
    /// - RFC 2822, `Mon, 15 Jan 2024 10:00:00 GMT`
    /// - long form, `January 15, 2024` or `15 January 2024`, optionally timed
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::parse_numeric(s.as_bytes()).or_else(|| Self::parse_textual(s))
    }

    /// `YYYY-M-D` or `YYYY/M/D`, optionally followed by a time.
    fn parse_numeric(bytes: &[u8]) -> Option<Self> {
        let (year, rest) = take_digits(bytes, 4, 4)?;
        let (&sep, rest) = rest.split_first()?;
        if !matches!(sep, b'-' | b'/') {
            return None;
        }
        let (month, rest) = take_digits(rest, 1, 2)?;
        let rest = rest.strip_prefix(&[sep])?;
        let (day, rest) = take_digits(rest, 1, 2)?;
        let date = Self::from_ymd(year as u16, month as u8, day as u8);

        match rest {
            [] => date.at(0, 0, 0, 0),
            [b'T' | b't' | b' ', time @ ..] => {
                let (hour, minute, second, zone) = parse_time(time)?;
                let offset = parse_zone(zone.trim_ascii_start())?;
                date.at(hour, minute, second, offset)
            }
            _ => None,
        }
    }

    /// RFC 2822 and long-form dates with English month names.
    fn parse_textual(s: &str) -> Option<Self> {
        let mut tokens: Vec<&str> = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
            .collect();
        if tokens
            .first()
            .is_some_and(|t| name_index(&WEEKDAY_NAMES, t).is_some())
        {
            tokens.remove(0);
        }

        let (month, day, year, rest) = match tokens.as_slice() {
            [day, month, year, rest @ ..] if day.bytes().all(|b| b.is_ascii_digit()) => {
                (name_index(&MONTH_NAMES, month)?, *day, *year, rest)
            }
            [month, day, year, rest @ ..] => (name_index(&MONTH_NAMES, month)?, *day, *year, rest),
            _ => return None,
        };
        let (day, tail) = take_digits(day.as_bytes(), 1, 2)?;
        let (year, year_tail) = take_digits(year.as_bytes(), 4, 4)?;
        if !tail.is_empty() || !year_tail.is_empty() {
            return None;
        }
        let date = Self::from_ymd(year as u16, month as u8 + 1, day as u8);

        let (time, zone) = match rest {
            [] => return date.at(0, 0, 0, 0),
            [time] => (*time, ""),
            [time, zone] => (*time, *zone),
            _ => return None,
        };
        let (hour, minute, second, attached) = parse_time(time.as_bytes())?;
        let offset = match (attached, zone) {
            (attached, "") => parse_zone(attached)?,
            ([], zone) => parse_zone(zone.as_bytes())?,
            _ => return None,
        };
        date.at(hour, minute, second, offset)
    }

    /// Set the time of day given in a zone `offset` seconds east of UTC.
    fn at(self, hour: u8, minute: u8, second: u8, offset: i64) -> Option<Self> {
        let dt = Self {
            hour,
            minute,
            second,
            ..self
        };
        dt.validate().ok()?;

        if offset == 0 {
            Some(dt)
        } else {
            Self::from_unix(dt.unix_timestamp() - offset)
        }
    }

    pub fn validate(&self) -> Result<()> {
        let Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        } = *self;

        if !(1..=12).contains(&month) {
            bail!("month is invalid: {month}");
        }

        let max_days = Self::days_in_month(year, month);
        if day == 0 || day > max_days {
            bail!("day is invalid: {day}");
        }
        if hour > 23 {
            bail!("hour is invalid: {hour}");
        }
        if minute > 59 {
            bail!("minute is invalid: {minute}");
        }
        if second > 59 {
            bail!("second is invalid: {second}");
        }

        Ok(())
    }

    #[inline]
    #[allow(clippy::manual_is_multiple_of)] // Manual impl for const fn
    const fn is_leap_year(year: u16) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    #[inline]
    const fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if Self::is_leap_year(year) => 29,
            2 => 28,
            _ => 0,
        }
    }

    /// Seconds since 1970-01-01T00:00:00Z.
    pub fn unix_timestamp(self) -> i64 {
        let days = days_from_civil(
            i64::from(self.year),
            i64::from(self.month),
            i64::from(self.day),
        );
        days * SECONDS_PER_DAY
            + i64::from(self.hour) * 3600
            + i64::from(self.minute) * 60
            + i64::from(self.second)
    }

    /// Inverse of [`unix_timestamp`](Self::unix_timestamp).
    ///
    /// Returns `None` outside years 0..=9999.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Ranges checked
    pub fn from_unix(secs: i64) -> Option<Self> {
        let days = secs.div_euclid(SECONDS_PER_DAY);
        let rem = secs.rem_euclid(SECONDS_PER_DAY);
        let (year, month, day) = civil_from_days(days);
        if !(0..=9999).contains(&year) {
            return None;
        }
        Some(Self::new(
            year as u16,
            month as u8,
            day as u8,
            (rem / 3600) as u8,
            ((rem % 3600) / 60) as u8,
            (rem % 60) as u8,
        ))
    }

    /// Format as `YYYY-MM-DD` (sitemap `<lastmod>`).
    pub fn to_date_string(self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }

    /// Format as RFC 3339 (ISO 8601) for Atom and JSON feeds.
    ///
    /// Returns: `YYYY-MM-DDTHH:MM:SSZ`
    pub fn to_rfc3339(self) -> String {
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }

    /// Format as RFC 2822 for RSS `<pubDate>`.
    pub fn to_rfc2822(self) -> String {
        const WEEKDAYS: [&str; 7] = ["Sat", "Sun", "Mon", "Tue", "Wed", "Thu", "Fri"];
        const MONTHS: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];

        // Zeller's congruence for weekday calculation
        let weekday = self.weekday_index();

        format!(
            "{}, {:02} {} {:04} {:02}:{:02}:{:02} GMT",
            WEEKDAYS[weekday],
            self.day,
            MONTHS[(self.month - 1) as usize],
            self.year,
            self.hour,
            self.minute,
            self.second
        )
    }

    #[inline]
    #[allow(clippy::cast_sign_loss)] // Result of % 7 is always 0-6
    fn weekday_index(&self) -> usize {
        let (y, m) = if self.month < 3 {
            (i32::from(self.year) - 1, i32::from(self.month) + 12)
        } else {
            (i32::from(self.year), i32::from(self.month))
        };
        let d = i32::from(self.day);
        ((d + (13 * (m + 1)) / 5 + y + y / 4 - y / 100 + y / 400) % 7) as usize
    }
}

/// Parse `H:MM[:SS[.fff]]`, returning the unconsumed tail.
fn parse_time(bytes: &[u8]) -> Option<(u8, u8, u8, &[u8])> {
    let (hour, rest) = take_digits(bytes, 1, 2)?;
    let rest = rest.strip_prefix(b":")?;
    let minute = parse_u8(rest.get(0..2)?)?;
    let mut rest = &rest[2..];

    let mut second = 0;
    if rest.first() == Some(&b':') {
        second = parse_u8(rest.get(1..3)?)?;
        rest = &rest[3..];
    }

    // Fractional seconds are truncated
    if rest.first() == Some(&b'.') {
        let digits = rest[1..].iter().take_while(|b| b.is_ascii_digit()).count();
        if digits == 0 {
            return None;
        }
        rest = &rest[1 + digits..];
    }

    Some((hour as u8, minute, second, rest))
}

/// Zone names used by RFC 2822 for UTC, or a numeric offset.
fn parse_zone(bytes: &[u8]) -> Option<i64> {
    if ["GMT", "UT", "UTC"]
        .iter()
        .any(|name| bytes.eq_ignore_ascii_case(name.as_bytes()))
    {
        return Some(0);
    }
    parse_offset(bytes)
}

/// Parse a zone designator into an offset east of UTC, in seconds.
fn parse_offset(bytes: &[u8]) -> Option<i64> {
    match bytes {
        [] | [b'Z' | b'z'] => Some(0),
        [sign @ (b'+' | b'-'), tail @ ..] => {
            let (hh, mm) = match tail {
                [h1, h2, b':', m1, m2] | [h1, h2, m1, m2] => ([*h1, *h2], [*m1, *m2]),
                [h1, h2] => ([*h1, *h2], [b'0', b'0']),
                _ => return None,
            };
            let hours = parse_u8(&hh)?;
            let minutes = parse_u8(&mm)?;
            if hours > 23 || minutes > 59 {
                return None;
            }
            let offset = i64::from(hours) * 3600 + i64::from(minutes) * 60;
            Some(if *sign == b'-' { -offset } else { offset })
        }
        _ => None,
    }
}

/// Days since 1970-01-01 for a proleptic Gregorian date.
fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let year = if month <= 2 { year - 1 } else { year };
    let era = if year >= 0 { year } else { year - 399 } / 400;
    let yoe = year - era * 400;
    let mp = (month + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Inverse of [`days_from_civil`].
fn civil_from_days(days: i64) -> (i64, i64, i64) {
    let z = days + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

/// Parse 2-digit ASCII number
#[inline]
fn parse_u8(bytes: &[u8]) -> Option<u8> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = bytes[0].wrapping_sub(b'0');
    let d2 = bytes[1].wrapping_sub(b'0');
    if d1 > 9 || d2 > 9 {
        return None;
    }
    Some(d1 * 10 + d2)
}

/// Leading run of `min..=max` ASCII digits and the rest of the input.
fn take_digits(bytes: &[u8], min: usize, max: usize) -> Option<(u32, &[u8])> {
    let len = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if len < min || len > max {
        return None;
    }
    let value = bytes[..len]
        .iter()
        .fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0'));
    Some((value, &bytes[len..]))
}

/// Index of the name `token` abbreviates, e.g. `Jan` or `sept`.
fn name_index(names: &[&str], token: &str) -> Option<usize> {
    let token = token.trim_end_matches('.').to_ascii_lowercase();
    if token.len() < 3 {
        return None;
    }
    names.iter().position(|name| name.starts_with(&token))
}
