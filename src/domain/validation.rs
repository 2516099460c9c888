// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stateless input validators for e-mail addresses and dates.

use crate::domain::errors::UtilError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9.\-_%+]+@[A-Za-z0-9\-_%+]+\.(?:[a-z]{2,4}\.)?[a-z]{2,4}$")
        .expect("e-mail pattern is valid")
});

/// Returns `true` if the trimmed input looks like an e-mail address.
///
/// The top-level label, and the optional second-level label before it, must be
/// two to four lowercase letters.
///
/// # Examples
///
/// ```
/// use sitekit::domain::validation::is_email;
///
/// assert!(is_email("test@test.co.uk"));
/// assert!(!is_email("test@@test.com"));
/// ```
pub fn is_email(email: &str) -> bool {
    EMAIL.is_match(email.trim())
}

/// A supported layout for [`is_date`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DateFormat {
    /// `dd/mm/yy`
    SlashShort,
    /// `dd/mm/yyyy`
    SlashLong,
    /// `dd-mm-yy`
    DashShort,
    /// `dd-mm-yyyy`
    DashLong,
    /// `dd.mm.yy`
    DotShort,
    /// `dd.mm.yyyy`
    DotLong,
}

impl DateFormat {
    /// Every supported format.
    pub const ALL: [DateFormat; 6] = [
        DateFormat::SlashShort,
        DateFormat::SlashLong,
        DateFormat::DashShort,
        DateFormat::DashLong,
        DateFormat::DotShort,
        DateFormat::DotLong,
    ];

    /// Returns the pattern string, e.g. `dd/mm/yyyy`.
    pub fn pattern(self) -> &'static str {
        match self {
            DateFormat::SlashShort => "dd/mm/yy",
            DateFormat::SlashLong => "dd/mm/yyyy",
            DateFormat::DashShort => "dd-mm-yy",
            DateFormat::DashLong => "dd-mm-yyyy",
            DateFormat::DotShort => "dd.mm.yy",
            DateFormat::DotLong => "dd.mm.yyyy",
        }
    }

    fn regex(self) -> &'static Regex {
        static SLASH_SHORT: Lazy<Regex> = Lazy::new(|| date_regex('/', 2));
        static SLASH_LONG: Lazy<Regex> = Lazy::new(|| date_regex('/', 4));
        static DASH_SHORT: Lazy<Regex> = Lazy::new(|| date_regex('-', 2));
        static DASH_LONG: Lazy<Regex> = Lazy::new(|| date_regex('-', 4));
        static DOT_SHORT: Lazy<Regex> = Lazy::new(|| date_regex('.', 2));
        static DOT_LONG: Lazy<Regex> = Lazy::new(|| date_regex('.', 4));

        match self {
            DateFormat::SlashShort => &SLASH_SHORT,
            DateFormat::SlashLong => &SLASH_LONG,
            DateFormat::DashShort => &DASH_SHORT,
            DateFormat::DashLong => &DASH_LONG,
            DateFormat::DotShort => &DOT_SHORT,
            DateFormat::DotLong => &DOT_LONG,
        }
    }
}

fn date_regex(separator: char, year_digits: usize) -> Regex {
    let sep = regex::escape(&separator.to_string());
    Regex::new(&format!(
        r"^([0-3][0-9]){sep}([0-1][0-9]){sep}(\d{{{year_digits}}})$"
    ))
    .expect("date pattern is valid")
}

impl FromStr for DateFormat {
    type Err = UtilError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        DateFormat::ALL
            .into_iter()
            .find(|format| format.pattern() == s)
            .ok_or_else(|| UtilError::InvalidDateFormat {
                format: s.to_string(),
            })
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pattern())
    }
}

/// Number of days in `month`, using the `year % 4` leap rule.
///
/// Century years are treated like any other year divisible by four, so
/// `1900` counts as a leap year here.
fn days_in_month(month: u32, year: u32) -> u32 {
    match month {
        2 if year % 4 == 0 => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Returns `true` if the trimmed input is a real date in `format`.
///
/// `format` is one of the patterns of [`DateFormat`]; any other format string
/// makes the date invalid.
///
/// # Examples
///
/// ```
/// use sitekit::domain::validation::is_date;
///
/// assert!(is_date("29/02/2000", "dd/mm/yyyy"));
/// assert!(!is_date("29/02/2001", "dd/mm/yyyy"));
/// assert!(!is_date("31/04/2000", "dd/mm/yyyy"));
/// ```
pub fn is_date(date: &str, format: &str) -> bool {
    match format.parse::<DateFormat>() {
        Ok(format) => is_date_in(date, format),
        Err(_) => false,
    }
}

/// Same as [`is_date`] with an already parsed format.
pub fn is_date_in(date: &str, format: DateFormat) -> bool {
    let Some(caps) = format.regex().captures(date.trim()) else {
        return false;
    };

    let (Ok(day), Ok(month), Ok(year)) = (
        caps[1].parse::<u32>(),
        caps[2].parse::<u32>(),
        caps[3].parse::<u32>(),
    ) else {
        return false;
    };

    if !(1..=12).contains(&month) {
        return false;
    }
    (1..=days_in_month(month, year)).contains(&day)
}
