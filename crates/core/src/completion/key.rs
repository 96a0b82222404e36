//! Completion store key codec.
//!
//! Two date-based generations exist (`YYYY-MM-DD_habitId` and
//! `YYYY-MM-DD-habitId`). A third, older shape keyed by weekday name
//! (`Monday-123`) cannot be pinned to a calendar date and is never read as one.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{NaiveDate, Weekday};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::habit::HabitId;

/// Calendar date format used in keys and nested completion maps.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[allow(clippy::unwrap_used, reason = "static regex pattern is compile-time validated")]
static DATED_KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4}-\d{2}-\d{2})[_-](.+)$").unwrap());

#[allow(clippy::unwrap_used, reason = "static regex pattern is compile-time validated")]
static DAY_NAME_KEY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(sunday|monday|tuesday|wednesday|thursday|friday|saturday)-(.+)$").unwrap()
});

/// Separator generation for date-based keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyStyle {
    /// `YYYY-MM-DD_habitId`
    #[default]
    Underscore,
    /// `YYYY-MM-DD-habitId`
    Hyphen,
}

impl KeyStyle {
    const fn separator(self) -> char {
        match self {
            Self::Underscore => '_',
            Self::Hyphen => '-',
        }
    }
}

/// Classification of a raw store key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionKey {
    /// Date-based key; the only shape analytics may read.
    Dated { date: NaiveDate, habit_id: HabitId },
    /// Legacy weekday-name key, ambiguous across weeks.
    DayName { day: Weekday, habit_id: HabitId },
    /// Anything else, including date-shaped keys with impossible dates.
    Unrecognized,
}

impl CompletionKey {
    /// Classifies a raw key. Never fails; unknown shapes are [`Self::Unrecognized`].
    #[must_use]
    pub fn parse(key: &str) -> Self {
        if let Some(caps) = DATED_KEY_REGEX.captures(key) {
            return match NaiveDate::parse_from_str(&caps[1], DATE_FORMAT) {
                Ok(date) => Self::Dated { date, habit_id: HabitId::from(&caps[2]) },
                Err(_) => Self::Unrecognized,
            };
        }
        if let Some(caps) = DAY_NAME_KEY_REGEX.captures(key) {
            if let Ok(day) = caps[1].parse::<Weekday>() {
                return Self::DayName { day, habit_id: HabitId::from(&caps[2]) };
            }
        }
        Self::Unrecognized
    }

    #[must_use]
    pub const fn is_date_based(&self) -> bool {
        matches!(self, Self::Dated { .. })
    }

    #[must_use]
    pub const fn is_day_name(&self) -> bool {
        matches!(self, Self::DayName { .. })
    }
}

/// Encodes a date-based store key.
#[must_use]
pub fn completion_key(date: NaiveDate, habit_id: &str, style: KeyStyle) -> String {
    format!("{}{}{habit_id}", date.format(DATE_FORMAT), style.separator())
}

/// Parses a bare `YYYY-MM-DD` date string.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

impl fmt::Display for KeyStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Underscore => write!(f, "underscore"),
            Self::Hyphen => write!(f, "hyphen"),
        }
    }
}

impl FromStr for KeyStyle {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "underscore" | "_" => Ok(Self::Underscore),
            "hyphen" | "-" => Ok(Self::Hyphen),
            other => Err(CoreError::InvalidArgument(format!("unknown key style: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn underscore_key_is_dated() {
        assert_eq!(
            CompletionKey::parse("2024-06-03_42"),
            CompletionKey::Dated { date: date(2024, 6, 3), habit_id: HabitId::from("42") }
        );
    }

    #[test]
    fn hyphen_key_is_dated() {
        assert_eq!(
            CompletionKey::parse("2024-06-03-42"),
            CompletionKey::Dated { date: date(2024, 6, 3), habit_id: HabitId::from("42") }
        );
    }

    #[test]
    fn hyphenated_habit_ids_survive() {
        let key = CompletionKey::parse("2024-06-03-7f1c-22aa");
        assert_eq!(
            key,
            CompletionKey::Dated { date: date(2024, 6, 3), habit_id: HabitId::from("7f1c-22aa") }
        );
    }

    #[test]
    fn day_name_key_is_not_dated() {
        let key = CompletionKey::parse("Monday-123");
        assert_eq!(key, CompletionKey::DayName { day: Weekday::Mon, habit_id: HabitId::from("123") });
        assert!(!key.is_date_based());
        assert!(CompletionKey::parse("friday-9").is_day_name());
    }

    #[test]
    fn impossible_dates_are_unrecognized() {
        assert_eq!(CompletionKey::parse("2024-13-40_1"), CompletionKey::Unrecognized);
        assert_eq!(CompletionKey::parse("2024-06-03_"), CompletionKey::Unrecognized);
        assert_eq!(CompletionKey::parse("habit-1"), CompletionKey::Unrecognized);
        assert_eq!(CompletionKey::parse(""), CompletionKey::Unrecognized);
    }

    #[test]
    fn encoder_matches_both_generations() {
        let d = date(2024, 6, 3);
        assert_eq!(completion_key(d, "42", KeyStyle::Underscore), "2024-06-03_42");
        assert_eq!(completion_key(d, "42", KeyStyle::Hyphen), "2024-06-03-42");
        assert!(CompletionKey::parse(&completion_key(d, "42", KeyStyle::Hyphen)).is_date_based());
    }

    #[test]
    fn key_style_parses() {
        assert_eq!("underscore".parse::<KeyStyle>().unwrap(), KeyStyle::Underscore);
        assert_eq!("-".parse::<KeyStyle>().unwrap(), KeyStyle::Hyphen);
        assert!("dot".parse::<KeyStyle>().is_err());
        assert_eq!(KeyStyle::Hyphen.to_string(), "hyphen");
    }

    #[test]
    fn bare_dates_parse() {
        assert_eq!(parse_date("2024-02-29"), Some(date(2024, 2, 29)));
        assert_eq!(parse_date("2023-02-29"), None);
        assert_eq!(parse_date("Monday"), None);
    }
}
