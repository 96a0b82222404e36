//! Weekly recurrence model for habits.
//!
//! Two day encodings exist in stored data: canonical (`0` = Sunday … `6` =
//! Saturday) and legacy (`1` = Monday … `7` = Sunday). Both collapse onto the
//! canonical encoding; the only value that actually moves is `7`.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const WEEKDAYS: [i32; 5] = [1, 2, 3, 4, 5];
const WEEKENDS: [i32; 2] = [0, 6];

/// Normalizes raw schedule days into a sorted, deduplicated canonical set.
///
/// Values outside both encodings (negative, greater than 7) pass through
/// unchanged. They never match a calendar day.
#[must_use]
pub fn normalize_schedule(raw: &[i32]) -> Vec<i32> {
    raw.iter()
        .map(|&day| if day == 7 { 0 } else { day })
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Canonical day index (`0` = Sunday) of a calendar date.
#[must_use]
pub fn day_index(date: NaiveDate) -> i32 {
    weekday_index(date.weekday())
}

/// Canonical day index (`0` = Sunday) of a weekday.
#[must_use]
pub fn weekday_index(weekday: Weekday) -> i32 {
    // num_days_from_sunday is 0..=6
    #[allow(clippy::cast_possible_wrap, reason = "value is at most 6")]
    let index = weekday.num_days_from_sunday() as i32;
    index
}

/// A normalized habit schedule. Empty means "due every day".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<i32>", into = "Vec<i32>")]
pub struct Schedule {
    days: Vec<i32>,
}

impl From<Vec<i32>> for Schedule {
    fn from(raw: Vec<i32>) -> Self {
        Self::from_raw(&raw)
    }
}

impl From<Schedule> for Vec<i32> {
    fn from(schedule: Schedule) -> Self {
        schedule.days
    }
}

impl Schedule {
    /// Builds a schedule from days in either encoding.
    #[must_use]
    pub fn from_raw(raw: &[i32]) -> Self {
        Self { days: normalize_schedule(raw) }
    }

    /// A schedule without restrictions.
    #[must_use]
    pub const fn daily() -> Self {
        Self { days: Vec::new() }
    }

    /// Sorted canonical days.
    #[must_use]
    pub fn days(&self) -> &[i32] {
        &self.days
    }

    /// `true` when no days are listed, i.e. the habit is due every day.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.days.is_empty()
    }

    /// Whether the habit is due on the given weekday.
    #[must_use]
    pub fn is_due_on_weekday(&self, weekday: Weekday) -> bool {
        self.is_unrestricted() || self.days.binary_search(&weekday_index(weekday)).is_ok()
    }

    /// Whether the habit is due on the given date.
    #[must_use]
    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        self.is_due_on_weekday(date.weekday())
    }

    /// Days that fall outside `0..=6` after normalization.
    pub fn out_of_range_days(&self) -> impl Iterator<Item = i32> + '_ {
        self.days.iter().copied().filter(|day| !(0..=6).contains(day))
    }

    /// Classifies the schedule for display.
    #[must_use]
    pub fn label(&self) -> ScheduleLabel {
        match self.days.len() {
            0 => ScheduleLabel::NoSchedule,
            7 => ScheduleLabel::Daily,
            5 if self.days == WEEKDAYS => ScheduleLabel::Weekdays,
            2 if self.days == WEEKENDS => ScheduleLabel::Weekends,
            _ => ScheduleLabel::Days(self.days.clone()),
        }
    }
}

/// Display classification of a [`Schedule`], in precedence order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "days")]
pub enum ScheduleLabel {
    NoSchedule,
    Daily,
    Weekdays,
    Weekends,
    Days(Vec<i32>),
}

impl ScheduleLabel {
    /// Full label: named days are enumerated, e.g. `Mon, Wed, Fri`.
    #[must_use]
    pub fn full(&self) -> String {
        match self {
            Self::Days(days) => days.iter().map(|&day| day_name(day)).collect::<Vec<_>>().join(", "),
            other => other.fixed_text().to_owned(),
        }
    }

    /// Compact label: named days collapse to a count, e.g. `3x/week`.
    #[must_use]
    pub fn compact(&self) -> String {
        match self {
            Self::Days(days) => format!("{}x/week", days.len()),
            other => other.fixed_text().to_owned(),
        }
    }

    const fn fixed_text(&self) -> &'static str {
        match *self {
            Self::NoSchedule => "No schedule",
            Self::Daily => "Daily",
            Self::Weekdays => "Weekdays",
            Self::Weekends => "Weekends",
            Self::Days(_) => "",
        }
    }
}

impl fmt::Display for ScheduleLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str(&self.compact())
        } else {
            f.write_str(&self.full())
        }
    }
}

fn day_name(day: i32) -> String {
    usize::try_from(day)
        .ok()
        .and_then(|i| DAY_NAMES.get(i))
        .map_or_else(|| format!("Day {day}"), |name| (*name).to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn legacy_sunday_maps_to_zero() {
        assert_eq!(normalize_schedule(&[7]), vec![0]);
    }

    #[test]
    fn weekdays_pass_through() {
        assert_eq!(normalize_schedule(&[1, 2, 3, 4, 5]), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn empty_stays_empty() {
        assert!(normalize_schedule(&[]).is_empty());
    }

    #[test]
    fn mixed_encodings_dedup_and_sort() {
        assert_eq!(normalize_schedule(&[7, 0, 3, 3, 1]), vec![0, 1, 3]);
    }

    #[test]
    fn out_of_range_values_pass_through() {
        assert_eq!(normalize_schedule(&[9, -1, 2]), vec![-1, 2, 9]);
        let schedule = Schedule::from_raw(&[9, -1, 2]);
        assert_eq!(schedule.out_of_range_days().collect::<Vec<_>>(), vec![-1, 9]);
    }

    #[test]
    fn normalization_is_idempotent_and_bounded() {
        let samples: [&[i32]; 7] = [
            &[],
            &[7],
            &[1, 2, 3, 4, 5, 6, 7],
            &[0, 1, 2, 3, 4, 5, 6],
            &[6, 6, 6, 7, 7],
            &[3, 1, 7, 5],
            &[2, 4],
        ];
        for raw in samples {
            let once = normalize_schedule(raw);
            assert_eq!(normalize_schedule(&once), once, "not idempotent for {raw:?}");
            assert!(once.windows(2).all(|w| w[0] < w[1]), "not a sorted set: {once:?}");
            assert!(once.iter().all(|d| (0..=6).contains(d)), "out of range: {once:?}");
        }
    }

    #[test]
    fn empty_schedule_is_due_every_day() {
        let schedule = Schedule::daily();
        for offset in 0..7 {
            assert!(schedule.is_due_on(date(2024, 6, 2) + chrono::Days::new(offset)));
        }
    }

    #[test]
    fn schedule_matches_canonical_weekday() {
        // 2024-06-03 is a Monday
        let schedule = Schedule::from_raw(&[1]);
        assert!(schedule.is_due_on(date(2024, 6, 3)));
        assert!(!schedule.is_due_on(date(2024, 6, 4)));
        let sunday = Schedule::from_raw(&[7]);
        assert!(sunday.is_due_on(date(2024, 6, 2)));
    }

    #[test]
    fn serde_normalizes_on_read() {
        let schedule: Schedule = serde_json::from_str("[7, 1, 1]").unwrap();
        assert_eq!(schedule.days(), &[0, 1]);
        assert_eq!(serde_json::to_string(&schedule).unwrap(), "[0,1]");
    }

    #[test]
    fn label_precedence() {
        assert_eq!(Schedule::daily().label(), ScheduleLabel::NoSchedule);
        assert_eq!(Schedule::from_raw(&[1, 2, 3, 4, 5, 6, 7]).label(), ScheduleLabel::Daily);
        assert_eq!(Schedule::from_raw(&[5, 4, 3, 2, 1]).label(), ScheduleLabel::Weekdays);
        assert_eq!(Schedule::from_raw(&[6, 7]).label(), ScheduleLabel::Weekends);
        assert_eq!(Schedule::from_raw(&[1, 3, 5]).label(), ScheduleLabel::Days(vec![1, 3, 5]));
    }

    #[test]
    fn label_text_modes() {
        let label = Schedule::from_raw(&[1, 3, 5]).label();
        assert_eq!(label.full(), "Mon, Wed, Fri");
        assert_eq!(label.compact(), "3x/week");
        assert_eq!(format!("{label}"), "Mon, Wed, Fri");
        assert_eq!(format!("{label:#}"), "3x/week");
        assert_eq!(ScheduleLabel::Weekends.compact(), "Weekends");
        assert_eq!(ScheduleLabel::Days(vec![0, 9]).full(), "Sun, Day 9");
    }
}
