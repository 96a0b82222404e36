//! Cross-habit totals over a trailing window of calendar days.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::completion::CompletionLookup;
use crate::habit::Habit;

/// Dashboard totals for a window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub total_habits: u64,
    /// Completed (habit, day) slots inside the window.
    pub total_completions: u64,
    /// Whole-number percentage, `0` when there are no slots.
    pub average_completion_rate: u64,
    /// Habits with at least one completion inside the window.
    pub active_habits: u64,
}

/// Totals over the `window_days` calendar days ending at `today`.
///
/// The window holds exactly `window_days` days, `today` included, so its
/// oldest day is `today - (window_days - 1)`. A zero-length window yields a
/// rate of `0`.
///
/// Every day of the window is a possible slot for every habit; schedules are
/// deliberately not consulted at this layer.
#[must_use]
pub fn summarize<L>(habits: &[Habit], lookup: &L, today: NaiveDate, window_days: u32) -> AnalyticsSummary
where
    L: CompletionLookup + ?Sized,
{
    let window: Vec<NaiveDate> = (0..u64::from(window_days))
        .map_while(|offset| today.checked_sub_days(Days::new(offset)))
        .collect();

    let mut total_completions = 0_u64;
    let mut active_habits = 0_u64;
    for habit in habits {
        let done = window.iter().filter(|day| lookup.is_completed_on(habit.id.as_str(), **day)).count() as u64;
        total_completions += done;
        if done > 0 {
            active_habits += 1;
        }
    }

    let total_habits = habits.len() as u64;
    let possible = total_habits * window.len() as u64;
    let summary = AnalyticsSummary {
        total_habits,
        total_completions,
        average_completion_rate: rounded_percent(total_completions, possible),
        active_habits,
    };
    tracing::debug!(?summary, window_days, "analytics summary computed");
    summary
}

/// `round(100 * part / whole)` with halves rounded up; `0` for an empty whole.
#[must_use]
pub const fn rounded_percent(part: u64, whole: u64) -> u64 {
    if whole == 0 {
        return 0;
    }
    (part * 200 + whole) / (whole * 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CompletionStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 6, 30)
    }

    #[test]
    fn rate_rounds_half_up() {
        assert_eq!(rounded_percent(1, 3), 33);
        assert_eq!(rounded_percent(2, 3), 67);
        assert_eq!(rounded_percent(1, 8), 13);
        assert_eq!(rounded_percent(0, 0), 0);
        assert_eq!(rounded_percent(5, 5), 100);
    }

    #[test]
    fn no_habits_means_zero_rate() {
        let summary = summarize(&[], &CompletionStore::new(), today(), 30);
        assert_eq!(summary, AnalyticsSummary::default());
    }

    #[test]
    fn zero_length_window_means_zero_rate() {
        let habits = vec![Habit::new("h1", "Walk", &[])];
        let mut store = CompletionStore::new();
        store.toggle("h1", today());
        let summary = summarize(&habits, &store, today(), 0);
        assert_eq!(summary.average_completion_rate, 0);
        assert_eq!(summary.total_completions, 0);
        assert_eq!(summary.total_habits, 1);
    }

    #[test]
    fn one_day_window_is_today_only() {
        let habits = vec![Habit::new("h1", "Walk", &[])];
        let mut store = CompletionStore::new();
        store.toggle("h1", today());
        store.toggle("h1", today() - Days::new(1));
        let summary = summarize(&habits, &store, today(), 1);
        assert_eq!(summary.total_completions, 1);
        assert_eq!(summary.average_completion_rate, 100);
    }

    #[test]
    fn totals_span_habits_and_ignore_schedules() {
        let habits = vec![Habit::new("h1", "Walk", &[]), Habit::new("h2", "Gym", &[1])];
        let mut store = CompletionStore::new();
        for offset in 0..5 {
            store.toggle("h1", today() - Days::new(offset));
        }
        // outside the 10-day window
        store.toggle("h2", today() - Days::new(10));
        let summary = summarize(&habits, &store, today(), 10);
        assert_eq!(summary.total_habits, 2);
        assert_eq!(summary.total_completions, 5);
        assert_eq!(summary.active_habits, 1);
        assert_eq!(summary.average_completion_rate, 25);
    }

    #[test]
    fn completions_of_unknown_habits_are_not_counted() {
        let habits = vec![Habit::new("h1", "Walk", &[])];
        let mut store = CompletionStore::new();
        store.toggle("other", today());
        let summary = summarize(&habits, &store, today(), 7);
        assert_eq!(summary.total_completions, 0);
        assert_eq!(summary.active_habits, 0);
    }
}
