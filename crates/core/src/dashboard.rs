//! Per-habit summaries composed from the streak, weekly and window aggregators.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analytics::{summarize, AnalyticsSummary};
use crate::completion::CompletionLookup;
use crate::config::AnalyticsConfig;
use crate::habit::{Habit, HabitId};
use crate::streak::{best_streak, current_streak};
use crate::weekly::{weekly_progress, WeekWindow, WeeklyProgress};

/// Everything the dashboard shows for one habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitSummary {
    pub habit_id: HabitId,
    pub name: String,
    pub schedule_label: String,
    pub current_streak: u32,
    pub best_streak: u32,
    pub weekly: WeeklyProgress,
    pub exceeds_target: bool,
}

/// Dashboard view model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    pub today: NaiveDate,
    pub week: WeekWindow,
    pub summary: AnalyticsSummary,
    pub habits: Vec<HabitSummary>,
    /// Longest best streak across all habits.
    pub best_streak: u32,
}

/// Summary for a single habit.
#[must_use]
pub fn summarize_habit<L>(habit: &Habit, lookup: &L, today: NaiveDate, config: &AnalyticsConfig) -> HabitSummary
where
    L: CompletionLookup + ?Sized,
{
    let week = WeekWindow::containing(today, config.week_start);
    let weekly = weekly_progress(habit, lookup, week);
    HabitSummary {
        habit_id: habit.id.clone(),
        name: habit.name.clone(),
        schedule_label: habit.schedule.label().full(),
        current_streak: current_streak(habit, lookup, today, config.streak_lookback_days),
        best_streak: best_streak(habit, lookup, today),
        weekly,
        exceeds_target: weekly.exceeds_target(),
    }
}

/// Builds the dashboard for `habits` in their given order.
#[must_use]
pub fn build_dashboard<L>(habits: &[Habit], lookup: &L, today: NaiveDate, config: &AnalyticsConfig) -> Dashboard
where
    L: CompletionLookup + ?Sized,
{
    let summaries: Vec<HabitSummary> =
        habits.iter().map(|habit| summarize_habit(habit, lookup, today, config)).collect();
    let best = summaries.iter().map(|s| s.best_streak).max().unwrap_or(0);

    Dashboard {
        today,
        week: WeekWindow::containing(today, config.week_start),
        summary: summarize(habits, lookup, today, config.window_days),
        habits: summaries,
        best_streak: best,
    }
}
