//! Schedule-aware streak calculation.
//!
//! A streak counts scheduled days, walking backward from `today`, that each
//! have a completion. Non-scheduled days neither count nor break the run.

use chrono::NaiveDate;

use crate::completion::CompletionLookup;
use crate::habit::Habit;

/// Current streak ending at `today`.
///
/// The walk stops at the first scheduled day without a completion (including
/// `today` itself). Skipping a non-scheduled day more than `lookback_days`
/// before `today` also stops it, which bounds the scan for schedules that
/// never match.
#[must_use]
pub fn current_streak<L>(habit: &Habit, lookup: &L, today: NaiveDate, lookback_days: u32) -> u32
where
    L: CompletionLookup + ?Sized,
{
    let mut streak = 0_u32;
    let mut day = today;

    loop {
        if !habit.schedule.is_due_on(day) {
            if (today - day).num_days() > i64::from(lookback_days) {
                tracing::trace!(habit = %habit.id, %day, "streak lookback bound reached");
                break;
            }
        } else if lookup.is_completed_on(habit.id.as_str(), day) {
            streak = streak.saturating_add(1);
        } else {
            break;
        }

        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }

    tracing::debug!(habit = %habit.id, streak, "current streak computed");
    streak
}

/// Longest streak anywhere between the first recorded completion and `today`.
///
/// Uses the same rules as [`current_streak`] without the lookback bound,
/// since the walk is limited by the recorded history.
#[must_use]
pub fn best_streak<L>(habit: &Habit, lookup: &L, today: NaiveDate) -> u32
where
    L: CompletionLookup + ?Sized,
{
    let completed = lookup.completed_dates(habit.id.as_str());
    let Some(first) = completed.first().copied().filter(|first| *first <= today) else {
        return 0;
    };

    let mut best = 0_u32;
    let mut run = 0_u32;
    for day in first.iter_days().take_while(|day| *day <= today) {
        if !habit.schedule.is_due_on(day) {
            continue;
        }
        if completed.binary_search(&day).is_ok() {
            run = run.saturating_add(1);
            best = best.max(run);
        } else {
            run = 0;
        }
    }
    best
}
