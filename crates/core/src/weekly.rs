//! Weekly progress against a habit's schedule.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::completion::CompletionLookup;
use crate::constants::DAYS_PER_WEEK;
use crate::habit::Habit;

/// A seven-day window, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeekWindow {
    start: NaiveDate,
}

impl WeekWindow {
    /// The window beginning on `start`.
    #[must_use]
    pub const fn starting(start: NaiveDate) -> Self {
        Self { start }
    }

    /// The window containing `date` whose first day is `week_start`.
    #[must_use]
    pub fn containing(date: NaiveDate, week_start: Weekday) -> Self {
        let offset = (date.weekday().num_days_from_monday() + DAYS_PER_WEEK
            - week_start.num_days_from_monday())
            % DAYS_PER_WEEK;
        let start = date.checked_sub_days(Days::new(u64::from(offset))).unwrap_or(date);
        Self { start }
    }

    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.days().last().unwrap_or(self.start)
    }

    /// Calendar days of the window in order.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take(DAYS_PER_WEEK as usize)
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end()
    }
}

/// Completed versus scheduled occurrences in one week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyProgress {
    /// Days in the window with a completion, scheduled or not.
    pub completed: u32,
    /// Scheduled occurrences in the window.
    pub target: u32,
    /// `completed >= target`; a zero target is met.
    pub met: bool,
}

impl WeeklyProgress {
    #[must_use]
    pub const fn new(completed: u32, target: u32) -> Self {
        Self { completed, target, met: completed >= target }
    }

    /// `completed` capped at `target` for progress bars.
    #[must_use]
    pub fn display_completed(&self) -> u32 {
        self.completed.min(self.target)
    }

    /// Completions beyond the target.
    #[must_use]
    pub const fn overflow(&self) -> u32 {
        self.completed.saturating_sub(self.target)
    }

    #[must_use]
    pub const fn exceeds_target(&self) -> bool {
        self.completed > self.target
    }
}

/// Progress for `habit` within `window`.
#[must_use]
pub fn weekly_progress<L>(habit: &Habit, lookup: &L, window: WeekWindow) -> WeeklyProgress
where
    L: CompletionLookup + ?Sized,
{
    let mut target = 0_u32;
    let mut completed = 0_u32;
    for day in window.days() {
        if habit.schedule.is_due_on(day) {
            target += 1;
        }
        if lookup.is_completed_on(habit.id.as_str(), day) {
            completed += 1;
        }
    }
    let progress = WeeklyProgress::new(completed, target);
    tracing::debug!(habit = %habit.id, completed, target, met = progress.met, "weekly progress computed");
    progress
}
