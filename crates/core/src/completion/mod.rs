//! Completion records and the read-only lookup the analytics consume.

mod cleanup;
mod key;
mod source;
mod store;


pub use cleanup::*;
pub use key::*;
pub use source::*;
pub use store::*;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Completion state for one (habit, calendar date) pair.
///
/// A missing record means the same as `completed = false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    #[serde(default)]
    pub completed: bool,
}

impl CompletionRecord {
    #[must_use]
    pub const fn done() -> Self {
        Self { completed: true }
    }

    #[must_use]
    pub const fn missed() -> Self {
        Self { completed: false }
    }
}

/// A stored completion value that can report whether it marks a done slot.
pub trait CompletionValue {
    fn is_completed(&self) -> bool;
}

impl CompletionValue for CompletionRecord {
    fn is_completed(&self) -> bool {
        self.completed
    }
}

impl CompletionValue for serde_json::Value {
    fn is_completed(&self) -> bool {
        self.get("completed").and_then(serde_json::Value::as_bool).unwrap_or(false)
    }
}

/// Read-only completion lookup used by every aggregator.
///
/// Implementations must be total: unknown habits and untracked dates
/// answer `false` / empty rather than failing.
pub trait CompletionLookup {
    /// Whether `habit_id` has a `completed = true` record on `date`.
    fn is_completed_on(&self, habit_id: &str, date: NaiveDate) -> bool;

    /// Dates with `completed = true` for `habit_id`, ascending.
    fn completed_dates(&self, habit_id: &str) -> Vec<NaiveDate>;
}
