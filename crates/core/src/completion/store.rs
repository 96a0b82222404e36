//! Canonical in-memory completion store.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use super::{CompletionLookup, CompletionRecord};
use crate::habit::HabitId;

/// Completions keyed by habit, then by calendar date.
///
/// Every ingestion shape ([`super::CompletionSource`]) is folded into this
/// one structure before analytics run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionStore {
    habits: HashMap<HabitId, BTreeMap<NaiveDate, CompletionRecord>>,
}

impl CompletionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the record for (habit, date).
    pub fn insert(&mut self, habit_id: impl Into<HabitId>, date: NaiveDate, record: CompletionRecord) {
        self.habits.entry(habit_id.into()).or_default().insert(date, record);
    }

    /// Records a completion, keeping an existing `true` when sources disagree.
    pub fn merge(&mut self, habit_id: impl Into<HabitId>, date: NaiveDate, record: CompletionRecord) {
        let slot = self.habits.entry(habit_id.into()).or_default().entry(date).or_default();
        slot.completed |= record.completed;
    }

    /// The daily toggle action. Returns the new state.
    pub fn toggle(&mut self, habit_id: impl Into<HabitId>, date: NaiveDate) -> bool {
        let slot = self.habits.entry(habit_id.into()).or_default().entry(date).or_default();
        slot.completed = !slot.completed;
        slot.completed
    }

    #[must_use]
    pub fn record(&self, habit_id: &str, date: NaiveDate) -> Option<&CompletionRecord> {
        self.habits.get(habit_id).and_then(|days| days.get(&date))
    }

    /// Records for one habit in date order.
    pub fn records_for<'a>(
        &'a self,
        habit_id: &str,
    ) -> impl Iterator<Item = (NaiveDate, &'a CompletionRecord)> + 'a {
        self.habits.get(habit_id).into_iter().flat_map(|days| days.iter().map(|(d, r)| (*d, r)))
    }

    /// Number of habits with at least one record.
    #[must_use]
    pub fn habit_count(&self) -> usize {
        self.habits.len()
    }

    /// Total number of records, completed or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.habits.values().map(BTreeMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CompletionLookup for CompletionStore {
    fn is_completed_on(&self, habit_id: &str, date: NaiveDate) -> bool {
        self.record(habit_id, date).is_some_and(|r| r.completed)
    }

    fn completed_dates(&self, habit_id: &str) -> Vec<NaiveDate> {
        self.records_for(habit_id).filter(|(_, r)| r.completed).map(|(d, _)| d).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn missing_record_is_not_completed() {
        let store = CompletionStore::new();
        assert!(!store.is_completed_on("h1", date(2024, 6, 3)));
        assert!(store.completed_dates("h1").is_empty());
    }

    #[test]
    fn false_record_is_not_completed() {
        let mut store = CompletionStore::new();
        store.insert("h1", date(2024, 6, 3), CompletionRecord::missed());
        assert!(!store.is_completed_on("h1", date(2024, 6, 3)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn toggle_flips_state() {
        let mut store = CompletionStore::new();
        assert!(store.toggle("h1", date(2024, 6, 3)));
        assert!(store.is_completed_on("h1", date(2024, 6, 3)));
        assert!(!store.toggle("h1", date(2024, 6, 3)));
        assert!(!store.is_completed_on("h1", date(2024, 6, 3)));
    }

    #[test]
    fn merge_keeps_existing_completion() {
        let mut store = CompletionStore::new();
        store.merge("h1", date(2024, 6, 3), CompletionRecord::done());
        store.merge("h1", date(2024, 6, 3), CompletionRecord::missed());
        assert!(store.is_completed_on("h1", date(2024, 6, 3)));
    }

    #[test]
    fn completed_dates_are_sorted() {
        let mut store = CompletionStore::new();
        store.insert("h1", date(2024, 6, 5), CompletionRecord::done());
        store.insert("h1", date(2024, 6, 1), CompletionRecord::done());
        store.insert("h1", date(2024, 6, 3), CompletionRecord::missed());
        assert_eq!(store.completed_dates("h1"), vec![date(2024, 6, 1), date(2024, 6, 5)]);
        assert_eq!(store.habit_count(), 1);
    }
}
