//! Ingestion of the persisted completion shapes into a [`CompletionStore`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::key::{parse_date, CompletionKey};
use super::{CompletionRecord, CompletionStore};
use crate::error::{CoreError, Result};
use crate::habit::HabitId;

/// One row of the flat completion shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatCompletion {
    #[serde(alias = "habitId")]
    pub habit_id: HabitId,
    /// `YYYY-MM-DD`
    pub date: String,
    #[serde(default)]
    pub completed: bool,
}

/// The completion shapes different call sites persist.
///
/// Deserialization tries the shapes in declaration order; a keyed map never
/// parses as nested because its values are records, not date maps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompletionSource {
    /// habit id → `YYYY-MM-DD` → record
    Nested(BTreeMap<String, BTreeMap<String, CompletionRecord>>),
    /// list of `{habit_id, date, completed}` rows
    Flat(Vec<FlatCompletion>),
    /// store key (`YYYY-MM-DD_habitId`, `YYYY-MM-DD-habitId`) → record
    Keyed(BTreeMap<String, CompletionRecord>),
}

impl Default for CompletionSource {
    fn default() -> Self {
        Self::Nested(BTreeMap::new())
    }
}

/// Counts from a lenient ingestion pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    pub accepted: usize,
    pub dropped: usize,
}

enum Entry<'a> {
    Accepted(HabitId, chrono::NaiveDate, CompletionRecord),
    Rejected(&'a str),
}

impl CompletionSource {
    fn entries(&self) -> Vec<Entry<'_>> {
        match self {
            Self::Nested(habits) => habits
                .iter()
                .flat_map(|(habit_id, days)| {
                    days.iter().map(move |(raw_date, record)| match parse_date(raw_date) {
                        Some(date) => Entry::Accepted(HabitId::from(habit_id.as_str()), date, *record),
                        None => Entry::Rejected(raw_date.as_str()),
                    })
                })
                .collect(),
            Self::Flat(rows) => rows
                .iter()
                .map(|row| match parse_date(&row.date) {
                    Some(date) => Entry::Accepted(
                        row.habit_id.clone(),
                        date,
                        CompletionRecord { completed: row.completed },
                    ),
                    None => Entry::Rejected(row.date.as_str()),
                })
                .collect(),
            Self::Keyed(keys) => keys
                .iter()
                .map(|(key, record)| match CompletionKey::parse(key) {
                    CompletionKey::Dated { date, habit_id } => Entry::Accepted(habit_id, date, *record),
                    CompletionKey::DayName { .. } | CompletionKey::Unrecognized => {
                        Entry::Rejected(key.as_str())
                    },
                })
                .collect(),
        }
    }
}

impl CompletionStore {
    /// Lenient ingestion: entries without a usable calendar date are dropped
    /// and logged, never fatal.
    #[must_use]
    pub fn from_source(source: &CompletionSource) -> (Self, IngestReport) {
        let mut store = Self::new();
        let mut report = IngestReport::default();
        for entry in source.entries() {
            match entry {
                Entry::Accepted(habit_id, date, record) => {
                    store.merge(habit_id, date, record);
                    report.accepted += 1;
                },
                Entry::Rejected(raw) => {
                    tracing::warn!(entry = raw, "dropping completion without a calendar date");
                    report.dropped += 1;
                },
            }
        }
        tracing::debug!(accepted = report.accepted, dropped = report.dropped, "completions ingested");
        (store, report)
    }

    /// Strict ingestion: the first entry without a usable calendar date is
    /// an error.
    pub fn try_from_source(source: &CompletionSource) -> Result<Self> {
        let mut store = Self::new();
        for entry in source.entries() {
            match entry {
                Entry::Accepted(habit_id, date, record) => store.merge(habit_id, date, record),
                Entry::Rejected(raw) => return Err(CoreError::InvalidDate(raw.to_owned())),
            }
        }
        Ok(store)
    }
}
