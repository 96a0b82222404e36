//! Legacy key cleanup and verification for persisted completion stores.
//!
//! Both passes take a snapshot and return new values; nothing here touches
//! ambient storage. Values are opaque so unknown record fields survive.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::key::{completion_key, CompletionKey, KeyStyle};
use super::CompletionValue;

/// Options for [`clean_legacy_keys`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupOptions {
    /// Rewrite every retained key to one separator generation.
    pub rewrite_to: Option<KeyStyle>,
}

/// What a cleanup pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupReport {
    pub retained: usize,
    pub rewritten: usize,
    pub dropped_day_name: Vec<String>,
    pub dropped_unrecognized: Vec<String>,
    /// Keys that mapped onto an already-retained (date, habit) slot during a rewrite.
    pub collisions: Vec<String>,
}

impl CleanupReport {
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.dropped_day_name.len() + self.dropped_unrecognized.len()
    }
}

/// Key census of a store snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub total_keys: usize,
    pub date_based_keys: usize,
    pub day_name_keys: Vec<String>,
    pub unrecognized_keys: Vec<String>,
}

impl VerificationReport {
    /// `true` when only date-based keys remain.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.day_name_keys.is_empty() && self.unrecognized_keys.is_empty()
    }
}

/// Drops every key that is not date-based.
///
/// Day-name keys are never translated to a date; they are removed. With
/// [`CleanupOptions::rewrite_to`] set, retained keys are re-encoded. When two
/// generations name the same slot a completed value wins over a missed one;
/// between equals the first key in key order is kept.
#[must_use]
pub fn clean_legacy_keys<V: Clone + CompletionValue>(
    snapshot: &BTreeMap<String, V>,
    options: CleanupOptions,
) -> (BTreeMap<String, V>, CleanupReport) {
    let mut cleaned: BTreeMap<String, V> = BTreeMap::new();
    let mut report = CleanupReport::default();

    for (key, value) in snapshot {
        match CompletionKey::parse(key) {
            CompletionKey::Dated { date, habit_id } => {
                let target = match options.rewrite_to {
                    Some(style) => completion_key(date, habit_id.as_str(), style),
                    None => key.clone(),
                };
                if let Some(existing) = cleaned.get_mut(&target) {
                    report.collisions.push(key.clone());
                    if value.is_completed() && !existing.is_completed() {
                        *existing = value.clone();
                    }
                    continue;
                }
                if target != *key {
                    report.rewritten += 1;
                }
                cleaned.insert(target, value.clone());
                report.retained += 1;
            },
            CompletionKey::DayName { .. } => report.dropped_day_name.push(key.clone()),
            CompletionKey::Unrecognized => report.dropped_unrecognized.push(key.clone()),
        }
    }

    if report.dropped() > 0 || !report.collisions.is_empty() {
        tracing::warn!(
            day_name = report.dropped_day_name.len(),
            unrecognized = report.dropped_unrecognized.len(),
            collisions = report.collisions.len(),
            "removed legacy completion keys"
        );
    }
    tracing::debug!(retained = report.retained, rewritten = report.rewritten, "key cleanup finished");
    (cleaned, report)
}

/// Classifies every key of a snapshot without changing it.
#[must_use]
pub fn verify_keys<V>(snapshot: &BTreeMap<String, V>) -> VerificationReport {
    let mut report = VerificationReport { total_keys: snapshot.len(), ..VerificationReport::default() };
    for key in snapshot.keys() {
        match CompletionKey::parse(key) {
            CompletionKey::Dated { .. } => report.date_based_keys += 1,
            CompletionKey::DayName { .. } => report.day_name_keys.push(key.clone()),
            CompletionKey::Unrecognized => report.unrecognized_keys.push(key.clone()),
        }
    }
    report
}
