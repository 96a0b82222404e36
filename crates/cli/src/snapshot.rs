//! JSON input handling shared by the commands.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use habitkit_core::{CompletionSource, CompletionStore, Habit};
use serde::Deserialize;

/// Habits plus completions in any persisted shape.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Snapshot {
    #[serde(default)]
    pub habits: Vec<Habit>,
    #[serde(default, alias = "entries")]
    pub completions: CompletionSource,
}

impl Snapshot {
    /// Habits narrowed to `habit` when given.
    pub fn select_habits(&self, habit: Option<&str>) -> Result<Vec<&Habit>> {
        let selected: Vec<&Habit> =
            self.habits.iter().filter(|h| habit.is_none_or(|id| h.id.as_str() == id)).collect();
        if let (Some(id), true) = (habit, selected.is_empty()) {
            anyhow::bail!("Habit not found: {id}");
        }
        Ok(selected)
    }

    pub fn store(&self) -> CompletionStore {
        let (store, report) = CompletionStore::from_source(&self.completions);
        if report.dropped > 0 {
            tracing::warn!(dropped = report.dropped, "some completions were skipped");
        }
        store
    }
}

/// Reads a file, or stdin when the path is `-`.
pub(crate) fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input).context("failed to read stdin")?;
        return Ok(input);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

pub(crate) fn load_snapshot(path: Option<PathBuf>) -> Result<Snapshot> {
    let path = path.unwrap_or_else(crate::get_snapshot_path);
    let raw = read_input(&path)?;
    serde_json::from_str(&raw).with_context(|| format!("invalid snapshot in {}", path.display()))
}
