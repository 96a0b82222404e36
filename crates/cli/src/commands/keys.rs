//! Legacy completion key cleanup over a keyed store file.
//!
//! The input is the raw store: a JSON object mapping keys to records.
//! Record bodies are passed through untouched.

use anyhow::{Context, Result};
use habitkit_core::{clean_legacy_keys, verify_keys, CleanupOptions, KeyStyle};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::path::Path;

use crate::ensure_parent_dir;
use crate::snapshot::read_input;

fn load_store(file: &Path) -> Result<BTreeMap<String, Value>> {
    let raw = read_input(file)?;
    serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a keyed completion store", file.display()))
}

pub(crate) fn run_clean(file: &Path, rewrite: Option<KeyStyle>, output: Option<&Path>) -> Result<()> {
    let store = load_store(file)?;
    let (cleaned, report) = clean_legacy_keys(&store, CleanupOptions { rewrite_to: rewrite });

    match output {
        Some(path) => {
            ensure_parent_dir(path)?;
            std::fs::write(path, serde_json::to_string_pretty(&cleaned)?)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        },
        None => {
            println!("{}", serde_json::to_string_pretty(&json!({ "store": cleaned, "report": report }))?);
        },
    }

    let verification = verify_keys(&cleaned);
    if !verification.is_clean() {
        anyhow::bail!("cleanup left {} legacy keys behind", verification.day_name_keys.len());
    }
    Ok(())
}

pub(crate) fn run_verify(file: &Path, strict: bool) -> Result<()> {
    let store = load_store(file)?;
    let report = verify_keys(&store);
    println!("{}", serde_json::to_string_pretty(&report)?);
    if strict && !report.is_clean() {
        anyhow::bail!(
            "{} day-name and {} unrecognized keys remain",
            report.day_name_keys.len(),
            report.unrecognized_keys.len()
        );
    }
    Ok(())
}
