use anyhow::{Context, Result};
use habitkit_core::{derive_traits, OnboardingAnswers};
use std::path::Path;

use crate::snapshot::read_input;

pub(crate) fn run_traits(file: &Path) -> Result<()> {
    let raw = read_input(file)?;
    let answers = OnboardingAnswers::from_json_str(&raw)
        .with_context(|| format!("invalid onboarding answers in {}", file.display()))?;
    let profile = derive_traits(&answers);
    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}
