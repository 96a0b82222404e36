use anyhow::Result;
use chrono::NaiveDate;
use habitkit_core::{
    build_dashboard, current_streak, summarize, weekly_progress, AnalyticsConfig, WeekWindow,
};
use serde_json::json;
use std::path::PathBuf;

use crate::snapshot::load_snapshot;

pub(crate) fn run_streak(
    file: Option<PathBuf>,
    habit: Option<&str>,
    today: NaiveDate,
    config: &AnalyticsConfig,
) -> Result<()> {
    let snapshot = load_snapshot(file)?;
    let store = snapshot.store();
    let streaks: Vec<_> = snapshot
        .select_habits(habit)?
        .into_iter()
        .map(|h| {
            json!({
                "habit_id": h.id,
                "name": h.name,
                "current_streak": current_streak(h, &store, today, config.streak_lookback_days),
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&streaks)?);
    Ok(())
}

pub(crate) fn run_weekly(
    file: Option<PathBuf>,
    habit: Option<&str>,
    today: NaiveDate,
    config: &AnalyticsConfig,
) -> Result<()> {
    let snapshot = load_snapshot(file)?;
    let store = snapshot.store();
    let week = WeekWindow::containing(today, config.week_start);
    let progress: Vec<_> = snapshot
        .select_habits(habit)?
        .into_iter()
        .map(|h| {
            let weekly = weekly_progress(h, &store, week);
            json!({
                "habit_id": h.id,
                "week_start": week.start(),
                "completed": weekly.completed,
                "target": weekly.target,
                "met": weekly.met,
                "exceeds_target": weekly.exceeds_target(),
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&progress)?);
    Ok(())
}

pub(crate) fn run_summary(file: Option<PathBuf>, today: NaiveDate, config: &AnalyticsConfig) -> Result<()> {
    let snapshot = load_snapshot(file)?;
    let store = snapshot.store();
    let summary = summarize(&snapshot.habits, &store, today, config.window_days);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

pub(crate) fn run_dashboard(file: Option<PathBuf>, today: NaiveDate, config: &AnalyticsConfig) -> Result<()> {
    let snapshot = load_snapshot(file)?;
    let store = snapshot.store();
    let dashboard = build_dashboard(&snapshot.habits, &store, today, config);
    println!("{}", serde_json::to_string_pretty(&dashboard)?);
    Ok(())
}
