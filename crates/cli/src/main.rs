use anyhow::Result;
use chrono::{Local, NaiveDate, Weekday};
use clap::{Parser, Subcommand};
use habitkit_core::{AnalyticsConfig, KeyStyle};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod commands;
mod snapshot;

#[derive(Parser)]
#[command(name = "habitkit")]
#[command(about = "Habit streak analytics and onboarding tools", long_about = None)]
struct Cli {
    /// Reference date for streaks and windows (defaults to the local date)
    #[arg(long, global = true)]
    today: Option<NaiveDate>,
    /// Overrides HABITKIT_STREAK_LOOKBACK_DAYS
    #[arg(long, global = true)]
    lookback_days: Option<u32>,
    /// Overrides HABITKIT_WINDOW_DAYS
    #[arg(long, global = true)]
    window_days: Option<u32>,
    /// Overrides HABITKIT_WEEK_START
    #[arg(long, global = true)]
    week_start: Option<Weekday>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Current streak per habit
    Streak {
        #[arg(short, long)]
        file: Option<PathBuf>,
        #[arg(long)]
        habit: Option<String>,
    },
    /// Completed/target/met for the week containing --today
    Weekly {
        #[arg(short, long)]
        file: Option<PathBuf>,
        #[arg(long)]
        habit: Option<String>,
    },
    /// Completion totals over the trailing window
    Summary {
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Totals plus per-habit streaks and weekly progress
    Dashboard {
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Derive the trait profile from onboarding answers
    Traits {
        #[arg(short, long, help = "Onboarding answers JSON ('-' for stdin)")]
        file: PathBuf,
    },
    /// Remove day-name and unparseable keys from a keyed completion store
    CleanKeys {
        #[arg(short, long)]
        file: PathBuf,
        #[arg(long, help = "Re-encode retained keys: underscore or hyphen")]
        rewrite: Option<KeyStyle>,
        #[arg(short, long, help = "Write the cleaned store here instead of stdout")]
        output: Option<PathBuf>,
    },
    /// Report keys that are not date-based
    VerifyKeys {
        #[arg(short, long)]
        file: PathBuf,
        #[arg(long, help = "Fail when any non date-based key remains")]
        strict: bool,
    },
}

pub(crate) fn get_snapshot_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("habitkit")
        .join("snapshot.json")
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn build_config(cli: &Cli) -> AnalyticsConfig {
    let mut config = AnalyticsConfig::from_env();
    if let Some(days) = cli.lookback_days {
        config = config.with_streak_lookback_days(days);
    }
    if let Some(days) = cli.window_days {
        config = config.with_window_days(days);
    }
    if let Some(day) = cli.week_start {
        config = config.with_week_start(day);
    }
    config
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = build_config(&cli);
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    tracing::debug!(%today, ?config, "resolved analytics settings");

    match cli.command {
        Commands::Streak { file, habit } => {
            commands::analytics::run_streak(file, habit.as_deref(), today, &config)?;
        },
        Commands::Weekly { file, habit } => {
            commands::analytics::run_weekly(file, habit.as_deref(), today, &config)?;
        },
        Commands::Summary { file } => commands::analytics::run_summary(file, today, &config)?,
        Commands::Dashboard { file } => commands::analytics::run_dashboard(file, today, &config)?,
        Commands::Traits { file } => commands::onboarding::run_traits(&file)?,
        Commands::CleanKeys { file, rewrite, output } => {
            commands::keys::run_clean(&file, rewrite, output.as_deref())?;
        },
        Commands::VerifyKeys { file, strict } => commands::keys::run_verify(&file, strict)?,
    }

    Ok(())
}
