//! Analytics policy configuration.
//!
//! Defaults live in [`crate::constants`]; each knob can be overridden through
//! a `HABITKIT_*` environment variable.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_STREAK_LOOKBACK_DAYS, DEFAULT_WINDOW_DAYS, ENV_STREAK_LOOKBACK_DAYS, ENV_WEEK_START,
    ENV_WINDOW_DAYS,
};
use crate::env_config::parse_with_default;

/// Policy knobs shared by the streak, weekly and window aggregators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Maximum distance from `today` at which non-scheduled days may still be skipped.
    pub streak_lookback_days: u32,
    /// Number of calendar days in the dashboard totals window.
    pub window_days: u32,
    /// First day of a [`crate::WeekWindow`].
    pub week_start: Weekday,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            streak_lookback_days: DEFAULT_STREAK_LOOKBACK_DAYS,
            window_days: DEFAULT_WINDOW_DAYS,
            week_start: Weekday::Sun,
        }
    }
}

impl AnalyticsConfig {
    /// Reads overrides from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Reads overrides through `lookup`, falling back to defaults for
    /// missing or unparseable values.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            streak_lookback_days: parse_with_default(
                ENV_STREAK_LOOKBACK_DAYS,
                lookup(ENV_STREAK_LOOKBACK_DAYS).as_deref(),
                defaults.streak_lookback_days,
            ),
            window_days: parse_with_default(
                ENV_WINDOW_DAYS,
                lookup(ENV_WINDOW_DAYS).as_deref(),
                defaults.window_days,
            ),
            week_start: parse_with_default(
                ENV_WEEK_START,
                lookup(ENV_WEEK_START).as_deref(),
                defaults.week_start,
            ),
        }
    }

    #[must_use]
    pub fn with_streak_lookback_days(self, streak_lookback_days: u32) -> Self {
        Self { streak_lookback_days, ..self }
    }

    #[must_use]
    pub fn with_window_days(self, window_days: u32) -> Self {
        Self { window_days, ..self }
    }

    #[must_use]
    pub fn with_week_start(self, week_start: Weekday) -> Self {
        Self { week_start, ..self }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn defaults_match_constants() {
        let config = AnalyticsConfig::default();
        assert_eq!(config.streak_lookback_days, 90);
        assert_eq!(config.window_days, 30);
        assert_eq!(config.week_start, Weekday::Sun);
    }

    #[test]
    fn overrides_are_applied() {
        let config = AnalyticsConfig::from_lookup(lookup_from(&[
            (ENV_STREAK_LOOKBACK_DAYS, "120"),
            (ENV_WINDOW_DAYS, "7"),
            (ENV_WEEK_START, "monday"),
        ]));
        assert_eq!(config.streak_lookback_days, 120);
        assert_eq!(config.window_days, 7);
        assert_eq!(config.week_start, Weekday::Mon);
    }

    #[test]
    fn bad_override_keeps_default() {
        let config = AnalyticsConfig::from_lookup(lookup_from(&[
            (ENV_STREAK_LOOKBACK_DAYS, "-5"),
            (ENV_WEEK_START, "funday"),
        ]));
        assert_eq!(config, AnalyticsConfig::default());
    }

    #[test]
    fn builders_replace_single_field() {
        let config = AnalyticsConfig::default().with_window_days(14).with_week_start(Weekday::Mon);
        assert_eq!(config.window_days, 14);
        assert_eq!(config.week_start, Weekday::Mon);
        assert_eq!(config.streak_lookback_days, 90);
    }
}
