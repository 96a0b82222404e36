//! Shared constants for habitkit.
//!
//! Centralizes policy numbers so callers and config defaults agree.

/// How far back (in days) the streak walk may skip non-scheduled days
/// before giving up. Bounds the scan for sparse schedules with no history.
pub const DEFAULT_STREAK_LOOKBACK_DAYS: u32 = 90;

/// Default analytics window for dashboard totals.
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// Number of days in a week window.
pub const DAYS_PER_WEEK: u32 = 7;

/// Capacity assumed when onboarding answers omit it.
pub const DEFAULT_CAPACITY: &str = "balanced";

/// Env var overriding [`DEFAULT_STREAK_LOOKBACK_DAYS`].
pub const ENV_STREAK_LOOKBACK_DAYS: &str = "HABITKIT_STREAK_LOOKBACK_DAYS";

/// Env var overriding [`DEFAULT_WINDOW_DAYS`].
pub const ENV_WINDOW_DAYS: &str = "HABITKIT_WINDOW_DAYS";

/// Env var selecting the first day of a week window (e.g. `sunday`, `mon`).
pub const ENV_WEEK_START: &str = "HABITKIT_WEEK_START";
