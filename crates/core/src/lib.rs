//! Core types and analytics for habitkit
//!
//! Pure functions over an explicit data model: schedule normalization,
//! completion lookups, streaks, weekly progress, window totals and the
//! onboarding trait profile. Nothing in this crate performs I/O.

mod analytics;
mod completion;
mod config;
pub mod constants;
mod dashboard;
mod env_config;
mod error;
mod habit;
mod onboarding;
mod schedule;
mod streak;
mod weekly;

pub use analytics::*;
pub use completion::*;
pub use config::*;
pub use constants::DEFAULT_STREAK_LOOKBACK_DAYS;
pub use dashboard::*;
pub use env_config::*;
pub use error::*;
pub use habit::*;
pub use onboarding::*;
pub use schedule::*;
pub use streak::*;
pub use weekly::*;
