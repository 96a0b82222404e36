//! Onboarding trait derivation.
//!
//! Maps a user's stated goals, capacity and preferred times onto the
//! four-axis [`TraitProfile`] that tunes how the app talks to them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::DEFAULT_CAPACITY;
use crate::error::{CoreError, Result};

const SOFT_GOALS: &[&str] = &["mindfulness", "social"];
const HARD_GOALS: &[&str] = &["productivity", "learning"];
const CREATIVE_GOALS: &[&str] = &["creative"];
const MORNING: &str = "morning";

/// How much the user wants to take on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capacity {
    Light,
    #[default]
    Balanced,
    Full,
}

impl FromStr for Capacity {
    type Err = CoreError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "balanced" => Ok(Self::Balanced),
            "full" => Ok(Self::Full),
            other => Err(CoreError::InvalidArgument(format!("unknown capacity: {other}"))),
        }
    }
}

/// Snapshot of the onboarding answers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingAnswers {
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub capacity: Capacity,
    #[serde(default, alias = "preferred_times")]
    pub preferred_times: Vec<String>,
}

impl OnboardingAnswers {
    /// Parses untyped answers, failing fast on a wrong shape.
    ///
    /// Absent or `null` fields take their defaults. A field of the wrong JSON
    /// type is an [`CoreError::InvalidArgument`]. An unrecognized capacity
    /// string falls back to `balanced`.
    pub fn from_json(value: &Value) -> Result<Self> {
        let Some(obj) = value.as_object() else {
            return Err(CoreError::InvalidArgument("onboarding answers must be an object".to_owned()));
        };

        let goals = string_list(obj.get("goals"), "goals")?;
        let preferred_times = string_list(
            obj.get("preferredTimes").or_else(|| obj.get("preferred_times")),
            "preferredTimes",
        )?;
        let capacity = match obj.get("capacity") {
            None | Some(Value::Null) => Capacity::default(),
            Some(Value::String(raw)) => raw.parse().unwrap_or_else(|_| {
                tracing::debug!(capacity = %raw, default = DEFAULT_CAPACITY, "unrecognized capacity");
                Capacity::default()
            }),
            Some(other) => {
                return Err(CoreError::InvalidArgument(format!(
                    "capacity must be a string, got {}",
                    json_type(other)
                )));
            },
        };

        Ok(Self { goals, capacity, preferred_times })
    }

    /// Parses answers from raw JSON text.
    ///
    /// Malformed JSON is a [`CoreError::Serialization`]; the parsed value then
    /// goes through [`Self::from_json`].
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw)?;
        Self::from_json(&value)
    }
}

fn string_list(value: Option<&Value>, field: &str) -> Result<Vec<String>> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_owned).ok_or_else(|| {
                    CoreError::InvalidArgument(format!(
                        "{field} must contain only strings, got {}",
                        json_type(item)
                    ))
                })
            })
            .collect(),
        Some(other) => Err(CoreError::InvalidArgument(format!(
            "{field} must be an array, got {}",
            json_type(other)
        ))),
    }
}

const fn json_type(value: &Value) -> &'static str {
    match *value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Warm,
    Direct,
    Playful,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Focus {
    Wins,
    Patterns,
    Actionable,
    Balanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Concise,
    Detailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accountability {
    Gentle,
    Honest,
    Tough,
}

/// Communication profile derived once at onboarding completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitProfile {
    pub tone: Tone,
    pub focus: Focus,
    pub verbosity: Verbosity,
    pub accountability: Accountability,
}

impl fmt::Display for TraitProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tone={:?} focus={:?} verbosity={:?} accountability={:?}",
            self.tone, self.focus, self.verbosity, self.accountability
        )
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct GoalCounts {
    soft: usize,
    hard: usize,
    creative: usize,
}

impl GoalCounts {
    fn from_goals(goals: &[String]) -> Self {
        let count = |category: &[&str]| goals.iter().filter(|g| category.contains(&g.as_str())).count();
        Self { soft: count(SOFT_GOALS), hard: count(HARD_GOALS), creative: count(CREATIVE_GOALS) }
    }
}

/// Derives the trait profile. Total: unknown goals are ignored.
#[must_use]
pub fn derive_traits(answers: &OnboardingAnswers) -> TraitProfile {
    let accountability = match answers.capacity {
        Capacity::Light => Accountability::Gentle,
        Capacity::Full => Accountability::Tough,
        Capacity::Balanced => Accountability::Honest,
    };
    let verbosity = match answers.capacity {
        Capacity::Full => Verbosity::Detailed,
        Capacity::Light | Capacity::Balanced => Verbosity::Concise,
    };

    let counts = GoalCounts::from_goals(&answers.goals);
    let mut tone = if counts.creative > 0 && counts.soft == 0 && counts.hard == 0 {
        Tone::Playful
    } else if counts.hard > counts.soft {
        Tone::Direct
    } else {
        Tone::Warm
    };
    let focus = if counts.hard > counts.soft {
        Focus::Patterns
    } else if counts.soft > counts.hard {
        Focus::Wins
    } else {
        Focus::Balanced
    };

    // Only a fully ambiguous goal signal consults preferred times.
    if tone == Tone::Warm && focus == Focus::Balanced && answers.preferred_times == [MORNING] {
        tone = Tone::Direct;
    }

    let profile = TraitProfile { tone, focus, verbosity, accountability };
    tracing::debug!(%profile, ?counts, "trait profile derived");
    profile
}
