//! Habit records as supplied by the workspace collaborator.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::schedule::Schedule;

/// Opaque habit identity.
///
/// Stored data carries ids both as strings and as bare numbers; both
/// deserialize to the same textual id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct HabitId(pub String);

impl<'de> Deserialize<'de> for HabitId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Self(s),
            RawId::Number(n) => Self(n.to_string()),
        })
    }
}

impl HabitId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for HabitId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for HabitId {
    fn from(v: &str) -> Self {
        Self(v.to_owned())
    }
}

impl From<String> for HabitId {
    fn from(v: String) -> Self {
        Self(v)
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A tracked habit. Immutable for the duration of an analytics computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Habit {
    pub id: HabitId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    /// Normalized on deserialization; see [`Schedule`].
    #[serde(default)]
    pub schedule: Schedule,
}

impl Habit {
    /// Creates a habit from raw schedule days in either encoding.
    #[must_use]
    pub fn new(id: impl Into<HabitId>, name: impl Into<String>, raw_days: &[i32]) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: None,
            color: None,
            schedule: Schedule::from_raw(raw_days),
        }
    }

    #[must_use]
    pub fn with_icon(self, icon: impl Into<String>) -> Self {
        Self { icon: Some(icon.into()), ..self }
    }

    #[must_use]
    pub fn with_color(self, color: impl Into<String>) -> Self {
        Self { color: Some(color.into()), ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_text_ids_match() {
        let a: HabitId = serde_json::from_str("123").unwrap();
        let b: HabitId = serde_json::from_str("\"123\"").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn habit_deserializes_with_legacy_schedule() {
        let habit: Habit = serde_json::from_str(
            r##"{"id": 42, "name": "Read", "icon": "book", "color": "#fff", "schedule": [7, 1]}"##,
        )
        .unwrap();
        assert_eq!(habit.id.as_str(), "42");
        assert_eq!(habit.schedule.days(), &[0, 1]);
        assert_eq!(habit.icon.as_deref(), Some("book"));
    }

    #[test]
    fn missing_schedule_means_daily() {
        let habit: Habit = serde_json::from_str(r#"{"id": "h1", "name": "Walk"}"#).unwrap();
        assert!(habit.schedule.is_unrestricted());
    }

    #[test]
    fn builder_sets_optional_fields() {
        let habit = Habit::new("h1", "Stretch", &[1, 3]).with_icon("🧘").with_color("teal");
        assert_eq!(habit.color.as_deref(), Some("teal"));
        assert_eq!(habit.schedule.days(), &[1, 3]);
    }
}
