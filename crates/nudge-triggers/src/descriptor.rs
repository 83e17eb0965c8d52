//! Serialized descriptor payloads.
//!
//! The store treats these as opaque strings; the types here are the
//! parse/serialize contracts for the parts the bootstrap layer needs:
//! the trigger-parameter variants, the survey list (counted only), and
//! the runtime bookkeeping (last-fired timestamp).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use nudge_core::error::{NudgeError, Result};

/// Trigger parameters, keyed by the `type` discriminant field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TriggerDescriptor {
    Time(TimeTriggerDesc),
    Location(LocationTriggerDesc),
}

/// A clock-window trigger: fires within [start, end) on the given days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeTriggerDesc {
    /// "HH:MM", 24-hour.
    pub start: String,
    /// Absent means a point trigger at `start`.
    #[serde(default)]
    pub end: Option<String>,
    /// Weekday names; empty means every day.
    #[serde(default)]
    pub repeat_days: Vec<String>,
    /// Pick a random instant inside the window instead of `start`.
    #[serde(default)]
    pub randomize: bool,
}

/// A geofence trigger: fires on entry into a place category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationTriggerDesc {
    /// User-defined place category ("Home", "Work", ...).
    pub category: String,
    /// Suppress re-fires within this many minutes of leaving the fence.
    #[serde(default)]
    pub min_reentry_minutes: u32,
}

impl TriggerDescriptor {
    /// Parse a serialized trigger descriptor.
    pub fn parse(raw: &str) -> Result<Self> {
        serde_json::from_str(raw)
            .map_err(|e| NudgeError::Descriptor(format!("trigger descriptor: {e}")))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| NudgeError::Descriptor(format!("trigger descriptor: {e}")))
    }
}

/// The surveys a trigger fires for. The initializer only ever counts
/// them; their interpretation belongs to the notification layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    #[serde(default)]
    pub surveys: Vec<String>,
}

impl ActionDescriptor {
    pub fn parse(raw: &str) -> Result<Self> {
        serde_json::from_str(raw)
            .map_err(|e| NudgeError::Descriptor(format!("action descriptor: {e}")))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| NudgeError::Descriptor(format!("action descriptor: {e}")))
    }

    pub fn survey_count(&self) -> usize {
        self.surveys.len()
    }
}

/// Runtime bookkeeping carried per trigger.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuntimeDescriptor {
    /// When the trigger last fired; absent until the first fire.
    #[serde(default)]
    pub last_fired: Option<DateTime<Utc>>,
}

impl RuntimeDescriptor {
    pub fn parse(raw: &str) -> Result<Self> {
        serde_json::from_str(raw)
            .map_err(|e| NudgeError::Descriptor(format!("runtime descriptor: {e}")))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| NudgeError::Descriptor(format!("runtime descriptor: {e}")))
    }

    pub fn has_fired_timestamp(&self) -> bool {
        self.last_fired.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_variants_round_trip() {
        let time = TriggerDescriptor::Time(TimeTriggerDesc {
            start: "09:00".into(),
            end: Some("21:00".into()),
            repeat_days: vec!["mon".into(), "wed".into()],
            randomize: true,
        });
        let json = time.to_json().unwrap();
        assert!(json.contains(r#""type":"time""#));
        assert_eq!(TriggerDescriptor::parse(&json).unwrap(), time);

        let loc = TriggerDescriptor::parse(r#"{"type":"location","category":"Work"}"#).unwrap();
        match loc {
            TriggerDescriptor::Location(d) => {
                assert_eq!(d.category, "Work");
                assert_eq!(d.min_reentry_minutes, 0);
            }
            other => panic!("expected location variant, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_discriminant_is_an_error() {
        assert!(TriggerDescriptor::parse(r#"{"type":"weather","city":"SF"}"#).is_err());
        assert!(TriggerDescriptor::parse("not json").is_err());
    }

    #[test]
    fn test_action_descriptor_count() {
        let desc = ActionDescriptor::parse(r#"{"surveys":["Mood","Sleep"]}"#).unwrap();
        assert_eq!(desc.survey_count(), 2);

        let empty = ActionDescriptor::parse("{}").unwrap();
        assert_eq!(empty.survey_count(), 0);

        assert!(ActionDescriptor::parse("garbage").is_err());
    }

    #[test]
    fn test_runtime_descriptor_timestamp() {
        let none = RuntimeDescriptor::parse("{}").unwrap();
        assert!(!none.has_fired_timestamp());

        let fired = RuntimeDescriptor::parse(r#"{"last_fired":"2026-03-01T08:30:00Z"}"#).unwrap();
        assert!(fired.has_fired_timestamp());
        assert_eq!(
            fired.last_fired.unwrap(),
            "2026-03-01T08:30:00Z".parse::<DateTime<Utc>>().unwrap()
        );
    }
}
