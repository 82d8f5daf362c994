//! call.signal_bundle.v1 schema definition
//!
//! One bundle carries every finalized upstream signal for a single call:
//! - Policy violations from the compliance detector
//! - Threat tags and per-window emotional readings
//! - The diarized transcript
//! - Qualitative agent conduct ratings
//! - Call timing and prohibited phrase hits
//!
//! Scalar fields are [`Lenient`] and lists are [`LenientList`]: a value of the
//! wrong JSON type is kept aside instead of failing the whole bundle, and the
//! normalizer records it as an anomaly.

use std::ops::Deref;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Current schema version
pub const SCHEMA_VERSION: &str = "call.signal_bundle.v1";

/// Raw signal bundle for one call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCallBundle {
    /// Schema version; checked only when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<Lenient<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_id: Option<Lenient<String>>,

    #[serde(default)]
    pub violations: LenientList<RawViolation>,

    #[serde(default)]
    pub threats: LenientList<RawThreat>,

    /// Per-window emotional readings
    #[serde(default)]
    pub emotions: LenientList<RawEmotion>,

    /// Diarized transcript, in call order
    #[serde(default)]
    pub utterances: LenientList<RawUtterance>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_conduct: Option<Lenient<RawConduct>>,

    /// Explicit out-of-hours flag; wins over `call_started_at`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_violation: Option<Lenient<bool>>,

    /// Call start as RFC 3339
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_started_at: Option<Lenient<String>>,

    #[serde(default)]
    pub prohibited_phrase_hits: LenientList<RawPhraseHit>,

    /// Free-form status hint, e.g. "pending" or "under review"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_status: Option<Lenient<String>>,
}

/// Policy violation as reported by the detector
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawViolation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clause_id: Option<Lenient<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Lenient<String>>,
    #[serde(default, alias = "violation_type", skip_serializing_if = "Option::is_none")]
    pub category: Option<Lenient<String>>,
    #[serde(default, alias = "description", alias = "quote", skip_serializing_if = "Option::is_none")]
    pub evidence: Option<Lenient<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<RawTimestamp>,
}

/// Threat tag: `{"kind": "explicit"}`, a free-text description, or anything
/// else upstream sent in its place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawThreat {
    Tagged {
        kind: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },
    Text(String),
    Other(Value),
}

/// Emotional reading for one window of the call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEmotion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<Lenient<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<Lenient<f64>>,
    #[serde(default, alias = "arousal", skip_serializing_if = "Option::is_none")]
    pub acoustic_arousal: Option<Lenient<String>>,
}

/// One diarized utterance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawUtterance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<Lenient<String>>,
    #[serde(default, alias = "message", skip_serializing_if = "Option::is_none")]
    pub text: Option<Lenient<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<RawTimestamp>,
}

/// Qualitative agent ratings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawConduct {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub politeness: Option<Lenient<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empathy: Option<Lenient<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professionalism: Option<Lenient<String>>,
}

/// Prohibited phrase detected upstream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPhraseHit {
    pub phrase: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<RawTimestamp>,
}

/// Offset from call start: seconds, or a `MM:SS` / `HH:MM:SS` clock string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    Seconds(f64),
    Clock(String),
    Other(Value),
}

impl RawTimestamp {
    /// Offset in seconds, or `None` when the value cannot be read as one
    pub fn seconds(&self) -> Option<f64> {
        match self {
            RawTimestamp::Seconds(secs) => Some(*secs),
            RawTimestamp::Clock(clock) => parse_clock(clock),
            RawTimestamp::Other(_) => None,
        }
    }
}

/// A scalar field as it arrived: the expected type, or the raw value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Lenient<T> {
    Valid(T),
    Malformed(Value),
}

impl<T> Lenient<T> {
    pub fn valid(&self) -> Option<&T> {
        match self {
            Lenient::Valid(value) => Some(value),
            Lenient::Malformed(_) => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Lenient::Malformed(_))
    }
}

impl<T> From<T> for Lenient<T> {
    fn from(value: T) -> Self {
        Lenient::Valid(value)
    }
}

impl Lenient<f64> {
    /// The number, also read from a numeric string
    pub fn number(&self) -> Option<f64> {
        match self {
            Lenient::Valid(value) => Some(*value),
            Lenient::Malformed(Value::String(s)) => {
                s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
            }
            Lenient::Malformed(_) => None,
        }
    }
}

impl Lenient<bool> {
    /// The flag, also read from "true" / "false" strings
    pub fn flag(&self) -> Option<bool> {
        match self {
            Lenient::Valid(value) => Some(*value),
            Lenient::Malformed(Value::String(s)) => match s.trim().to_lowercase().as_str() {
                "true" | "yes" => Some(true),
                "false" | "no" => Some(false),
                _ => None,
            },
            Lenient::Malformed(_) => None,
        }
    }
}

/// A list whose unreadable entries are dropped and counted.
///
/// `null` reads as an empty list; any other non-array value counts as one
/// dropped entry.
#[derive(Debug, Clone, PartialEq)]
pub struct LenientList<T> {
    items: Vec<T>,
    dropped: usize,
}

impl<T> LenientList<T> {
    /// Entries that could not be read
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

impl<T> Default for LenientList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            dropped: 0,
        }
    }
}

impl<T> From<Vec<T>> for LenientList<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items, dropped: 0 }
    }
}

impl<T> Deref for LenientList<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for LenientList<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = match Value::deserialize(deserializer)? {
            Value::Null => return Ok(Self::default()),
            Value::Array(entries) => entries,
            _ => {
                return Ok(Self {
                    items: Vec::new(),
                    dropped: 1,
                })
            }
        };

        let mut list = Self::default();
        for entry in entries {
            match serde_json::from_value(entry) {
                Ok(item) => list.items.push(item),
                Err(_) => list.dropped += 1,
            }
        }
        Ok(list)
    }
}

impl<T: Serialize> Serialize for LenientList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

fn parse_clock(clock: &str) -> Option<f64> {
    let clock = clock.trim();
    if let Ok(secs) = clock.parse::<f64>() {
        return (secs.is_finite() && secs >= 0.0).then_some(secs);
    }

    let parts: Vec<&str> = clock.split(':').collect();
    if !(2..=3).contains(&parts.len()) {
        return None;
    }

    let mut total = 0.0;
    for (i, part) in parts.iter().enumerate() {
        let value: f64 = part.trim().parse().ok()?;
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        // Minutes and seconds must stay within a clock face; hours may not.
        if i > 0 && value >= 60.0 {
            return None;
        }
        total = total * 60.0 + value;
    }
    Some(total)
}

impl RawCallBundle {
    /// Parse a bundle from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Validate the structural invariants the normalizer relies on
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.schema_version {
            Some(Lenient::Valid(version)) if version != SCHEMA_VERSION => {
                return Err(ValidationError::InvalidSchemaVersion {
                    expected: SCHEMA_VERSION.to_string(),
                    actual: version.clone(),
                });
            }
            Some(Lenient::Malformed(value)) => {
                return Err(ValidationError::InvalidSchemaVersion {
                    expected: SCHEMA_VERSION.to_string(),
                    actual: value.to_string(),
                });
            }
            _ => {}
        }

        for (i, violation) in self.violations.iter().enumerate() {
            check_timestamp(&format!("violations[{i}].timestamp"), &violation.timestamp)?;
        }
        for (i, utterance) in self.utterances.iter().enumerate() {
            check_timestamp(&format!("utterances[{i}].timestamp"), &utterance.timestamp)?;
        }
        for (i, hit) in self.prohibited_phrase_hits.iter().enumerate() {
            check_timestamp(&format!("prohibited_phrase_hits[{i}].timestamp"), &hit.timestamp)?;
        }
        for (i, emotion) in self.emotions.iter().enumerate() {
            if let Some(Lenient::Valid(intensity)) = emotion.intensity {
                if !intensity.is_finite() {
                    return Err(ValidationError::NonFiniteValue {
                        field: format!("emotions[{i}].intensity"),
                    });
                }
            }
        }

        Ok(())
    }
}

fn check_timestamp(field: &str, timestamp: &Option<RawTimestamp>) -> Result<(), ValidationError> {
    match timestamp {
        Some(RawTimestamp::Seconds(secs)) if !secs.is_finite() => {
            Err(ValidationError::NonFiniteValue {
                field: field.to_string(),
            })
        }
        Some(RawTimestamp::Seconds(secs)) if *secs < 0.0 => Err(ValidationError::NegativeTimestamp {
            field: field.to_string(),
            value: *secs,
        }),
        _ => Ok(()),
    }
}

/// Validation errors for raw bundles
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid schema version: expected {expected}, got {actual}")]
    InvalidSchemaVersion { expected: String, actual: String },

    #[error("Negative timestamp at {field}: {value}")]
    NegativeTimestamp { field: String, value: f64 },

    #[error("Non-finite value at {field}")]
    NonFiniteValue { field: String },
}
