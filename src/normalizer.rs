//! Signal normalization
//!
//! This module turns a raw signal bundle into canonical call signals.
//! - Enum-like strings mapped onto the canonical vocabularies
//! - Unknown or missing values replaced by the value worth the fewest risk points
//! - Agent utterances scanned for configured prohibited phrases
//! - Call timing checked against the permitted calling window
//!
//! Only structurally impossible input (negative or non-finite numbers, a
//! foreign schema version) is rejected. Everything else is recovered and
//! recorded as an [`InputAnomaly`], including values of the wrong JSON type
//! and list entries that could not be read.

use chrono::{DateTime, FixedOffset};
use tracing::warn;

use crate::config::AuditConfig;
use crate::error::ComputeError;
use crate::keywords::{normalize_words, NormalizedText};
use crate::schema::{
    Lenient, RawCallBundle, RawConduct, RawEmotion, RawThreat, RawTimestamp, RawUtterance,
    RawViolation,
};
use crate::types::{
    AgentConductRating, Arousal, CallSignals, ConductLevel, ConversationSignal, EmotionalSignal,
    EmpathyLevel, InputAnomaly, PolicyViolation, ProhibitedPhraseHit, Severity, Speaker,
    ThreatKind, ThreatSignal, Tone, Utterance,
};

/// Category assigned to violations that arrive without one
const UNSPECIFIED_CATEGORY: &str = "unspecified";

/// Cue words that mark a free-text threat as explicit
const EXPLICIT_CUES: &[&str] = &["will", "going to", "must", "force"];

/// Cue words that mark a free-text threat as implied
const IMPLIED_CUES: &[&str] = &["might", "could", "may"];

/// Tone labels searched inside free-form tone descriptions, hostile first
const TONE_LABELS: &[(&str, Tone)] = &[
    ("threatening", Tone::Threatening),
    ("aggressive", Tone::Aggressive),
    ("distressed", Tone::Distressed),
    ("angry", Tone::Angry),
    ("frustrated", Tone::Frustrated),
    ("calm", Tone::Calm),
    ("satisfied", Tone::Satisfied),
    ("neutral", Tone::Neutral),
];

/// Normalizer for converting raw bundles to canonical signals
pub struct Normalizer;

impl Normalizer {
    /// Normalize a raw bundle.
    ///
    /// Fails only when [`RawCallBundle::validate`] does.
    pub fn normalize(
        bundle: &RawCallBundle,
        config: &AuditConfig,
    ) -> Result<CallSignals, ComputeError> {
        bundle.validate()?;

        let mut signals = CallSignals::default();
        signals.call_id = text_of(&bundle.call_id, &mut signals)
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string);
        signals.final_status = text_of(&bundle.final_status, &mut signals)
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        let dropped = bundle.violations.dropped()
            + bundle.threats.dropped()
            + bundle.emotions.dropped()
            + bundle.utterances.dropped()
            + bundle.prohibited_phrase_hits.dropped();
        if dropped > 0 {
            signals.flag(InputAnomaly::MalformedEntry);
        }

        let violations: Vec<PolicyViolation> = bundle
            .violations
            .iter()
            .map(|v| normalize_violation(v, &mut signals))
            .collect();
        signals.violations = violations;

        let threats: Vec<ThreatSignal> = bundle
            .threats
            .iter()
            .map(|t| normalize_threat(t, &mut signals))
            .collect();
        signals.threats = threats;

        let emotions: Vec<EmotionalSignal> = bundle
            .emotions
            .iter()
            .map(|e| normalize_emotion(e, &mut signals))
            .collect();
        signals.emotions = emotions;

        let utterances: Vec<Utterance> = bundle
            .utterances
            .iter()
            .map(|u| normalize_utterance(u, &mut signals))
            .collect();
        signals.conversation = ConversationSignal { utterances };

        signals.conduct = normalize_conduct(bundle.agent_conduct.as_ref(), &mut signals);
        signals.time_violation = detect_time_violation(bundle, config, &mut signals);
        signals.prohibited_hits = collect_prohibited_hits(bundle, config, &mut signals);

        for anomaly in &signals.anomalies {
            warn!(
                call_id = signals.call_id.as_deref().unwrap_or("-"),
                anomaly = anomaly.as_str(),
                "recovered malformed upstream signal"
            );
        }

        Ok(signals)
    }
}

/// String value of a loose field; a wrong-typed value reads as absent
fn text_of<'a>(field: &'a Option<Lenient<String>>, signals: &mut CallSignals) -> Option<&'a str> {
    match field.as_ref()? {
        Lenient::Valid(text) => Some(text.as_str()),
        Lenient::Malformed(_) => {
            signals.flag(InputAnomaly::MalformedField);
            None
        }
    }
}

fn normalize_violation(raw: &RawViolation, signals: &mut CallSignals) -> PolicyViolation {
    let severity = match text_of(&raw.severity, signals).map(str::trim) {
        None | Some("") => {
            signals.flag(InputAnomaly::MissingSeverity);
            Severity::Low
        }
        Some(label) => parse_severity(label).unwrap_or_else(|| {
            signals.flag(InputAnomaly::UnknownSeverity);
            Severity::Low
        }),
    };

    let category = text_of(&raw.category, signals)
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(UNSPECIFIED_CATEGORY)
        .to_string();

    PolicyViolation {
        clause_id: text_of(&raw.clause_id, signals).map(str::to_string),
        severity,
        category,
        evidence: text_of(&raw.evidence, signals)
            .map(str::to_string)
            .unwrap_or_default(),
        timestamp_sec: normalize_timestamp(raw.timestamp.as_ref(), signals),
    }
}

fn parse_severity(label: &str) -> Option<Severity> {
    match label.to_lowercase().as_str() {
        "critical" => Some(Severity::Critical),
        "high" => Some(Severity::High),
        "medium" | "moderate" => Some(Severity::Medium),
        "low" | "minor" => Some(Severity::Low),
        _ => None,
    }
}

fn normalize_threat(raw: &RawThreat, signals: &mut CallSignals) -> ThreatSignal {
    match raw {
        RawThreat::Tagged { kind, text } => {
            let kind = match kind.trim().to_lowercase().as_str() {
                "explicit" => ThreatKind::Explicit,
                "implied" | "implicit" => ThreatKind::Implied,
                "intimidation" => ThreatKind::Intimidation,
                other => {
                    signals.flag(InputAnomaly::UnknownThreatKind);
                    let description = match text {
                        Some(text) => format!("{other} {text}"),
                        None => other.to_string(),
                    };
                    classify_threat_text(&description)
                }
            };
            ThreatSignal {
                kind,
                text: text.clone(),
            }
        }
        RawThreat::Text(text) => ThreatSignal {
            kind: classify_threat_text(text),
            text: Some(text.clone()),
        },
        RawThreat::Other(_) => {
            signals.flag(InputAnomaly::MalformedField);
            ThreatSignal {
                kind: ThreatKind::Intimidation,
                text: None,
            }
        }
    }
}

/// Classify a free-text threat by its modal cue words
pub fn classify_threat_text(text: &str) -> ThreatKind {
    let text = NormalizedText::new(text);
    if text.contains_any(EXPLICIT_CUES) {
        ThreatKind::Explicit
    } else if text.contains_any(IMPLIED_CUES) {
        ThreatKind::Implied
    } else {
        ThreatKind::Intimidation
    }
}

fn normalize_emotion(raw: &RawEmotion, signals: &mut CallSignals) -> EmotionalSignal {
    let tone = match text_of(&raw.tone, signals).map(str::trim) {
        None | Some("") => Tone::Neutral,
        Some(label) => parse_tone(label).unwrap_or_else(|| {
            signals.flag(InputAnomaly::UnknownTone);
            Tone::Neutral
        }),
    };

    if raw.intensity.as_ref().is_some_and(Lenient::is_malformed) {
        signals.flag(InputAnomaly::MalformedField);
    }
    let intensity = match raw.intensity.as_ref().and_then(Lenient::number) {
        None => 0.0,
        Some(value) if (0.0..=1.0).contains(&value) => value,
        Some(value) => {
            signals.flag(InputAnomaly::IntensityOutOfRange);
            value.clamp(0.0, 1.0)
        }
    };

    let acoustic_arousal = match text_of(&raw.acoustic_arousal, signals).map(str::trim) {
        None | Some("") => Arousal::Low,
        Some(label) => match label.to_lowercase().as_str() {
            "high" => Arousal::High,
            "medium" | "moderate" => Arousal::Medium,
            "low" => Arousal::Low,
            _ => {
                signals.flag(InputAnomaly::UnknownArousal);
                Arousal::Low
            }
        },
    };

    EmotionalSignal {
        tone,
        intensity,
        acoustic_arousal,
    }
}

/// Exact tone label, else the first known label contained in the description
fn parse_tone(label: &str) -> Option<Tone> {
    let lowered = label.to_lowercase();
    if let Some((_, tone)) = TONE_LABELS.iter().find(|(name, _)| *name == lowered) {
        return Some(*tone);
    }
    let words = NormalizedText::new(label);
    TONE_LABELS
        .iter()
        .find(|(name, _)| words.contains_phrase(name))
        .map(|(_, tone)| *tone)
}

fn normalize_utterance(raw: &RawUtterance, signals: &mut CallSignals) -> Utterance {
    let speaker = match text_of(&raw.speaker, signals)
        .map(|s| s.trim().to_lowercase())
        .as_deref()
    {
        Some("agent") | Some("representative") => Speaker::Agent,
        Some("customer") | Some("caller") => Speaker::Customer,
        _ => {
            signals.flag(InputAnomaly::UnknownSpeaker);
            Speaker::Unknown
        }
    };

    let text = match text_of(&raw.text, signals).map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => {
            signals.flag(InputAnomaly::MissingUtteranceText);
            String::new()
        }
    };

    Utterance {
        speaker,
        text,
        timestamp_sec: normalize_timestamp(raw.timestamp.as_ref(), signals),
    }
}

fn normalize_conduct(
    raw: Option<&Lenient<RawConduct>>,
    signals: &mut CallSignals,
) -> AgentConductRating {
    let defaults = AgentConductRating::default();
    let raw = match raw {
        Some(Lenient::Valid(raw)) => raw,
        Some(Lenient::Malformed(_)) => {
            signals.flag(InputAnomaly::MalformedField);
            signals.flag(InputAnomaly::MissingConductRating);
            return defaults;
        }
        None => {
            signals.flag(InputAnomaly::MissingConductRating);
            return defaults;
        }
    };

    let politeness = rating_or_default(
        text_of(&raw.politeness, signals),
        parse_conduct_level,
        defaults.politeness,
        signals,
    );
    let empathy = rating_or_default(
        text_of(&raw.empathy, signals),
        parse_empathy_level,
        defaults.empathy,
        signals,
    );
    let professionalism = rating_or_default(
        text_of(&raw.professionalism, signals),
        parse_conduct_level,
        defaults.professionalism,
        signals,
    );

    AgentConductRating {
        politeness,
        empathy,
        professionalism,
    }
}

fn rating_or_default<T>(
    label: Option<&str>,
    parse: fn(&str) -> Option<T>,
    default: T,
    signals: &mut CallSignals,
) -> T {
    match label.map(str::trim) {
        None | Some("") => {
            signals.flag(InputAnomaly::MissingConductRating);
            default
        }
        Some(label) => parse(label).unwrap_or_else(|| {
            signals.flag(InputAnomaly::UnknownConductRating);
            default
        }),
    }
}

fn parse_conduct_level(label: &str) -> Option<ConductLevel> {
    let lowered = label.to_lowercase();
    // Descriptions like "very good" or "poor tone" carry the level as a substring.
    if lowered.contains("unacceptable") || lowered.contains("unprofessional") {
        Some(ConductLevel::Unacceptable)
    } else if lowered.contains("excellent") {
        Some(ConductLevel::Excellent)
    } else if lowered.contains("good") {
        Some(ConductLevel::Good)
    } else if lowered.contains("fair") {
        Some(ConductLevel::Fair)
    } else if lowered.contains("poor") {
        Some(ConductLevel::Poor)
    } else {
        None
    }
}

fn parse_empathy_level(label: &str) -> Option<EmpathyLevel> {
    match normalize_words(label).as_str() {
        "high" => Some(EmpathyLevel::High),
        "medium" | "moderate" => Some(EmpathyLevel::Medium),
        "low" => Some(EmpathyLevel::Low),
        "none" | "no empathy" => Some(EmpathyLevel::None),
        _ => None,
    }
}

fn normalize_timestamp(raw: Option<&RawTimestamp>, signals: &mut CallSignals) -> f64 {
    match raw {
        None => 0.0,
        Some(timestamp) => timestamp.seconds().unwrap_or_else(|| {
            signals.flag(InputAnomaly::UnparseableTimestamp);
            0.0
        }),
    }
}

/// Explicit flag first, then the call start against the permitted window
fn detect_time_violation(
    bundle: &RawCallBundle,
    config: &AuditConfig,
    signals: &mut CallSignals,
) -> bool {
    if let Some(explicit) = &bundle.time_violation {
        if explicit.is_malformed() {
            signals.flag(InputAnomaly::MalformedField);
        }
        if let Some(flag) = explicit.flag() {
            return flag;
        }
    }

    let started_at = text_of(&bundle.call_started_at, signals);
    let (Some(started_at), Some(hours)) = (started_at, config.allowed_call_hours.as_ref()) else {
        return false;
    };

    let started_at = match DateTime::parse_from_rfc3339(started_at.trim()) {
        Ok(started_at) => started_at,
        Err(_) => {
            signals.flag(InputAnomaly::UnparseableTimestamp);
            return false;
        }
    };

    // Offsets are checked by AuditConfig::validate.
    let Some(offset) = FixedOffset::east_opt(hours.utc_offset_minutes * 60) else {
        return false;
    };
    let local = started_at.with_timezone(&offset).time();
    !hours.permits(local)
}

/// Upstream hits plus configured phrases spoken by the agent, earliest per phrase
fn collect_prohibited_hits(
    bundle: &RawCallBundle,
    config: &AuditConfig,
    signals: &mut CallSignals,
) -> Vec<ProhibitedPhraseHit> {
    let mut hits: Vec<ProhibitedPhraseHit> = Vec::new();

    let mut record = |phrase: &str, timestamp_sec: f64| {
        let key = normalize_words(phrase);
        if key.is_empty() {
            return;
        }
        match hits.iter_mut().find(|h| normalize_words(&h.phrase) == key) {
            Some(existing) => {
                if timestamp_sec < existing.timestamp_sec {
                    existing.timestamp_sec = timestamp_sec;
                }
            }
            None => hits.push(ProhibitedPhraseHit {
                phrase: key,
                timestamp_sec,
            }),
        }
    };

    for hit in bundle.prohibited_phrase_hits.iter() {
        let timestamp_sec = match &hit.timestamp {
            None => 0.0,
            Some(timestamp) => match timestamp.seconds() {
                Some(secs) => secs,
                None => {
                    signals.flag(InputAnomaly::UnparseableTimestamp);
                    0.0
                }
            },
        };
        record(&hit.phrase, timestamp_sec);
    }

    for utterance in signals.conversation.agent_utterances() {
        let text = NormalizedText::new(&utterance.text);
        for phrase in &config.prohibited_phrases {
            if text.contains_phrase(phrase) {
                record(phrase, utterance.timestamp_sec);
            }
        }
    }

    hits
}
