//! Risk scoring
//!
//! Fuses the canonical call signals into a 0-100 risk score. Six components
//! are scored independently, weighted, capped, summed and clamped once at the
//! end. Deterministic overrides then force critical handling for prohibited
//! phrases and critical-severity violations, whatever the number says.

use tracing::debug;

use crate::config::AuditConfig;
use crate::types::{
    CallSignals, ConductLevel, EscalationAction, RiskAssessment, RiskBreakdown, RiskComponent,
    RiskLevel, RiskOverride, Severity,
};

/// Points per distinct prohibited phrase
const PROHIBITED_PHRASE_POINTS: f64 = 30.0;

/// Minimum total once any prohibited phrase is heard
const PROHIBITED_PHRASE_FLOOR: f64 = 85.0;

/// Emotional component at or above which the call reads as highly charged
const HIGH_EMOTION_POINTS: f64 = 15.0;

/// Conduct component at or above which conduct reads as poor
const POOR_CONDUCT_POINTS: f64 = 15.0;

type ComponentScorer = fn(&CallSignals) -> f64;

/// Scoring function per component, in breakdown order
const COMPONENTS: [(RiskComponent, ComponentScorer); 6] = [
    (RiskComponent::PolicyViolations, policy_violation_points),
    (RiskComponent::EmotionalIntensity, emotional_points),
    (RiskComponent::ThreatLevel, threat_points),
    (RiskComponent::AgentConduct, conduct_points),
    (RiskComponent::TimeViolation, time_violation_points),
    (RiskComponent::ProhibitedPhrases, prohibited_phrase_points),
];

/// Risk score calculator
pub struct RiskCalculator;

impl RiskCalculator {
    /// Score one call
    pub fn assess(signals: &CallSignals, config: &AuditConfig) -> RiskAssessment {
        let breakdown = Self::breakdown(signals, config);

        let mut total = breakdown.sum().clamp(0.0, 100.0);
        if signals.has_prohibited_phrase() {
            total = total.max(PROHIBITED_PHRASE_FLOOR);
        }
        let total = round1(total);

        let mut overrides = Vec::new();
        if signals.has_prohibited_phrase() {
            overrides.push(RiskOverride::ProhibitedPhrase);
        }
        if signals.has_critical_violation() {
            overrides.push(RiskOverride::CriticalViolation);
        }
        let overridden = !overrides.is_empty();

        let risk_level = if overridden {
            RiskLevel::Critical
        } else {
            RiskLevel::from_score(total)
        };
        let reaches_threshold = total >= config.critical_threshold;

        let assessment = RiskAssessment {
            total_score: total,
            risk_level,
            risk_category: risk_level.category().to_string(),
            escalation_action: EscalationAction::from_score(total),
            justification: justification(total, &breakdown, signals),
            requires_immediate_action: overridden || reaches_threshold,
            auto_escalate: overridden || (config.auto_escalate_on_critical && reaches_threshold),
            overrides,
            breakdown,
        };

        debug!(
            total = assessment.total_score,
            level = assessment.risk_level.as_str(),
            auto_escalate = assessment.auto_escalate,
            "risk assessed"
        );

        assessment
    }

    /// Weighted, capped points per component
    pub fn breakdown(signals: &CallSignals, config: &AuditConfig) -> RiskBreakdown {
        let mut breakdown = RiskBreakdown::default();
        for (component, scorer) in COMPONENTS {
            let weighted = scorer(signals) * config.weights.for_component(component);
            breakdown.set(component, round1(weighted.min(component.cap())));
        }
        breakdown
    }
}

fn policy_violation_points(signals: &CallSignals) -> f64 {
    signals
        .violations
        .iter()
        .map(|v| v.severity.risk_points())
        .sum()
}

fn emotional_points(signals: &CallSignals) -> f64 {
    let dominant = signals.dominant_emotion();
    let tone_points = dominant.tone.risk_points();
    if tone_points == 0.0 {
        return 0.0;
    }
    tone_points + dominant.acoustic_arousal.risk_adjustment()
}

// Correlated threat tags do not stack.
fn threat_points(signals: &CallSignals) -> f64 {
    signals
        .threats
        .iter()
        .map(|t| t.kind.risk_points())
        .fold(0.0, f64::max)
}

fn conduct_points(signals: &CallSignals) -> f64 {
    let politeness = match signals.conduct.politeness {
        ConductLevel::Unacceptable => 25.0,
        ConductLevel::Poor => 15.0,
        _ => 0.0,
    };
    let professionalism = match signals.conduct.professionalism {
        ConductLevel::Unacceptable => 25.0,
        ConductLevel::Poor => 10.0,
        _ => 0.0,
    };
    politeness + professionalism
}

fn time_violation_points(signals: &CallSignals) -> f64 {
    if signals.time_violation {
        RiskComponent::TimeViolation.cap()
    } else {
        0.0
    }
}

fn prohibited_phrase_points(signals: &CallSignals) -> f64 {
    signals.prohibited_hits.len() as f64 * PROHIBITED_PHRASE_POINTS
}

fn justification(total: f64, breakdown: &RiskBreakdown, signals: &CallSignals) -> String {
    let mut parts = Vec::new();

    let prohibited = signals.prohibited_hits.len();
    if prohibited > 0 {
        parts.push(format!(
            "{prohibited} prohibited phrase(s) detected (automatic critical risk)"
        ));
    }

    for (severity, label) in [
        (Severity::Critical, "critical policy violation(s)"),
        (Severity::High, "high-severity violation(s)"),
        (Severity::Medium, "medium-severity violation(s)"),
        (Severity::Low, "low-severity violation(s)"),
    ] {
        let count = signals.count_severity(severity);
        if count > 0 {
            parts.push(format!("{count} {label}"));
        }
    }

    if !signals.threats.is_empty() {
        parts.push(format!("{} threat(s) detected", signals.threats.len()));
    }

    if breakdown.emotional_intensity > 0.0 {
        let tone = signals.dominant_emotion().tone.as_str();
        if breakdown.emotional_intensity >= HIGH_EMOTION_POINTS {
            parts.push(format!("high emotional intensity ({tone})"));
        } else {
            parts.push(format!("elevated emotional intensity ({tone})"));
        }
    }

    if breakdown.agent_conduct >= POOR_CONDUCT_POINTS {
        parts.push("poor agent conduct".to_string());
    } else if breakdown.agent_conduct > 0.0 {
        parts.push("agent conduct concerns".to_string());
    }

    if breakdown.time_violation > 0.0 {
        parts.push("call timing violation".to_string());
    }

    if parts.is_empty() {
        return "Low risk call with no major compliance concerns".to_string();
    }

    format!("Risk score {total:.1}/100 due to: {}", parts.join(", "))
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RiskWeights;
    use crate::types::{
        AgentConductRating, Arousal, EmotionalSignal, PolicyViolation, ProhibitedPhraseHit,
        ThreatKind, ThreatSignal, Tone,
    };
    use pretty_assertions::assert_eq;

    fn violation(severity: Severity) -> PolicyViolation {
        PolicyViolation {
            clause_id: None,
            severity,
            category: "Collections conduct".to_string(),
            evidence: String::new(),
            timestamp_sec: 0.0,
        }
    }

    fn threat(kind: ThreatKind) -> ThreatSignal {
        ThreatSignal { kind, text: None }
    }

    fn emotion(tone: Tone, arousal: Arousal) -> EmotionalSignal {
        EmotionalSignal {
            tone,
            intensity: 0.7,
            acoustic_arousal: arousal,
        }
    }

    fn hit(phrase: &str) -> ProhibitedPhraseHit {
        ProhibitedPhraseHit {
            phrase: phrase.to_string(),
            timestamp_sec: 12.0,
        }
    }

    #[test]
    fn test_empty_signals_score_zero() {
        let assessment = RiskCalculator::assess(&CallSignals::default(), &AuditConfig::default());
        assert_eq!(assessment.total_score, 0.0);
        assert_eq!(assessment.risk_level, RiskLevel::Minimal);
        assert_eq!(assessment.risk_category, "MINIMAL");
        assert_eq!(assessment.escalation_action, EscalationAction::None);
        assert_eq!(
            assessment.justification,
            "Low risk call with no major compliance concerns"
        );
        assert!(!assessment.requires_immediate_action);
        assert!(!assessment.auto_escalate);
        assert!(assessment.overrides.is_empty());
    }

    #[test]
    fn test_hostile_call_without_critical_violation() {
        let signals = CallSignals {
            violations: vec![violation(Severity::High), violation(Severity::Medium)],
            threats: vec![threat(ThreatKind::Explicit)],
            emotions: vec![emotion(Tone::Angry, Arousal::High)],
            ..Default::default()
        };
        let assessment = RiskCalculator::assess(&signals, &AuditConfig::default());

        assert_eq!(
            assessment.breakdown,
            RiskBreakdown {
                policy_violations: 30.0,
                emotional_intensity: 20.0,
                threat_level: 25.0,
                agent_conduct: 0.0,
                time_violation: 0.0,
                prohibited_phrases: 0.0,
            }
        );
        assert_eq!(assessment.total_score, 75.0);
        assert_eq!(assessment.risk_level, RiskLevel::High);
        assert_eq!(assessment.escalation_action, EscalationAction::ComplianceTeam);
        assert!(!assessment.requires_immediate_action);
        assert_eq!(
            assessment.justification,
            "Risk score 75.0/100 due to: 1 high-severity violation(s), \
             1 medium-severity violation(s), 1 threat(s) detected, \
             high emotional intensity (angry)"
        );
    }

    #[test]
    fn test_component_caps_and_end_clamp() {
        let signals = CallSignals {
            violations: vec![violation(Severity::Critical); 3],
            threats: vec![threat(ThreatKind::Explicit), threat(ThreatKind::Implied)],
            emotions: vec![emotion(Tone::Threatening, Arousal::High)],
            conduct: AgentConductRating {
                politeness: ConductLevel::Unacceptable,
                professionalism: ConductLevel::Unacceptable,
                ..Default::default()
            },
            time_violation: true,
            prohibited_hits: vec![hit("a"), hit("b"), hit("c")],
            ..Default::default()
        };
        let assessment = RiskCalculator::assess(&signals, &AuditConfig::default());

        assert_eq!(assessment.breakdown.policy_violations, 40.0);
        assert_eq!(assessment.breakdown.emotional_intensity, 25.0);
        assert_eq!(assessment.breakdown.threat_level, 25.0);
        assert_eq!(assessment.breakdown.agent_conduct, 25.0);
        assert_eq!(assessment.breakdown.time_violation, 15.0);
        assert_eq!(assessment.breakdown.prohibited_phrases, 60.0);
        assert_eq!(assessment.breakdown.sum(), 190.0);
        assert_eq!(assessment.total_score, 100.0);
        assert_eq!(
            assessment.escalation_action,
            EscalationAction::ExecutiveAttention
        );
    }

    #[test]
    fn test_threats_take_the_maximum() {
        let signals = CallSignals {
            threats: vec![
                threat(ThreatKind::Intimidation),
                threat(ThreatKind::Implied),
                threat(ThreatKind::Intimidation),
            ],
            ..Default::default()
        };
        let breakdown = RiskCalculator::breakdown(&signals, &AuditConfig::default());
        assert_eq!(breakdown.threat_level, 15.0);
    }

    #[test]
    fn test_arousal_only_adjusts_charged_tones() {
        let calm = CallSignals {
            emotions: vec![emotion(Tone::Calm, Arousal::High)],
            ..Default::default()
        };
        let frustrated = CallSignals {
            emotions: vec![emotion(Tone::Frustrated, Arousal::Medium)],
            ..Default::default()
        };
        let config = AuditConfig::default();
        assert_eq!(RiskCalculator::breakdown(&calm, &config).emotional_intensity, 0.0);
        assert_eq!(
            RiskCalculator::breakdown(&frustrated, &config).emotional_intensity,
            12.0
        );
    }

    #[test]
    fn test_prohibited_phrase_forces_critical() {
        let signals = CallSignals {
            prohibited_hits: vec![hit("you are a fraud")],
            ..Default::default()
        };
        let config = AuditConfig {
            auto_escalate_on_critical: false,
            ..Default::default()
        };
        let assessment = RiskCalculator::assess(&signals, &config);

        assert_eq!(assessment.breakdown.prohibited_phrases, 30.0);
        assert_eq!(assessment.total_score, 85.0);
        assert_eq!(assessment.risk_level, RiskLevel::Critical);
        assert!(assessment.auto_escalate);
        assert!(assessment.requires_immediate_action);
        assert_eq!(assessment.overrides, vec![RiskOverride::ProhibitedPhrase]);
        assert!(assessment
            .justification
            .starts_with("Risk score 85.0/100 due to: 1 prohibited phrase(s) detected"));
    }

    #[test]
    fn test_critical_violation_forces_critical_level() {
        let signals = CallSignals {
            violations: vec![violation(Severity::Critical)],
            ..Default::default()
        };
        let assessment = RiskCalculator::assess(&signals, &AuditConfig::default());

        assert_eq!(assessment.total_score, 30.0);
        assert_eq!(assessment.risk_level, RiskLevel::Critical);
        assert_eq!(assessment.risk_category, "CRITICAL");
        // The ladder still reads the raw number.
        assert_eq!(assessment.escalation_action, EscalationAction::None);
        assert!(assessment.auto_escalate);
        assert_eq!(assessment.overrides, vec![RiskOverride::CriticalViolation]);
    }

    #[test]
    fn test_threshold_and_auto_escalate_setting() {
        let signals = CallSignals {
            violations: vec![violation(Severity::High), violation(Severity::High)],
            threats: vec![threat(ThreatKind::Explicit)],
            time_violation: true,
            ..Default::default()
        };

        let config = AuditConfig {
            critical_threshold: 75.0,
            ..Default::default()
        };
        let assessment = RiskCalculator::assess(&signals, &config);
        assert_eq!(assessment.total_score, 80.0);
        assert_eq!(assessment.risk_level, RiskLevel::High);
        assert!(assessment.requires_immediate_action);
        assert!(assessment.auto_escalate);

        let config = AuditConfig {
            critical_threshold: 75.0,
            auto_escalate_on_critical: false,
            ..Default::default()
        };
        let assessment = RiskCalculator::assess(&signals, &config);
        assert!(assessment.requires_immediate_action);
        assert!(!assessment.auto_escalate);
    }

    #[test]
    fn test_weights_scale_before_cap() {
        let signals = CallSignals {
            violations: vec![violation(Severity::Critical); 2],
            emotions: vec![emotion(Tone::Angry, Arousal::Low)],
            ..Default::default()
        };
        let config = AuditConfig {
            weights: RiskWeights {
                policy_violations: 0.5,
                emotional_intensity: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let breakdown = RiskCalculator::breakdown(&signals, &config);
        assert_eq!(breakdown.policy_violations, 30.0);
        assert_eq!(breakdown.emotional_intensity, 0.0);
    }

    #[test]
    fn test_total_is_monotonic_in_each_component() {
        let config = AuditConfig::default();
        let severities = [Severity::Low, Severity::Medium, Severity::High, Severity::Critical];
        let tones = [Tone::Neutral, Tone::Frustrated, Tone::Angry, Tone::Aggressive, Tone::Threatening];

        for base_tone in tones {
            let mut previous = -1.0;
            for severity in severities {
                let signals = CallSignals {
                    violations: vec![violation(severity)],
                    emotions: vec![emotion(base_tone, Arousal::Medium)],
                    threats: vec![threat(ThreatKind::Implied)],
                    ..Default::default()
                };
                let total = RiskCalculator::assess(&signals, &config).total_score;
                assert!(total >= previous, "{severity:?} with {base_tone:?}");
                assert!((0.0..=100.0).contains(&total));
                previous = total;
            }
        }

        let mut previous = -1.0;
        for count in 0..6 {
            let signals = CallSignals {
                violations: vec![violation(Severity::High); 3],
                prohibited_hits: (0..count).map(|i| hit(&format!("phrase {i}"))).collect(),
                ..Default::default()
            };
            let total = RiskCalculator::assess(&signals, &config).total_score;
            assert!(total >= previous);
            assert!(total <= 100.0);
            previous = total;
        }
    }

    #[test]
    fn test_poor_conduct_justification() {
        let signals = CallSignals {
            conduct: AgentConductRating {
                politeness: ConductLevel::Poor,
                professionalism: ConductLevel::Poor,
                ..Default::default()
            },
            time_violation: true,
            ..Default::default()
        };
        let assessment = RiskCalculator::assess(&signals, &AuditConfig::default());
        assert_eq!(assessment.breakdown.agent_conduct, 25.0);
        assert_eq!(assessment.total_score, 40.0);
        assert_eq!(assessment.risk_level, RiskLevel::Low);
        assert_eq!(assessment.escalation_action, EscalationAction::SupervisorReview);
        assert_eq!(
            assessment.justification,
            "Risk score 40.0/100 due to: poor agent conduct, call timing violation"
        );
    }
}
