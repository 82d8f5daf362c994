//! Call outcome classification
//!
//! The primary outcome comes from an ordered cascade of rules. The first rule
//! that decides wins and fixes the confidence; nothing after it can change the
//! primary label. Secondary outcomes, urgency, next action and the satisfaction
//! estimate are then pure lookups on the primary outcome and the signals.

use tracing::debug;

use crate::keywords::{self, NormalizedText};
use crate::types::{
    CallOutcome, CallSignals, CascadeRule, EmotionalSignal, OutcomeClassification,
    RiskAssessment, SatisfactionIndicator, Speaker, Tone, Urgency,
};

/// Total risk at which a call is escalated regardless of how it ended
const ESCALATION_RISK: f64 = 80.0;

/// Total risk below which a compliant call counts as low risk
const LOW_RISK: f64 = 40.0;

const MAX_SECONDARY_OUTCOMES: usize = 3;

const STATUS_HINTS: &[&str] = &["pending", "review"];

const GRATITUDE: &[&str] = &["thank you", "thanks"];

/// Everything the cascade rules may look at
struct OutcomeContext<'a> {
    signals: &'a CallSignals,
    risk: &'a RiskAssessment,
    dominant: EmotionalSignal,
    /// Final utterances of the call
    closing: NormalizedText,
    /// Closing text plus free-text threat descriptions
    legal_text: NormalizedText,
}

impl<'a> OutcomeContext<'a> {
    fn new(signals: &'a CallSignals, risk: &'a RiskAssessment) -> Self {
        let closing = signals.conversation.closing_text();
        let legal_text = NormalizedText::from_parts(
            std::iter::once(closing.as_str())
                .chain(signals.threats.iter().filter_map(|t| t.text.as_deref())),
        );
        Self {
            signals,
            risk,
            dominant: signals.dominant_emotion(),
            closing,
            legal_text,
        }
    }

    fn legal_mentioned(&self) -> bool {
        self.legal_text.contains_any(keywords::LEGAL)
    }

    fn has_violations(&self) -> bool {
        !self.signals.violations.is_empty()
    }
}

/// One cascade step: a rule, the confidence it reports, and its decision
struct CascadeStep {
    rule: CascadeRule,
    confidence: f64,
    decide: fn(&OutcomeContext) -> Option<CallOutcome>,
}

/// The cascade, highest priority first
static CASCADE: [CascadeStep; 9] = [
    CascadeStep {
        rule: CascadeRule::CriticalViolation,
        confidence: 0.95,
        decide: critical_violation,
    },
    CascadeStep {
        rule: CascadeRule::DirectThreat,
        confidence: 0.90,
        decide: direct_threat,
    },
    CascadeStep {
        rule: CascadeRule::CriticalRisk,
        confidence: 0.90,
        decide: critical_risk,
    },
    CascadeStep {
        rule: CascadeRule::EndingKeywords,
        confidence: 0.85,
        decide: ending_keywords,
    },
    CascadeStep {
        rule: CascadeRule::HostileTone,
        confidence: 0.80,
        decide: hostile_tone,
    },
    CascadeStep {
        rule: CascadeRule::StatusHint,
        confidence: 0.75,
        decide: status_hint,
    },
    CascadeStep {
        rule: CascadeRule::CompliantLowRisk,
        confidence: 0.70,
        decide: compliant_low_risk,
    },
    CascadeStep {
        rule: CascadeRule::FallbackWithViolations,
        confidence: 0.65,
        decide: fallback_with_violations,
    },
    CascadeStep {
        rule: CascadeRule::Fallback,
        confidence: 0.60,
        decide: fallback,
    },
];

fn critical_violation(ctx: &OutcomeContext) -> Option<CallOutcome> {
    ctx.signals
        .has_critical_violation()
        .then_some(CallOutcome::Escalated)
}

fn direct_threat(ctx: &OutcomeContext) -> Option<CallOutcome> {
    if !ctx.signals.has_direct_threat() {
        return None;
    }
    if ctx.legal_mentioned() {
        Some(CallOutcome::LegalDispute)
    } else {
        Some(CallOutcome::Escalated)
    }
}

fn critical_risk(ctx: &OutcomeContext) -> Option<CallOutcome> {
    if ctx.risk.total_score < ESCALATION_RISK {
        return None;
    }
    if ctx.signals.threats.is_empty() {
        Some(CallOutcome::Escalated)
    } else {
        Some(CallOutcome::LegalDispute)
    }
}

// Priority: resolution > callback > transfer > drop.
fn ending_keywords(ctx: &OutcomeContext) -> Option<CallOutcome> {
    let closing = &ctx.closing;
    if closing.contains_any(keywords::RESOLUTION) {
        if closing.contains_any(keywords::DISSATISFACTION) {
            Some(CallOutcome::CustomerDissatisfied)
        } else if closing.contains_any(keywords::SATISFACTION) {
            Some(CallOutcome::CustomerSatisfied)
        } else {
            Some(CallOutcome::Resolved)
        }
    } else if closing.contains_any(keywords::CALLBACK) {
        Some(CallOutcome::CallbackRequired)
    } else if closing.contains_any(keywords::TRANSFER) {
        Some(CallOutcome::Transferred)
    } else if closing.contains_any(keywords::DROP) {
        Some(CallOutcome::Dropped)
    } else {
        None
    }
}

fn hostile_tone(ctx: &OutcomeContext) -> Option<CallOutcome> {
    matches!(ctx.dominant.tone, Tone::Angry | Tone::Aggressive)
        .then_some(CallOutcome::UnresolvedComplaint)
}

fn status_hint(ctx: &OutcomeContext) -> Option<CallOutcome> {
    let status = ctx.signals.final_status.as_deref()?;
    NormalizedText::new(status)
        .contains_any(STATUS_HINTS)
        .then_some(CallOutcome::Pending)
}

fn compliant_low_risk(ctx: &OutcomeContext) -> Option<CallOutcome> {
    if ctx.has_violations() || ctx.risk.total_score >= LOW_RISK {
        return None;
    }
    let conversation = &ctx.signals.conversation;
    let engaged =
        conversation.has_speaker(Speaker::Agent) && conversation.has_speaker(Speaker::Customer);
    let settled = !matches!(ctx.dominant.tone, Tone::Distressed | Tone::Frustrated);
    if engaged && settled {
        Some(CallOutcome::Resolved)
    } else {
        Some(CallOutcome::NoResolution)
    }
}

fn fallback_with_violations(ctx: &OutcomeContext) -> Option<CallOutcome> {
    ctx.has_violations().then_some(CallOutcome::NoResolution)
}

fn fallback(_: &OutcomeContext) -> Option<CallOutcome> {
    Some(CallOutcome::NoResolution)
}

/// Call outcome classifier
pub struct OutcomeClassifier;

impl OutcomeClassifier {
    /// Classify how the call concluded
    pub fn classify(signals: &CallSignals, risk: &RiskAssessment) -> OutcomeClassification {
        let ctx = OutcomeContext::new(signals, risk);

        let (step, primary) = CASCADE
            .iter()
            .find_map(|step| (step.decide)(&ctx).map(|outcome| (step, outcome)))
            .unwrap_or((&CASCADE[CASCADE.len() - 1], CallOutcome::NoResolution));

        let classification = OutcomeClassification {
            primary_outcome: primary,
            outcome_category: primary.category().to_string(),
            confidence_score: step.confidence,
            matched_rule: step.rule,
            outcome_reasoning: reasoning(primary, &ctx),
            secondary_outcomes: secondary_outcomes(primary, &ctx),
            next_action: next_action(primary, &ctx).to_string(),
            urgency_level: urgency(primary, risk),
            requires_follow_up: primary.requires_follow_up(),
            customer_satisfaction_indicator: satisfaction(primary, ctx.dominant.tone),
        };

        debug!(
            outcome = classification.primary_outcome.as_str(),
            confidence = classification.confidence_score,
            "outcome classified"
        );

        classification
    }
}

/// Co-emitted labels, deduplicated, never the primary, at most three
fn secondary_outcomes(primary: CallOutcome, ctx: &OutcomeContext) -> Vec<CallOutcome> {
    let has_violations = ctx.has_violations();
    let hostile = ctx.dominant.tone.is_hostile();

    let candidates: Vec<(bool, CallOutcome)> = match primary {
        CallOutcome::Escalated => vec![
            (has_violations, CallOutcome::UnresolvedComplaint),
            (
                (has_violations && !ctx.signals.threats.is_empty()) || ctx.legal_mentioned(),
                CallOutcome::LegalDispute,
            ),
        ],
        CallOutcome::LegalDispute => vec![
            (true, CallOutcome::Escalated),
            (has_violations, CallOutcome::UnresolvedComplaint),
        ],
        CallOutcome::Resolved => vec![
            (
                ctx.dominant.tone.is_positive() || ctx.closing.contains_any(GRATITUDE),
                CallOutcome::CustomerSatisfied,
            ),
            (
                ctx.closing.contains_any(keywords::DISSATISFACTION),
                CallOutcome::CustomerDissatisfied,
            ),
        ],
        CallOutcome::CustomerSatisfied => vec![(true, CallOutcome::Resolved)],
        CallOutcome::CustomerDissatisfied => vec![(true, CallOutcome::FollowUpNeeded)],
        CallOutcome::Pending => {
            let callback = ctx.closing.contains_any(keywords::CALLBACK);
            vec![
                (callback, CallOutcome::CallbackRequired),
                (!callback, CallOutcome::FollowUpNeeded),
            ]
        }
        CallOutcome::CallbackRequired => vec![(true, CallOutcome::FollowUpNeeded)],
        CallOutcome::Dropped => vec![
            (true, CallOutcome::FollowUpNeeded),
            (hostile, CallOutcome::UnresolvedComplaint),
        ],
        CallOutcome::UnresolvedComplaint => vec![
            (true, CallOutcome::FollowUpNeeded),
            (true, CallOutcome::CustomerDissatisfied),
        ],
        CallOutcome::NoResolution => vec![(true, CallOutcome::FollowUpNeeded)],
        CallOutcome::Transferred | CallOutcome::FollowUpNeeded => Vec::new(),
    };

    let mut secondary = Vec::new();
    for (applies, outcome) in candidates {
        if applies && outcome != primary && !secondary.contains(&outcome) {
            secondary.push(outcome);
        }
    }
    secondary.truncate(MAX_SECONDARY_OUTCOMES);
    secondary
}

fn reasoning(primary: CallOutcome, ctx: &OutcomeContext) -> String {
    let violations = ctx.signals.violations.len();
    let mut reasons: Vec<String> = Vec::new();

    match primary {
        CallOutcome::Resolved => {
            reasons.push("Conversation ended with resolution indicators".to_string());
            if violations == 0 {
                reasons.push("no policy violations detected".to_string());
            }
        }
        CallOutcome::Escalated => {
            if violations > 0 {
                reasons.push(format!("{violations} policy violation(s) detected"));
            }
            if !ctx.signals.threats.is_empty() {
                reasons.push("threats detected in conversation".to_string());
            }
            if ctx.risk.total_score >= ESCALATION_RISK {
                reasons.push(format!("risk score {:.1}/100", ctx.risk.total_score));
            }
            reasons.push("requires management review".to_string());
        }
        CallOutcome::LegalDispute => {
            reasons.push("Legal action mentioned or threatened".to_string());
            reasons.push("immediate legal team review required".to_string());
        }
        CallOutcome::CallbackRequired => {
            reasons.push("Agent committed to follow-up action".to_string());
        }
        CallOutcome::Transferred => {
            reasons.push("Call handed off to another agent or department".to_string());
        }
        CallOutcome::Dropped => {
            reasons.push("Call ended abruptly without resolution".to_string());
        }
        CallOutcome::UnresolvedComplaint => {
            reasons.push("Customer concerns not adequately addressed".to_string());
            if ctx.dominant.tone == Tone::Angry {
                reasons.push("customer expressed significant frustration".to_string());
            }
        }
        CallOutcome::CustomerSatisfied => {
            reasons.push("Positive resolution with customer satisfaction indicators".to_string());
        }
        CallOutcome::CustomerDissatisfied => {
            reasons.push("Despite resolution attempt, customer remains dissatisfied".to_string());
        }
        CallOutcome::Pending => {
            reasons.push("Case status indicates pending review".to_string());
        }
        CallOutcome::NoResolution => {
            reasons.push("No resolution indicators in the closing exchange".to_string());
            if violations > 0 {
                reasons.push(format!("{violations} policy violation(s) detected"));
            }
        }
        CallOutcome::FollowUpNeeded => {}
    }

    if reasons.is_empty() {
        return "Classification based on conversation flow analysis".to_string();
    }
    reasons.join(". ")
}

fn next_action(primary: CallOutcome, ctx: &OutcomeContext) -> &'static str {
    match primary {
        CallOutcome::Escalated if ctx.risk.total_score >= ESCALATION_RISK => {
            "Immediate escalation to compliance manager and legal review"
        }
        CallOutcome::Escalated => "Escalate to supervisor for review and appropriate action",
        CallOutcome::LegalDispute => {
            "Forward to legal department immediately; document all evidence"
        }
        CallOutcome::CallbackRequired => {
            "Schedule callback within 24-48 hours; ensure follow-through"
        }
        CallOutcome::UnresolvedComplaint => {
            "Re-engage customer with senior agent; offer resolution options"
        }
        CallOutcome::Dropped => "Attempt reconnection; investigate reason for call termination",
        CallOutcome::Pending => {
            "Monitor for updates; follow up if no resolution within 3-5 business days"
        }
        CallOutcome::CustomerDissatisfied => {
            "Customer retention intervention; offer goodwill gesture if appropriate"
        }
        CallOutcome::Resolved if ctx.has_violations() => {
            "Document resolution; review agent performance for improvement"
        }
        CallOutcome::Resolved => {
            "Close case; no further action required unless customer re-contacts"
        }
        CallOutcome::CustomerSatisfied => {
            "Close case successfully; use as positive training example"
        }
        CallOutcome::Transferred | CallOutcome::FollowUpNeeded | CallOutcome::NoResolution => {
            "Review case details and determine appropriate next steps"
        }
    }
}

fn urgency(primary: CallOutcome, risk: &RiskAssessment) -> Urgency {
    let mut urgency = Urgency::from_risk_level(risk.risk_level);
    if primary == CallOutcome::LegalDispute {
        urgency = urgency.max(Urgency::High);
    }
    if primary.requires_follow_up() {
        urgency = urgency.max(Urgency::Medium);
    }
    urgency
}

fn satisfaction(primary: CallOutcome, tone: Tone) -> SatisfactionIndicator {
    match primary {
        CallOutcome::CustomerSatisfied => SatisfactionIndicator::Satisfied,
        CallOutcome::CustomerDissatisfied => SatisfactionIndicator::Dissatisfied,
        CallOutcome::Escalated | CallOutcome::LegalDispute if tone.is_hostile() => {
            SatisfactionIndicator::HighlyDissatisfied
        }
        CallOutcome::Escalated | CallOutcome::LegalDispute => SatisfactionIndicator::Dissatisfied,
        CallOutcome::Resolved | CallOutcome::Transferred
            if matches!(tone, Tone::Calm | Tone::Neutral | Tone::Satisfied) =>
        {
            SatisfactionIndicator::NeutralToSatisfied
        }
        CallOutcome::UnresolvedComplaint | CallOutcome::Dropped => {
            SatisfactionIndicator::Dissatisfied
        }
        _ => SatisfactionIndicator::Neutral,
    }
}
