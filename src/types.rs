//! Core types for the call audit pipeline
//!
//! This module defines the data structures that flow through each stage of the
//! pipeline: canonical call signals produced by the normalizer, and the risk,
//! outcome and performance assessments produced from them.

use serde::{Deserialize, Serialize};

// ============================================================================
// Canonical input signals
// ============================================================================

/// Severity of a policy violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    /// Risk points contributed by one violation of this severity
    pub fn risk_points(&self) -> f64 {
        match self {
            Severity::Critical => 30.0,
            Severity::High => 20.0,
            Severity::Medium => 10.0,
            Severity::Low => 5.0,
        }
    }
}

/// A policy violation detected upstream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyViolation {
    /// Policy clause identifier, when the detector supplied one
    pub clause_id: Option<String>,
    pub severity: Severity,
    pub category: String,
    /// Quote or description backing the violation
    pub evidence: String,
    /// Seconds from call start
    pub timestamp_sec: f64,
}

impl PolicyViolation {
    /// Whether the category or evidence mentions any of `terms`
    pub fn mentions_any(&self, terms: &[&str]) -> bool {
        let text = crate::keywords::NormalizedText::from_parts([
            self.category.as_str(),
            self.evidence.as_str(),
        ]);
        text.contains_any(terms)
    }
}

/// Kind of threat detected in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreatKind {
    Intimidation,
    Implied,
    Explicit,
}

impl ThreatKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatKind::Intimidation => "intimidation",
            ThreatKind::Implied => "implied",
            ThreatKind::Explicit => "explicit",
        }
    }

    pub fn risk_points(&self) -> f64 {
        match self {
            ThreatKind::Explicit => 25.0,
            ThreatKind::Implied => 15.0,
            ThreatKind::Intimidation => 10.0,
        }
    }
}

/// A detected threat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreatSignal {
    pub kind: ThreatKind,
    /// Free-text description, when the detector supplied one
    pub text: Option<String>,
}

/// Emotional tone of a conversation window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Threatening,
    Aggressive,
    Distressed,
    Angry,
    Frustrated,
    Neutral,
    Calm,
    Satisfied,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Threatening => "threatening",
            Tone::Aggressive => "aggressive",
            Tone::Distressed => "distressed",
            Tone::Angry => "angry",
            Tone::Frustrated => "frustrated",
            Tone::Neutral => "neutral",
            Tone::Calm => "calm",
            Tone::Satisfied => "satisfied",
        }
    }

    /// Base risk points for a window dominated by this tone
    pub fn risk_points(&self) -> f64 {
        match self {
            Tone::Threatening => 25.0,
            Tone::Aggressive => 20.0,
            Tone::Distressed | Tone::Angry => 15.0,
            Tone::Frustrated => 10.0,
            Tone::Neutral | Tone::Calm | Tone::Satisfied => 0.0,
        }
    }

    /// Angry, aggressive or threatening
    pub fn is_hostile(&self) -> bool {
        matches!(self, Tone::Angry | Tone::Aggressive | Tone::Threatening)
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, Tone::Calm | Tone::Satisfied)
    }
}

/// Acoustic arousal level measured from the audio
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arousal {
    Low,
    Medium,
    High,
}

impl Arousal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Arousal::Low => "low",
            Arousal::Medium => "medium",
            Arousal::High => "high",
        }
    }

    /// Adjustment added to a non-zero tone score
    pub fn risk_adjustment(&self) -> f64 {
        match self {
            Arousal::High => 5.0,
            Arousal::Medium => 2.0,
            Arousal::Low => 0.0,
        }
    }
}

/// Emotional reading for one window of the call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionalSignal {
    pub tone: Tone,
    /// 0-1
    pub intensity: f64,
    pub acoustic_arousal: Arousal,
}

impl Default for EmotionalSignal {
    fn default() -> Self {
        Self {
            tone: Tone::Neutral,
            intensity: 0.0,
            acoustic_arousal: Arousal::Low,
        }
    }
}

/// Pick the window that dominates the call's emotional profile.
///
/// Highest tone points win; ties go to higher intensity, then higher arousal,
/// then the earliest window.
pub fn dominant_emotion(signals: &[EmotionalSignal]) -> EmotionalSignal {
    let mut best: Option<&EmotionalSignal> = None;
    for signal in signals {
        let replace = match best {
            None => true,
            Some(current) => {
                let key = (signal.tone.risk_points(), signal.intensity);
                let current_key = (current.tone.risk_points(), current.intensity);
                key > current_key
                    || (key == current_key && signal.acoustic_arousal > current.acoustic_arousal)
            }
        };
        if replace {
            best = Some(signal);
        }
    }
    best.copied().unwrap_or_default()
}

/// Who spoke an utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Agent,
    Customer,
    Unknown,
}

/// One diarized utterance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    pub speaker: Speaker,
    pub text: String,
    /// Seconds from call start
    pub timestamp_sec: f64,
}

/// The diarized conversation, in call order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationSignal {
    pub utterances: Vec<Utterance>,
}

/// Number of trailing utterances inspected for ending keywords
pub const CLOSING_WINDOW: usize = 3;

impl ConversationSignal {
    /// Text of the final utterances, prepared for keyword matching
    pub fn closing_text(&self) -> crate::keywords::NormalizedText {
        let start = self.utterances.len().saturating_sub(CLOSING_WINDOW);
        crate::keywords::NormalizedText::from_parts(
            self.utterances[start..].iter().map(|u| u.text.as_str()),
        )
    }

    pub fn agent_utterances(&self) -> impl Iterator<Item = &Utterance> {
        self.utterances
            .iter()
            .filter(|u| u.speaker == Speaker::Agent)
    }

    pub fn has_speaker(&self, speaker: Speaker) -> bool {
        self.utterances.iter().any(|u| u.speaker == speaker)
    }
}

/// Five-step rating used for politeness and professionalism
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConductLevel {
    Unacceptable,
    Poor,
    Fair,
    Good,
    Excellent,
}

impl ConductLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConductLevel::Unacceptable => "unacceptable",
            ConductLevel::Poor => "poor",
            ConductLevel::Fair => "fair",
            ConductLevel::Good => "good",
            ConductLevel::Excellent => "excellent",
        }
    }

    pub fn is_deficient(&self) -> bool {
        matches!(self, ConductLevel::Poor | ConductLevel::Unacceptable)
    }

    pub fn is_strong(&self) -> bool {
        matches!(self, ConductLevel::Good | ConductLevel::Excellent)
    }
}

/// Four-step empathy rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmpathyLevel {
    None,
    Low,
    Medium,
    High,
}

impl EmpathyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmpathyLevel::None => "none",
            EmpathyLevel::Low => "low",
            EmpathyLevel::Medium => "medium",
            EmpathyLevel::High => "high",
        }
    }
}

/// Qualitative ratings of the agent's conduct
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConductRating {
    pub politeness: ConductLevel,
    pub empathy: EmpathyLevel,
    pub professionalism: ConductLevel,
}

impl Default for AgentConductRating {
    fn default() -> Self {
        Self {
            politeness: ConductLevel::Fair,
            empathy: EmpathyLevel::Medium,
            professionalism: ConductLevel::Fair,
        }
    }
}

/// A prohibited phrase spoken by the agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProhibitedPhraseHit {
    pub phrase: String,
    /// Seconds from call start
    pub timestamp_sec: f64,
}

/// Recoverable problem found while normalizing upstream data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputAnomaly {
    MissingSeverity,
    UnknownSeverity,
    UnknownThreatKind,
    UnknownTone,
    UnknownArousal,
    IntensityOutOfRange,
    MissingConductRating,
    UnknownConductRating,
    UnknownSpeaker,
    MissingUtteranceText,
    UnparseableTimestamp,
    /// A field carried the wrong JSON type
    MalformedField,
    /// A list entry could not be read at all and was dropped
    MalformedEntry,
}

impl InputAnomaly {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputAnomaly::MissingSeverity => "missing_severity",
            InputAnomaly::UnknownSeverity => "unknown_severity",
            InputAnomaly::UnknownThreatKind => "unknown_threat_kind",
            InputAnomaly::UnknownTone => "unknown_tone",
            InputAnomaly::UnknownArousal => "unknown_arousal",
            InputAnomaly::IntensityOutOfRange => "intensity_out_of_range",
            InputAnomaly::MissingConductRating => "missing_conduct_rating",
            InputAnomaly::UnknownConductRating => "unknown_conduct_rating",
            InputAnomaly::UnknownSpeaker => "unknown_speaker",
            InputAnomaly::MissingUtteranceText => "missing_utterance_text",
            InputAnomaly::UnparseableTimestamp => "unparseable_timestamp",
            InputAnomaly::MalformedField => "malformed_field",
            InputAnomaly::MalformedEntry => "malformed_entry",
        }
    }
}

/// Canonical signals for one call, produced by the normalizer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallSignals {
    pub call_id: Option<String>,
    pub violations: Vec<PolicyViolation>,
    pub threats: Vec<ThreatSignal>,
    pub emotions: Vec<EmotionalSignal>,
    pub conversation: ConversationSignal,
    pub conduct: AgentConductRating,
    pub time_violation: bool,
    pub prohibited_hits: Vec<ProhibitedPhraseHit>,
    /// Upstream "final status" hint, lowercased
    pub final_status: Option<String>,
    /// Recovered input problems, in first-seen order
    pub anomalies: Vec<InputAnomaly>,
}

impl CallSignals {
    pub fn dominant_emotion(&self) -> EmotionalSignal {
        dominant_emotion(&self.emotions)
    }

    pub fn has_critical_violation(&self) -> bool {
        self.violations
            .iter()
            .any(|v| v.severity == Severity::Critical)
    }

    pub fn count_severity(&self, severity: Severity) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == severity)
            .count()
    }

    pub fn has_prohibited_phrase(&self) -> bool {
        !self.prohibited_hits.is_empty()
    }

    /// Whether an explicit or implied threat was detected
    pub fn has_direct_threat(&self) -> bool {
        self.threats
            .iter()
            .any(|t| matches!(t.kind, ThreatKind::Explicit | ThreatKind::Implied))
    }

    pub(crate) fn flag(&mut self, anomaly: InputAnomaly) {
        if !self.anomalies.contains(&anomaly) {
            self.anomalies.push(anomaly);
        }
    }
}

// ============================================================================
// Risk assessment
// ============================================================================

/// The six contributors to the total risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskComponent {
    PolicyViolations,
    EmotionalIntensity,
    ThreatLevel,
    AgentConduct,
    TimeViolation,
    ProhibitedPhrases,
}

impl RiskComponent {
    pub const ALL: [RiskComponent; 6] = [
        RiskComponent::PolicyViolations,
        RiskComponent::EmotionalIntensity,
        RiskComponent::ThreatLevel,
        RiskComponent::AgentConduct,
        RiskComponent::TimeViolation,
        RiskComponent::ProhibitedPhrases,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskComponent::PolicyViolations => "policy_violations",
            RiskComponent::EmotionalIntensity => "emotional_intensity",
            RiskComponent::ThreatLevel => "threat_level",
            RiskComponent::AgentConduct => "agent_conduct",
            RiskComponent::TimeViolation => "time_violation",
            RiskComponent::ProhibitedPhrases => "prohibited_phrases",
        }
    }

    /// Maximum points this component can contribute
    pub fn cap(&self) -> f64 {
        match self {
            RiskComponent::PolicyViolations => 40.0,
            RiskComponent::EmotionalIntensity => 25.0,
            RiskComponent::ThreatLevel => 25.0,
            RiskComponent::AgentConduct => 25.0,
            RiskComponent::TimeViolation => 15.0,
            RiskComponent::ProhibitedPhrases => 60.0,
        }
    }
}

/// Per-component risk points
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskBreakdown {
    pub policy_violations: f64,
    pub emotional_intensity: f64,
    pub threat_level: f64,
    pub agent_conduct: f64,
    pub time_violation: f64,
    pub prohibited_phrases: f64,
}

impl RiskBreakdown {
    pub fn get(&self, component: RiskComponent) -> f64 {
        match component {
            RiskComponent::PolicyViolations => self.policy_violations,
            RiskComponent::EmotionalIntensity => self.emotional_intensity,
            RiskComponent::ThreatLevel => self.threat_level,
            RiskComponent::AgentConduct => self.agent_conduct,
            RiskComponent::TimeViolation => self.time_violation,
            RiskComponent::ProhibitedPhrases => self.prohibited_phrases,
        }
    }

    pub fn set(&mut self, component: RiskComponent, points: f64) {
        let slot = match component {
            RiskComponent::PolicyViolations => &mut self.policy_violations,
            RiskComponent::EmotionalIntensity => &mut self.emotional_intensity,
            RiskComponent::ThreatLevel => &mut self.threat_level,
            RiskComponent::AgentConduct => &mut self.agent_conduct,
            RiskComponent::TimeViolation => &mut self.time_violation,
            RiskComponent::ProhibitedPhrases => &mut self.prohibited_phrases,
        };
        *slot = points;
    }

    /// Unclamped sum of all components
    pub fn sum(&self) -> f64 {
        RiskComponent::ALL.iter().map(|c| self.get(*c)).sum()
    }
}

/// Risk tier on the total score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Minimal,
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskLevel {
    /// Band on the clamped total: [0,20], (20,40], (40,60], (60,80], (80,100]
    pub fn from_score(total: f64) -> Self {
        if total > 80.0 {
            RiskLevel::Critical
        } else if total > 60.0 {
            RiskLevel::High
        } else if total > 40.0 {
            RiskLevel::Moderate
        } else if total > 20.0 {
            RiskLevel::Low
        } else {
            RiskLevel::Minimal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Minimal => "minimal",
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            RiskLevel::Minimal => "MINIMAL",
            RiskLevel::Low => "LOW",
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }
}

/// Operational action chosen by the escalation ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EscalationAction {
    #[serde(rename = "No escalation required")]
    None,
    #[serde(rename = "Supervisor review recommended")]
    SupervisorReview,
    #[serde(rename = "Manager review required")]
    ManagerReview,
    #[serde(rename = "Escalate to compliance team")]
    ComplianceTeam,
    #[serde(rename = "Legal team review required")]
    LegalReview,
    #[serde(rename = "Executive level attention needed")]
    ExecutiveAttention,
}

impl EscalationAction {
    /// Ladder on the total: <35, [35,50), [50,65), [65,80), [80,90), >=90
    pub fn from_score(total: f64) -> Self {
        if total >= 90.0 {
            EscalationAction::ExecutiveAttention
        } else if total >= 80.0 {
            EscalationAction::LegalReview
        } else if total >= 65.0 {
            EscalationAction::ComplianceTeam
        } else if total >= 50.0 {
            EscalationAction::ManagerReview
        } else if total >= 35.0 {
            EscalationAction::SupervisorReview
        } else {
            EscalationAction::None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EscalationAction::None => "No escalation required",
            EscalationAction::SupervisorReview => "Supervisor review recommended",
            EscalationAction::ManagerReview => "Manager review required",
            EscalationAction::ComplianceTeam => "Escalate to compliance team",
            EscalationAction::LegalReview => "Legal team review required",
            EscalationAction::ExecutiveAttention => "Executive level attention needed",
        }
    }
}

/// Deterministic rule that forced critical handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskOverride {
    ProhibitedPhrase,
    CriticalViolation,
}

/// Output of the risk score calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// 0-100
    pub total_score: f64,
    pub risk_level: RiskLevel,
    pub risk_category: String,
    pub escalation_action: EscalationAction,
    pub justification: String,
    pub requires_immediate_action: bool,
    pub auto_escalate: bool,
    pub overrides: Vec<RiskOverride>,
    pub breakdown: RiskBreakdown,
}

// ============================================================================
// Outcome classification
// ============================================================================

/// Fixed taxonomy of how a call concluded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallOutcome {
    #[serde(rename = "Resolved")]
    Resolved,
    #[serde(rename = "Escalated")]
    Escalated,
    #[serde(rename = "Dropped")]
    Dropped,
    #[serde(rename = "Pending")]
    Pending,
    #[serde(rename = "Transferred")]
    Transferred,
    #[serde(rename = "Callback Required")]
    CallbackRequired,
    #[serde(rename = "Legal Dispute")]
    LegalDispute,
    #[serde(rename = "Unresolved Complaint")]
    UnresolvedComplaint,
    #[serde(rename = "Customer Satisfied")]
    CustomerSatisfied,
    #[serde(rename = "Customer Dissatisfied")]
    CustomerDissatisfied,
    #[serde(rename = "Follow-up Needed")]
    FollowUpNeeded,
    #[serde(rename = "No Resolution")]
    NoResolution,
}

impl CallOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallOutcome::Resolved => "Resolved",
            CallOutcome::Escalated => "Escalated",
            CallOutcome::Dropped => "Dropped",
            CallOutcome::Pending => "Pending",
            CallOutcome::Transferred => "Transferred",
            CallOutcome::CallbackRequired => "Callback Required",
            CallOutcome::LegalDispute => "Legal Dispute",
            CallOutcome::UnresolvedComplaint => "Unresolved Complaint",
            CallOutcome::CustomerSatisfied => "Customer Satisfied",
            CallOutcome::CustomerDissatisfied => "Customer Dissatisfied",
            CallOutcome::FollowUpNeeded => "Follow-up Needed",
            CallOutcome::NoResolution => "No Resolution",
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            CallOutcome::Resolved => "RESOLVED",
            CallOutcome::Escalated => "ESCALATED",
            CallOutcome::Dropped => "DROPPED",
            CallOutcome::Pending => "PENDING",
            CallOutcome::Transferred => "TRANSFERRED",
            CallOutcome::CallbackRequired => "CALLBACK_REQUIRED",
            CallOutcome::LegalDispute => "LEGAL_DISPUTE",
            CallOutcome::UnresolvedComplaint => "UNRESOLVED_COMPLAINT",
            CallOutcome::CustomerSatisfied => "CUSTOMER_SATISFIED",
            CallOutcome::CustomerDissatisfied => "CUSTOMER_DISSATISFIED",
            CallOutcome::FollowUpNeeded => "FOLLOW_UP_NEEDED",
            CallOutcome::NoResolution => "NO_RESOLUTION",
        }
    }

    pub fn requires_follow_up(&self) -> bool {
        matches!(
            self,
            CallOutcome::CallbackRequired
                | CallOutcome::FollowUpNeeded
                | CallOutcome::Pending
                | CallOutcome::Dropped
        )
    }
}

/// Cascade rule that selected the primary outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CascadeRule {
    CriticalViolation,
    DirectThreat,
    CriticalRisk,
    EndingKeywords,
    HostileTone,
    StatusHint,
    CompliantLowRisk,
    FallbackWithViolations,
    Fallback,
}

/// How quickly the call needs attention
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Critical,
}

impl Urgency {
    pub fn from_risk_level(level: RiskLevel) -> Self {
        match level {
            RiskLevel::Critical => Urgency::Critical,
            RiskLevel::High => Urgency::High,
            RiskLevel::Moderate => Urgency::Medium,
            RiskLevel::Low | RiskLevel::Minimal => Urgency::Low,
        }
    }
}

/// Estimated customer satisfaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SatisfactionIndicator {
    Satisfied,
    NeutralToSatisfied,
    Neutral,
    Dissatisfied,
    HighlyDissatisfied,
}

/// Output of the call outcome classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeClassification {
    pub primary_outcome: CallOutcome,
    pub outcome_category: String,
    pub confidence_score: f64,
    pub matched_rule: CascadeRule,
    pub outcome_reasoning: String,
    pub secondary_outcomes: Vec<CallOutcome>,
    pub next_action: String,
    pub urgency_level: Urgency,
    pub requires_follow_up: bool,
    pub customer_satisfaction_indicator: SatisfactionIndicator,
}

// ============================================================================
// Agent performance
// ============================================================================

/// Performance tier on the final score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceLevel {
    Unacceptable,
    Poor,
    NeedsImprovement,
    Satisfactory,
    Good,
    Excellent,
    Exceptional,
}

impl PerformanceLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            PerformanceLevel::Exceptional
        } else if score >= 80.0 {
            PerformanceLevel::Excellent
        } else if score >= 70.0 {
            PerformanceLevel::Good
        } else if score >= 60.0 {
            PerformanceLevel::Satisfactory
        } else if score >= 40.0 {
            PerformanceLevel::NeedsImprovement
        } else if score >= 20.0 {
            PerformanceLevel::Poor
        } else {
            PerformanceLevel::Unacceptable
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            PerformanceLevel::Unacceptable => "UNACCEPTABLE",
            PerformanceLevel::Poor => "POOR",
            PerformanceLevel::NeedsImprovement => "NEEDS_IMPROVEMENT",
            PerformanceLevel::Satisfactory => "SATISFACTORY",
            PerformanceLevel::Good => "GOOD",
            PerformanceLevel::Excellent => "EXCELLENT",
            PerformanceLevel::Exceptional => "EXCEPTIONAL",
        }
    }
}

/// Remediation urgency for the agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainingPriority {
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl TrainingPriority {
    pub fn from_score(score: f64) -> Self {
        if score < 40.0 {
            TrainingPriority::Critical
        } else if score < 60.0 {
            TrainingPriority::High
        } else if score < 70.0 {
            TrainingPriority::Medium
        } else if score < 80.0 {
            TrainingPriority::Low
        } else {
            TrainingPriority::None
        }
    }
}

/// Fixed vocabulary of agent improvement areas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImprovementArea {
    #[serde(rename = "Communication Clarity")]
    CommunicationClarity,
    #[serde(rename = "Active Listening")]
    ActiveListening,
    #[serde(rename = "Empathy and Customer Understanding")]
    Empathy,
    #[serde(rename = "Politeness and Courtesy")]
    Politeness,
    #[serde(rename = "Professional Demeanor")]
    Professionalism,
    #[serde(rename = "Problem Resolution Skills")]
    ProblemSolving,
    #[serde(rename = "Compliance and Policy Adherence")]
    ComplianceTraining,
    #[serde(rename = "Emotional Control and Composure")]
    EmotionalRegulation,
    #[serde(rename = "Appropriate Language Use")]
    LanguageUse,
    #[serde(rename = "Conflict De-escalation")]
    ConflictResolution,
    #[serde(rename = "Product/Service Knowledge")]
    ProductKnowledge,
    #[serde(rename = "Call Management and Control")]
    CallControl,
}

impl ImprovementArea {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImprovementArea::CommunicationClarity => "Communication Clarity",
            ImprovementArea::ActiveListening => "Active Listening",
            ImprovementArea::Empathy => "Empathy and Customer Understanding",
            ImprovementArea::Politeness => "Politeness and Courtesy",
            ImprovementArea::Professionalism => "Professional Demeanor",
            ImprovementArea::ProblemSolving => "Problem Resolution Skills",
            ImprovementArea::ComplianceTraining => "Compliance and Policy Adherence",
            ImprovementArea::EmotionalRegulation => "Emotional Control and Composure",
            ImprovementArea::LanguageUse => "Appropriate Language Use",
            ImprovementArea::ConflictResolution => "Conflict De-escalation",
            ImprovementArea::ProductKnowledge => "Product/Service Knowledge",
            ImprovementArea::CallControl => "Call Management and Control",
        }
    }

    /// Training recommended for this area
    pub fn recommendation(&self) -> &'static str {
        match self {
            ImprovementArea::CommunicationClarity => {
                "Communication skills workshop: Clear articulation and message structuring"
            }
            ImprovementArea::ActiveListening => {
                "Active listening training: Techniques for better customer understanding"
            }
            ImprovementArea::Empathy => "Empathy and emotional intelligence training",
            ImprovementArea::Politeness => {
                "Customer service excellence: Politeness and professional courtesy"
            }
            ImprovementArea::Professionalism => {
                "Professional conduct and business etiquette training"
            }
            ImprovementArea::ProblemSolving => "Problem-solving and resolution skills workshop",
            ImprovementArea::ComplianceTraining => {
                "Compliance and regulatory adherence certification course"
            }
            ImprovementArea::EmotionalRegulation => {
                "Stress management and emotional control training"
            }
            ImprovementArea::LanguageUse => {
                "Appropriate language and tone training for customer interactions"
            }
            ImprovementArea::ConflictResolution => {
                "Conflict de-escalation and resolution techniques"
            }
            ImprovementArea::ProductKnowledge => "Product/service knowledge enhancement sessions",
            ImprovementArea::CallControl => "Call management and control strategies workshop",
        }
    }
}

/// The five scored performance components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceComponent {
    Communication,
    CustomerService,
    Professionalism,
    ProblemResolution,
    ComplianceAdherence,
}

impl PerformanceComponent {
    pub const ALL: [PerformanceComponent; 5] = [
        PerformanceComponent::Communication,
        PerformanceComponent::CustomerService,
        PerformanceComponent::Professionalism,
        PerformanceComponent::ProblemResolution,
        PerformanceComponent::ComplianceAdherence,
    ];

    pub fn max_points(&self) -> f64 {
        match self {
            PerformanceComponent::Communication => 30.0,
            PerformanceComponent::CustomerService => 25.0,
            PerformanceComponent::Professionalism => 20.0,
            PerformanceComponent::ProblemResolution => 15.0,
            PerformanceComponent::ComplianceAdherence => 10.0,
        }
    }
}

/// Per-component performance points plus penalties
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub communication: f64,
    pub customer_service: f64,
    pub professionalism: f64,
    pub problem_resolution: f64,
    pub compliance_adherence: f64,
    /// Zero or negative
    pub penalties: f64,
}

impl ComponentScores {
    pub fn get(&self, component: PerformanceComponent) -> f64 {
        match component {
            PerformanceComponent::Communication => self.communication,
            PerformanceComponent::CustomerService => self.customer_service,
            PerformanceComponent::Professionalism => self.professionalism,
            PerformanceComponent::ProblemResolution => self.problem_resolution,
            PerformanceComponent::ComplianceAdherence => self.compliance_adherence,
        }
    }

    pub fn set(&mut self, component: PerformanceComponent, points: f64) {
        let slot = match component {
            PerformanceComponent::Communication => &mut self.communication,
            PerformanceComponent::CustomerService => &mut self.customer_service,
            PerformanceComponent::Professionalism => &mut self.professionalism,
            PerformanceComponent::ProblemResolution => &mut self.problem_resolution,
            PerformanceComponent::ComplianceAdherence => &mut self.compliance_adherence,
        };
        *slot = points;
    }
}

/// The agent ratings the score was derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualitativeRatings {
    pub politeness: ConductLevel,
    pub empathy: EmpathyLevel,
    pub professionalism: ConductLevel,
}

impl From<AgentConductRating> for QualitativeRatings {
    fn from(rating: AgentConductRating) -> Self {
        Self {
            politeness: rating.politeness,
            empathy: rating.empathy,
            professionalism: rating.professionalism,
        }
    }
}

/// Output of the agent performance calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceAssessment {
    /// 0-100
    pub overall_quality_score: f64,
    pub performance_level: PerformanceLevel,
    pub performance_category: String,
    pub component_scores: ComponentScores,
    pub qualitative_ratings: QualitativeRatings,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<ImprovementArea>,
    pub specific_feedback: String,
    pub requires_coaching: bool,
    pub requires_disciplinary_action: bool,
    pub commendation_worthy: bool,
    pub training_priority: TrainingPriority,
    pub training_recommendations: Vec<String>,
    pub benchmark: BenchmarkComparison,
}

/// Rough standing against the team, from the gap to the team average
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PercentileBand {
    #[serde(rename = "Bottom 25%")]
    Bottom25,
    #[serde(rename = "Below average (25th-50th percentile)")]
    BelowAverage,
    #[serde(rename = "Above average (50th-75th percentile)")]
    AboveAverage,
    #[serde(rename = "Top 25%")]
    Top25,
    #[serde(rename = "Top 10%")]
    Top10,
}

impl PercentileBand {
    /// Band for `score - average`
    pub fn from_gap(gap: f64) -> Self {
        if gap >= 20.0 {
            PercentileBand::Top10
        } else if gap >= 10.0 {
            PercentileBand::Top25
        } else if gap >= 0.0 {
            PercentileBand::AboveAverage
        } else if gap >= -10.0 {
            PercentileBand::BelowAverage
        } else {
            PercentileBand::Bottom25
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PercentileBand::Bottom25 => "Bottom 25%",
            PercentileBand::BelowAverage => "Below average (25th-50th percentile)",
            PercentileBand::AboveAverage => "Above average (50th-75th percentile)",
            PercentileBand::Top25 => "Top 25%",
            PercentileBand::Top10 => "Top 10%",
        }
    }
}

/// Standing against the company benchmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PerformanceTier {
    #[serde(rename = "Below Standard")]
    BelowStandard,
    #[serde(rename = "Approaching Standard")]
    ApproachingStandard,
    #[serde(rename = "Meets Standard")]
    MeetsStandard,
    #[serde(rename = "Elite Performer")]
    ElitePerformer,
}

impl PerformanceTier {
    pub fn classify(score: f64, benchmark: f64) -> Self {
        if score >= benchmark + 10.0 {
            PerformanceTier::ElitePerformer
        } else if score >= benchmark {
            PerformanceTier::MeetsStandard
        } else if score >= benchmark - 10.0 {
            PerformanceTier::ApproachingStandard
        } else {
            PerformanceTier::BelowStandard
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceTier::BelowStandard => "Below Standard",
            PerformanceTier::ApproachingStandard => "Approaching Standard",
            PerformanceTier::MeetsStandard => "Meets Standard",
            PerformanceTier::ElitePerformer => "Elite Performer",
        }
    }
}

/// Agent score against the configured team average and company benchmark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkComparison {
    pub agent_score: f64,
    pub team_average: f64,
    pub company_benchmark: f64,
    /// Rounded to one decimal
    pub vs_team_average: f64,
    /// Rounded to one decimal
    pub vs_company_benchmark: f64,
    pub percentile_vs_team: PercentileBand,
    pub meets_company_standard: bool,
    pub performance_tier: PerformanceTier,
}

// ============================================================================
// Audit record
// ============================================================================

/// Producer metadata embedded in every record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditProducer {
    pub name: String,
    pub version: String,
}

/// How many signals of each kind the audit consumed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalCounts {
    pub violations: usize,
    pub threats: usize,
    pub emotion_windows: usize,
    pub utterances: usize,
    pub prohibited_phrase_hits: usize,
}

/// Input quality summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditQuality {
    /// Recovered input anomalies
    pub anomalies: Vec<String>,
    pub signal_counts: SignalCounts,
    /// True when any input had to be replaced by a default
    pub degraded: bool,
}

/// Complete audit of one call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallAuditRecord {
    pub audit_version: String,
    pub producer: AuditProducer,
    pub audit_id: String,
    pub call_id: Option<String>,
    pub risk_assessment: RiskAssessment,
    pub outcome_classification: OutcomeClassification,
    pub performance_assessment: PerformanceAssessment,
    pub quality: AuditQuality,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_bands() {
        assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Minimal);
        assert_eq!(RiskLevel::from_score(20.0), RiskLevel::Minimal);
        assert_eq!(RiskLevel::from_score(20.5), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(40.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(60.0), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(80.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(80.1), RiskLevel::Critical);
        assert_eq!(RiskLevel::from_score(100.0), RiskLevel::Critical);
    }

    #[test]
    fn test_escalation_ladder() {
        assert_eq!(EscalationAction::from_score(34.9), EscalationAction::None);
        assert_eq!(EscalationAction::from_score(35.0), EscalationAction::SupervisorReview);
        assert_eq!(EscalationAction::from_score(50.0), EscalationAction::ManagerReview);
        assert_eq!(EscalationAction::from_score(65.0), EscalationAction::ComplianceTeam);
        assert_eq!(EscalationAction::from_score(80.0), EscalationAction::LegalReview);
        assert_eq!(EscalationAction::from_score(90.0), EscalationAction::ExecutiveAttention);
    }

    #[test]
    fn test_ladders_can_disagree() {
        // 80 is still High on the tier scale but already legal review on the ladder.
        assert_eq!(RiskLevel::from_score(80.0), RiskLevel::High);
        assert_eq!(EscalationAction::from_score(80.0), EscalationAction::LegalReview);
    }

    #[test]
    fn test_output_strings() {
        let json = serde_json::to_string(&CallOutcome::CallbackRequired).unwrap();
        assert_eq!(json, "\"Callback Required\"");
        let json = serde_json::to_string(&EscalationAction::ComplianceTeam).unwrap();
        assert_eq!(json, "\"Escalate to compliance team\"");
        let json = serde_json::to_string(&SatisfactionIndicator::HighlyDissatisfied).unwrap();
        assert_eq!(json, "\"highly_dissatisfied\"");
        let json = serde_json::to_string(&ImprovementArea::ConflictResolution).unwrap();
        assert_eq!(json, "\"Conflict De-escalation\"");
        assert_eq!(
            CallOutcome::FollowUpNeeded.as_str(),
            serde_json::to_value(CallOutcome::FollowUpNeeded).unwrap()
        );
    }

    #[test]
    fn test_dominant_emotion() {
        let signals = [
            EmotionalSignal {
                tone: Tone::Frustrated,
                intensity: 0.9,
                acoustic_arousal: Arousal::High,
            },
            EmotionalSignal {
                tone: Tone::Angry,
                intensity: 0.4,
                acoustic_arousal: Arousal::Low,
            },
            EmotionalSignal {
                tone: Tone::Angry,
                intensity: 0.4,
                acoustic_arousal: Arousal::Medium,
            },
        ];
        let dominant = dominant_emotion(&signals);
        assert_eq!(dominant.tone, Tone::Angry);
        assert_eq!(dominant.acoustic_arousal, Arousal::Medium);

        assert_eq!(dominant_emotion(&[]).tone, Tone::Neutral);
    }

    #[test]
    fn test_breakdown_sum() {
        let mut breakdown = RiskBreakdown::default();
        for component in RiskComponent::ALL {
            breakdown.set(component, component.cap());
        }
        assert_eq!(breakdown.sum(), 190.0);
    }
}
