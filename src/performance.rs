//! Agent performance scoring
//!
//! Five rating-driven components plus penalties, clamped to 0-100, then mapped
//! onto a performance band, strengths, weakness tags from a fixed vocabulary,
//! a training priority and a short list of training recommendations. The
//! final score is also placed against the configured team average and
//! company benchmark.

use tracing::debug;

use crate::config::PerformanceBenchmarks;
use crate::keywords::{self, NormalizedText};
use crate::risk::round1;
use crate::types::{
    BenchmarkComparison, CallOutcome, CallSignals, ComponentScores, ConductLevel, EmpathyLevel,
    ImprovementArea, OutcomeClassification, PercentileBand, PerformanceAssessment,
    PerformanceComponent, PerformanceLevel, PerformanceTier, QualitativeRatings, RiskAssessment,
    Severity, Tone, TrainingPriority,
};

/// Communication points for an average agent
const BASE_COMMUNICATION: f64 = 18.0;

/// Communication points that count as a strength
const STRONG_COMMUNICATION: f64 = 24.0;

const STRONG_RESOLUTION: f64 = 12.0;
const PARTIAL_RESOLUTION: f64 = 10.0;

const PROHIBITED_PHRASE_PENALTY: f64 = -15.0;
const MAX_PENALISED_PHRASES: usize = 2;
const THREAT_MADE_PENALTY: f64 = -20.0;
const HARASSMENT_PENALTY: f64 = -25.0;
const TIME_VIOLATION_PENALTY: f64 = -5.0;

const MAX_RECOMMENDATIONS: usize = 5;

const THREAT_TERMS: &[&str] = &["threat", "threats", "threatened", "threatening"];
const AGGRESSION_TERMS: &[&str] = &["aggressive", "aggression"];
const HARASSMENT_TERMS: &[&str] = &[
    "harassment",
    "harassing",
    "harassed",
    "intimidation",
    "intimidating",
    "coercion",
    "coercive",
];
const LANGUAGE_TERMS: &[&str] = &[
    "language",
    "inappropriate",
    "abusive",
    "abuse",
    "profanity",
    "profane",
];
const MISINFORMATION_TERMS: &[&str] = &[
    "misinformation",
    "misleading",
    "incorrect information",
    "product",
];

/// Inputs every component scorer may look at
struct PerformanceContext<'a> {
    signals: &'a CallSignals,
    outcome: &'a OutcomeClassification,
}

type ComponentScorer = fn(&PerformanceContext) -> f64;

/// Scoring function per component, in report order
const COMPONENTS: [(PerformanceComponent, ComponentScorer); 5] = [
    (PerformanceComponent::Communication, communication_points),
    (PerformanceComponent::CustomerService, customer_service_points),
    (PerformanceComponent::Professionalism, professionalism_points),
    (PerformanceComponent::ProblemResolution, resolution_points),
    (PerformanceComponent::ComplianceAdherence, compliance_points),
];

/// Agent performance calculator
pub struct PerformanceCalculator;

impl PerformanceCalculator {
    /// Score the agent on one call
    pub fn assess(
        signals: &CallSignals,
        risk: &RiskAssessment,
        outcome: &OutcomeClassification,
        benchmarks: &PerformanceBenchmarks,
    ) -> PerformanceAssessment {
        let ctx = PerformanceContext { signals, outcome };

        let mut scores = ComponentScores::default();
        for (component, scorer) in COMPONENTS {
            let points = scorer(&ctx).clamp(0.0, component.max_points());
            scores.set(component, points);
        }
        scores.penalties = penalties(signals);

        let raw: f64 = PerformanceComponent::ALL
            .iter()
            .map(|c| scores.get(*c))
            .sum::<f64>()
            + scores.penalties;
        let score = round1(raw.clamp(0.0, 100.0));

        let level = PerformanceLevel::from_score(score);
        let strengths = strengths(&scores, signals);
        let weaknesses = weaknesses(&scores, signals, outcome.primary_outcome);

        // Prohibited phrases and critical violations always need retraining.
        let training_priority = if risk.overrides.is_empty() {
            TrainingPriority::from_score(score)
        } else {
            TrainingPriority::Critical
        };

        let assessment = PerformanceAssessment {
            overall_quality_score: score,
            performance_level: level,
            performance_category: level.category().to_string(),
            component_scores: scores,
            qualitative_ratings: QualitativeRatings::from(signals.conduct),
            specific_feedback: feedback(score, &strengths, &weaknesses, signals),
            training_recommendations: recommendations(&weaknesses, signals),
            strengths,
            weaknesses,
            requires_coaching: score < 70.0,
            requires_disciplinary_action: score < 40.0 || signals.has_prohibited_phrase(),
            commendation_worthy: score >= 90.0,
            training_priority,
            benchmark: Self::compare_to_benchmark(score, benchmarks),
        };

        debug!(
            score = assessment.overall_quality_score,
            level = assessment.performance_category.as_str(),
            tier = assessment.benchmark.performance_tier.as_str(),
            "agent performance assessed"
        );

        assessment
    }

    /// Place a quality score against the team average and company benchmark
    pub fn compare_to_benchmark(
        score: f64,
        benchmarks: &PerformanceBenchmarks,
    ) -> BenchmarkComparison {
        let team_gap = score - benchmarks.team_average;
        BenchmarkComparison {
            agent_score: score,
            team_average: benchmarks.team_average,
            company_benchmark: benchmarks.company_benchmark,
            vs_team_average: round1(team_gap),
            vs_company_benchmark: round1(score - benchmarks.company_benchmark),
            percentile_vs_team: PercentileBand::from_gap(team_gap),
            meets_company_standard: score >= benchmarks.company_benchmark,
            performance_tier: PerformanceTier::classify(score, benchmarks.company_benchmark),
        }
    }
}

fn communication_points(ctx: &PerformanceContext) -> f64 {
    let agent: Vec<&str> = ctx
        .signals
        .conversation
        .agent_utterances()
        .map(|u| u.text.as_str())
        .collect();
    if agent.is_empty() {
        return BASE_COMMUNICATION;
    }

    let mut points = BASE_COMMUNICATION;

    let mean_length =
        agent.iter().map(|t| t.chars().count()).sum::<usize>() as f64 / agent.len() as f64;
    if mean_length > 50.0 {
        points += 6.0;
    } else if mean_length > 30.0 {
        points += 3.0;
    }

    // One point of evidence per phrase per utterance.
    let professional: usize = agent
        .iter()
        .map(|t| {
            let text = NormalizedText::new(t);
            keywords::PROFESSIONAL
                .iter()
                .filter(|p| text.contains_phrase(p))
                .count()
        })
        .sum();
    if professional >= 3 {
        points += 6.0;
    } else if professional >= 1 {
        points += 3.0;
    }

    if matches!(
        ctx.signals.dominant_emotion().tone,
        Tone::Aggressive | Tone::Threatening
    ) {
        points -= 10.0;
    }

    points
}

fn politeness_points(level: ConductLevel) -> f64 {
    match level {
        ConductLevel::Excellent => 12.0,
        ConductLevel::Good => 9.0,
        ConductLevel::Fair => 6.0,
        ConductLevel::Poor => 2.0,
        ConductLevel::Unacceptable => 0.0,
    }
}

fn empathy_points(level: EmpathyLevel) -> f64 {
    match level {
        EmpathyLevel::High => 13.0,
        EmpathyLevel::Medium => 8.0,
        EmpathyLevel::Low => 4.0,
        EmpathyLevel::None => 0.0,
    }
}

fn customer_service_points(ctx: &PerformanceContext) -> f64 {
    let conduct = &ctx.signals.conduct;
    politeness_points(conduct.politeness) + empathy_points(conduct.empathy)
}

fn professionalism_points(ctx: &PerformanceContext) -> f64 {
    match ctx.signals.conduct.professionalism {
        ConductLevel::Excellent => 20.0,
        ConductLevel::Good => 16.0,
        ConductLevel::Fair => 12.0,
        ConductLevel::Poor => 6.0,
        ConductLevel::Unacceptable => 0.0,
    }
}

fn resolution_points(ctx: &PerformanceContext) -> f64 {
    match ctx.outcome.primary_outcome {
        CallOutcome::Resolved | CallOutcome::CustomerSatisfied => 15.0,
        CallOutcome::CallbackRequired
        | CallOutcome::Pending
        | CallOutcome::FollowUpNeeded
        | CallOutcome::Transferred => 10.0,
        CallOutcome::Escalated | CallOutcome::UnresolvedComplaint => {
            // Escalations the agent caused earn nothing.
            let serious = ctx
                .signals
                .violations
                .iter()
                .any(|v| v.severity >= Severity::High);
            if serious {
                0.0
            } else {
                6.0
            }
        }
        CallOutcome::Dropped | CallOutcome::LegalDispute | CallOutcome::CustomerDissatisfied => {
            0.0
        }
        CallOutcome::NoResolution => 6.0,
    }
}

fn compliance_points(ctx: &PerformanceContext) -> f64 {
    let signals = ctx.signals;
    if signals.has_prohibited_phrase() || signals.has_critical_violation() {
        0.0
    } else if !signals.violations.is_empty() {
        5.0
    } else {
        10.0
    }
}

fn penalties(signals: &CallSignals) -> f64 {
    let mut penalty = 0.0;

    let phrases = signals.prohibited_hits.len().min(MAX_PENALISED_PHRASES);
    penalty += PROHIBITED_PHRASE_PENALTY * phrases as f64;

    let threat_made = !signals.threats.is_empty()
        && signals.violations.iter().any(|v| v.mentions_any(THREAT_TERMS));
    if threat_made {
        penalty += THREAT_MADE_PENALTY;
    }

    if signals
        .violations
        .iter()
        .any(|v| v.mentions_any(HARASSMENT_TERMS))
    {
        penalty += HARASSMENT_PENALTY;
    }

    if signals.time_violation {
        penalty += TIME_VIOLATION_PENALTY;
    }

    penalty
}

fn strengths(scores: &ComponentScores, signals: &CallSignals) -> Vec<String> {
    let conduct = &signals.conduct;
    let checks = [
        (
            scores.communication >= STRONG_COMMUNICATION,
            "Excellent communication clarity and articulation",
        ),
        (
            conduct.politeness.is_strong(),
            "Strong politeness and courtesy",
        ),
        (
            conduct.empathy == EmpathyLevel::High,
            "High empathy and customer understanding",
        ),
        (
            conduct.professionalism.is_strong(),
            "Professional demeanor and conduct",
        ),
        (
            scores.problem_resolution >= STRONG_RESOLUTION,
            "Effective problem resolution skills",
        ),
        (
            scores.compliance_adherence >= PerformanceComponent::ComplianceAdherence.max_points(),
            "Full compliance with policies and regulations",
        ),
        (
            scores.penalties == 0.0,
            "No policy violations or inappropriate conduct",
        ),
    ];

    let mut strengths: Vec<String> = checks
        .iter()
        .filter(|(holds, _)| *holds)
        .map(|(_, text)| text.to_string())
        .collect();
    if strengths.is_empty() {
        strengths.push("Completed the call interaction".to_string());
    }
    strengths
}

fn weaknesses(
    scores: &ComponentScores,
    signals: &CallSignals,
    outcome: CallOutcome,
) -> Vec<ImprovementArea> {
    let conduct = &signals.conduct;
    let mut areas = Vec::new();
    let mut add = |area: ImprovementArea| {
        if !areas.contains(&area) {
            areas.push(area);
        }
    };

    if scores.communication < BASE_COMMUNICATION {
        add(ImprovementArea::CommunicationClarity);
        add(ImprovementArea::ActiveListening);
    }
    if conduct.politeness.is_deficient() {
        add(ImprovementArea::Politeness);
    }
    if matches!(conduct.empathy, EmpathyLevel::Low | EmpathyLevel::None) {
        add(ImprovementArea::Empathy);
    }
    if conduct.professionalism.is_deficient() {
        add(ImprovementArea::Professionalism);
    }
    if scores.problem_resolution < PARTIAL_RESOLUTION {
        add(ImprovementArea::ProblemSolving);
    }
    if scores.compliance_adherence < PerformanceComponent::ComplianceAdherence.max_points() {
        add(ImprovementArea::ComplianceTraining);
    }

    for violation in &signals.violations {
        if violation.mentions_any(LANGUAGE_TERMS) {
            add(ImprovementArea::LanguageUse);
        }
        if violation.mentions_any(THREAT_TERMS) || violation.mentions_any(AGGRESSION_TERMS) {
            add(ImprovementArea::ConflictResolution);
            add(ImprovementArea::EmotionalRegulation);
        }
        if violation.mentions_any(MISINFORMATION_TERMS) {
            add(ImprovementArea::ProductKnowledge);
        }
    }

    if matches!(outcome, CallOutcome::CustomerDissatisfied | CallOutcome::Dropped) {
        add(ImprovementArea::ConflictResolution);
    }
    if outcome == CallOutcome::Dropped {
        add(ImprovementArea::CallControl);
    }

    areas
}

fn recommendations(weaknesses: &[ImprovementArea], signals: &CallSignals) -> Vec<String> {
    let mut recommendations = Vec::new();

    if signals.has_prohibited_phrase() {
        recommendations.push(
            "CRITICAL: Immediate training on prohibited language and appropriate communication"
                .to_string(),
        );
        recommendations
            .push("CRITICAL: Review and sign-off on company communication guidelines".to_string());
    }
    if signals.has_critical_violation() {
        recommendations.push(
            "CRITICAL: Mandatory compliance retraining on policy violations committed".to_string(),
        );
    }

    recommendations.extend(weaknesses.iter().map(|w| w.recommendation().to_string()));

    if recommendations.is_empty() {
        recommendations
            .push("Continue current performance level with periodic refresher training".to_string());
    }
    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}

fn feedback(
    score: f64,
    strengths: &[String],
    weaknesses: &[ImprovementArea],
    signals: &CallSignals,
) -> String {
    let summary = match PerformanceLevel::from_score(score) {
        PerformanceLevel::Exceptional => {
            "Outstanding performance demonstrating exceptional customer service and compliance."
        }
        PerformanceLevel::Excellent => {
            "Excellent performance with strong customer service and professional conduct."
        }
        PerformanceLevel::Good => "Good performance overall with room for skill enhancement.",
        PerformanceLevel::Satisfactory => {
            "Satisfactory performance but requires focused improvement in key areas."
        }
        PerformanceLevel::NeedsImprovement => {
            "Performance needs significant improvement. Coaching required."
        }
        PerformanceLevel::Poor | PerformanceLevel::Unacceptable => {
            "Unacceptable performance. Immediate intervention and retraining necessary."
        }
    };

    let mut parts = vec![summary.to_string()];

    if !strengths.is_empty() {
        let top: Vec<&str> = strengths.iter().take(3).map(String::as_str).collect();
        parts.push(format!("Key strengths: {}", top.join(", ")));
    }

    if !weaknesses.is_empty() {
        let top: Vec<&str> = weaknesses.iter().take(3).map(|w| w.as_str()).collect();
        parts.push(format!("Focus areas for improvement: {}", top.join(", ")));
    }

    let critical = signals.count_severity(Severity::Critical);
    let high = signals.count_severity(Severity::High);
    if critical > 0 {
        parts.push(format!(
            "{critical} critical policy violation(s) require immediate corrective action."
        ));
    } else if high > 0 {
        parts.push(format!(
            "{high} high-severity violation(s) need to be addressed promptly."
        ));
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuditConfig;
    use crate::outcome::OutcomeClassifier;
    use crate::risk::RiskCalculator;
    use crate::types::{
        AgentConductRating, Arousal, ConversationSignal, EmotionalSignal, PolicyViolation,
        ProhibitedPhraseHit, Speaker, ThreatKind, ThreatSignal, Utterance,
    };
    use pretty_assertions::assert_eq;

    fn agent(text: &str) -> Utterance {
        Utterance {
            speaker: Speaker::Agent,
            text: text.to_string(),
            timestamp_sec: 0.0,
        }
    }

    fn customer(text: &str) -> Utterance {
        Utterance {
            speaker: Speaker::Customer,
            text: text.to_string(),
            timestamp_sec: 0.0,
        }
    }

    fn violation(severity: Severity, category: &str, evidence: &str) -> PolicyViolation {
        PolicyViolation {
            clause_id: None,
            severity,
            category: category.to_string(),
            evidence: evidence.to_string(),
            timestamp_sec: 0.0,
        }
    }

    fn run(signals: &CallSignals) -> PerformanceAssessment {
        let risk = RiskCalculator::assess(signals, &AuditConfig::default());
        let outcome = OutcomeClassifier::classify(signals, &risk);
        PerformanceCalculator::assess(signals, &risk, &outcome, &PerformanceBenchmarks::default())
    }

    fn exemplary_call() -> CallSignals {
        CallSignals {
            conversation: ConversationSignal {
                utterances: vec![
                    agent("Good morning, I understand the charge looks wrong and I am here to help you with it."),
                    customer("Yes, please."),
                    agent("I appreciate your patience while I assist you and reverse the duplicate payment."),
                    customer("Thank you, that's resolved."),
                ],
            },
            conduct: AgentConductRating {
                politeness: ConductLevel::Good,
                empathy: EmpathyLevel::High,
                professionalism: ConductLevel::Good,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_exemplary_call() {
        let assessment = run(&exemplary_call());

        assert_eq!(
            assessment.component_scores,
            ComponentScores {
                communication: 30.0,
                customer_service: 22.0,
                professionalism: 16.0,
                problem_resolution: 15.0,
                compliance_adherence: 10.0,
                penalties: 0.0,
            }
        );
        assert_eq!(assessment.overall_quality_score, 93.0);
        assert_eq!(assessment.performance_level, PerformanceLevel::Exceptional);
        assert_eq!(assessment.performance_category, "EXCEPTIONAL");
        assert_eq!(assessment.strengths.len(), 7);
        assert!(assessment.weaknesses.is_empty());
        assert_eq!(assessment.training_priority, TrainingPriority::None);
        assert_eq!(
            assessment.training_recommendations,
            vec!["Continue current performance level with periodic refresher training"]
        );
        assert!(assessment.commendation_worthy);
        assert!(!assessment.requires_coaching);
        assert!(!assessment.requires_disciplinary_action);
        assert_eq!(
            assessment.specific_feedback,
            "Outstanding performance demonstrating exceptional customer service and compliance. \
             Key strengths: Excellent communication clarity and articulation, \
             Strong politeness and courtesy, High empathy and customer understanding"
        );
    }

    #[test]
    fn test_communication_scoring() {
        let config = AuditConfig::default();
        let score_of = |signals: &CallSignals| {
            let risk = RiskCalculator::assess(signals, &config);
            let outcome = OutcomeClassifier::classify(signals, &risk);
            communication_points(&PerformanceContext {
                signals,
                outcome: &outcome,
            })
        };

        assert_eq!(score_of(&CallSignals::default()), 18.0);

        let short = CallSignals {
            conversation: ConversationSignal {
                utterances: vec![agent("Sorry about that.")],
            },
            ..Default::default()
        };
        assert_eq!(score_of(&short), 21.0);

        let hostile = CallSignals {
            emotions: vec![EmotionalSignal {
                tone: Tone::Threatening,
                intensity: 1.0,
                acoustic_arousal: Arousal::High,
            }],
            ..short.clone()
        };
        assert_eq!(score_of(&hostile), 11.0);
    }

    #[test]
    fn test_penalties_clamp_to_zero() {
        let signals = CallSignals {
            violations: vec![
                violation(Severity::Critical, "Threat", "Agent threatened arrest"),
                violation(Severity::Critical, "Harassment", "Repeated intimidation"),
                violation(Severity::High, "Language", "Abusive language"),
            ],
            threats: vec![ThreatSignal {
                kind: ThreatKind::Explicit,
                text: None,
            }],
            emotions: vec![EmotionalSignal {
                tone: Tone::Aggressive,
                intensity: 1.0,
                acoustic_arousal: Arousal::High,
            }],
            conduct: AgentConductRating {
                politeness: ConductLevel::Unacceptable,
                empathy: EmpathyLevel::None,
                professionalism: ConductLevel::Unacceptable,
            },
            time_violation: true,
            prohibited_hits: vec![
                ProhibitedPhraseHit {
                    phrase: "you will go to jail".to_string(),
                    timestamp_sec: 10.0,
                },
                ProhibitedPhraseHit {
                    phrase: "you are a criminal".to_string(),
                    timestamp_sec: 20.0,
                },
                ProhibitedPhraseHit {
                    phrase: "you are a fraud".to_string(),
                    timestamp_sec: 30.0,
                },
            ],
            ..Default::default()
        };
        let assessment = run(&signals);

        assert_eq!(assessment.component_scores.penalties, -80.0);
        assert_eq!(assessment.overall_quality_score, 0.0);
        assert_eq!(assessment.performance_level, PerformanceLevel::Unacceptable);
        assert_eq!(assessment.training_priority, TrainingPriority::Critical);
        assert!(assessment.requires_disciplinary_action);
        assert_eq!(assessment.training_recommendations.len(), 5);
        assert_eq!(
            &assessment.training_recommendations[..3],
            &[
                "CRITICAL: Immediate training on prohibited language and appropriate communication",
                "CRITICAL: Review and sign-off on company communication guidelines",
                "CRITICAL: Mandatory compliance retraining on policy violations committed",
            ]
        );
        assert!(assessment.weaknesses.contains(&ImprovementArea::LanguageUse));
        assert!(assessment.weaknesses.contains(&ImprovementArea::EmotionalRegulation));
        assert!(assessment
            .specific_feedback
            .ends_with("2 critical policy violation(s) require immediate corrective action."));
    }

    #[test]
    fn test_training_priority_override_beats_score() {
        let mut signals = exemplary_call();
        signals.prohibited_hits.push(ProhibitedPhraseHit {
            phrase: "we will tell your family".to_string(),
            timestamp_sec: 5.0,
        });
        let assessment = run(&signals);

        // 93 minus the phrase penalty and the lost compliance and resolution points.
        assert!(assessment.overall_quality_score >= 40.0);
        assert_eq!(assessment.training_priority, TrainingPriority::Critical);
        assert!(assessment.requires_disciplinary_action);
    }

    #[test]
    fn test_resolution_points_by_outcome() {
        let signals = CallSignals {
            violations: vec![violation(Severity::High, "Disclosure", "")],
            ..Default::default()
        };
        let risk = RiskCalculator::assess(&signals, &AuditConfig::default());
        let mut outcome = OutcomeClassifier::classify(&signals, &risk);
        let ctx_points = |outcome: &OutcomeClassification| {
            resolution_points(&PerformanceContext {
                signals: &signals,
                outcome,
            })
        };

        for (primary, expected) in [
            (CallOutcome::Resolved, 15.0),
            (CallOutcome::CustomerSatisfied, 15.0),
            (CallOutcome::Transferred, 10.0),
            (CallOutcome::Pending, 10.0),
            (CallOutcome::Escalated, 0.0),
            (CallOutcome::UnresolvedComplaint, 0.0),
            (CallOutcome::Dropped, 0.0),
            (CallOutcome::LegalDispute, 0.0),
            (CallOutcome::NoResolution, 6.0),
        ] {
            outcome.primary_outcome = primary;
            assert_eq!(ctx_points(&outcome), expected, "{primary:?}");
        }
    }

    #[test]
    fn test_dropped_call_weaknesses() {
        let signals = CallSignals {
            conversation: ConversationSignal {
                utterances: vec![
                    agent("Ok"),
                    customer("Forget it"),
                    agent("Hello? The customer hung up"),
                ],
            },
            violations: vec![violation(
                Severity::Low,
                "Misinformation",
                "Quoted the wrong product fee",
            )],
            ..Default::default()
        };
        let assessment = run(&signals);

        assert_eq!(
            assessment.weaknesses,
            vec![
                ImprovementArea::ProblemSolving,
                ImprovementArea::ComplianceTraining,
                ImprovementArea::ProductKnowledge,
                ImprovementArea::ConflictResolution,
                ImprovementArea::CallControl,
            ]
        );
        assert_eq!(
            assessment.training_recommendations,
            vec![
                "Problem-solving and resolution skills workshop",
                "Compliance and regulatory adherence certification course",
                "Product/service knowledge enhancement sessions",
                "Conflict de-escalation and resolution techniques",
                "Call management and control strategies workshop",
            ]
        );
    }

    #[test]
    fn test_score_always_in_range() {
        for politeness in [ConductLevel::Unacceptable, ConductLevel::Fair, ConductLevel::Excellent] {
            for empathy in [EmpathyLevel::None, EmpathyLevel::High] {
                let signals = CallSignals {
                    conduct: AgentConductRating {
                        politeness,
                        empathy,
                        professionalism: politeness,
                    },
                    time_violation: true,
                    ..exemplary_call()
                };
                let score = run(&signals).overall_quality_score;
                assert!((0.0..=100.0).contains(&score));
            }
        }
    }

    #[test]
    fn test_benchmark_comparison_for_exemplary_call() {
        let assessment = run(&exemplary_call());
        let benchmark = &assessment.benchmark;
        assert_eq!(benchmark.agent_score, assessment.overall_quality_score);
        assert_eq!(benchmark.vs_team_average, 18.0);
        assert_eq!(benchmark.vs_company_benchmark, 13.0);
        assert_eq!(benchmark.percentile_vs_team, PercentileBand::Top25);
        assert!(benchmark.meets_company_standard);
        assert_eq!(benchmark.performance_tier, PerformanceTier::ElitePerformer);
    }

    #[test]
    fn test_benchmark_band_edges() {
        let benchmarks = PerformanceBenchmarks::default();
        let compare = |score| PerformanceCalculator::compare_to_benchmark(score, &benchmarks);

        let percentiles: Vec<PercentileBand> = [95.0, 94.9, 85.0, 84.9, 75.0, 74.9, 65.0, 64.9]
            .into_iter()
            .map(|score| compare(score).percentile_vs_team)
            .collect();
        assert_eq!(
            percentiles,
            vec![
                PercentileBand::Top10,
                PercentileBand::Top25,
                PercentileBand::Top25,
                PercentileBand::AboveAverage,
                PercentileBand::AboveAverage,
                PercentileBand::BelowAverage,
                PercentileBand::BelowAverage,
                PercentileBand::Bottom25,
            ]
        );

        let tiers: Vec<PerformanceTier> = [90.0, 89.9, 80.0, 79.9, 70.0, 69.9]
            .into_iter()
            .map(|score| compare(score).performance_tier)
            .collect();
        assert_eq!(
            tiers,
            vec![
                PerformanceTier::ElitePerformer,
                PerformanceTier::MeetsStandard,
                PerformanceTier::MeetsStandard,
                PerformanceTier::ApproachingStandard,
                PerformanceTier::ApproachingStandard,
                PerformanceTier::BelowStandard,
            ]
        );

        assert!(compare(80.0).meets_company_standard);
        assert!(!compare(79.9).meets_company_standard);
        assert_eq!(compare(79.9).vs_company_benchmark, -0.1);
        assert_eq!(compare(64.9).vs_team_average, -10.1);
    }

    #[test]
    fn test_benchmark_follows_configured_values() {
        let benchmarks = PerformanceBenchmarks {
            team_average: 60.0,
            company_benchmark: 70.0,
        };
        let comparison = PerformanceCalculator::compare_to_benchmark(72.5, &benchmarks);
        assert_eq!(comparison.team_average, 60.0);
        assert_eq!(comparison.vs_team_average, 12.5);
        assert_eq!(comparison.vs_company_benchmark, 2.5);
        assert_eq!(comparison.percentile_vs_team, PercentileBand::Top25);
        assert!(comparison.meets_company_standard);
        assert_eq!(comparison.performance_tier, PerformanceTier::MeetsStandard);
        assert_eq!(comparison.performance_tier.as_str(), "Meets Standard");
    }
}
