//! Audit record encoding
//!
//! This module merges the risk, outcome and performance assessments into one
//! call audit record and serializes it. Records carry no wall-clock time and
//! no random identifiers, so the same signals always encode to the same bytes.

use uuid::Uuid;

use crate::error::ComputeError;
use crate::types::{
    AuditProducer, AuditQuality, CallAuditRecord, CallSignals, OutcomeClassification,
    PerformanceAssessment, RiskAssessment, SignalCounts,
};
use crate::{AUDIT_VERSION, PRODUCER_NAME};

/// Namespace for name-based audit ids
pub const AUDIT_NAMESPACE: Uuid = Uuid::from_u128(0x6c1f_2a7e_93b4_4d0a_8e55_0f3c_2b91_d7a4);

/// Encoder for audit records
#[derive(Debug, Clone)]
pub struct AuditEncoder {
    namespace: Uuid,
}

impl Default for AuditEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditEncoder {
    /// Create an encoder using the crate namespace for audit ids
    pub fn new() -> Self {
        Self {
            namespace: AUDIT_NAMESPACE,
        }
    }

    /// Create an encoder with a caller-owned id namespace
    pub fn with_namespace(namespace: Uuid) -> Self {
        Self { namespace }
    }

    /// Assemble the audit record for one call
    pub fn encode(
        &self,
        signals: &CallSignals,
        risk: RiskAssessment,
        outcome: OutcomeClassification,
        performance: PerformanceAssessment,
    ) -> Result<CallAuditRecord, ComputeError> {
        Ok(CallAuditRecord {
            audit_version: AUDIT_VERSION.to_string(),
            producer: AuditProducer {
                name: PRODUCER_NAME.to_string(),
                version: AUDIT_VERSION.to_string(),
            },
            audit_id: self.audit_id(signals)?,
            call_id: signals.call_id.clone(),
            risk_assessment: risk,
            outcome_classification: outcome,
            performance_assessment: performance,
            quality: build_quality(signals),
        })
    }

    /// Encode to a pretty JSON string
    pub fn encode_to_json(
        &self,
        signals: &CallSignals,
        risk: RiskAssessment,
        outcome: OutcomeClassification,
        performance: PerformanceAssessment,
    ) -> Result<String, ComputeError> {
        let record = self.encode(signals, risk, outcome, performance)?;
        serde_json::to_string_pretty(&record).map_err(ComputeError::JsonError)
    }

    /// UUID v5 of the call id, or of the canonical signals when there is none
    pub fn audit_id(&self, signals: &CallSignals) -> Result<String, ComputeError> {
        let name = match &signals.call_id {
            Some(call_id) => format!("call:{call_id}"),
            None => {
                let canonical = serde_json::to_string(signals)
                    .map_err(|e| ComputeError::EncodingError(e.to_string()))?;
                format!("signals:{canonical}")
            }
        };
        Ok(Uuid::new_v5(&self.namespace, name.as_bytes()).to_string())
    }
}

fn build_quality(signals: &CallSignals) -> AuditQuality {
    AuditQuality {
        anomalies: signals
            .anomalies
            .iter()
            .map(|a| a.as_str().to_string())
            .collect(),
        signal_counts: SignalCounts {
            violations: signals.violations.len(),
            threats: signals.threats.len(),
            emotion_windows: signals.emotions.len(),
            utterances: signals.conversation.utterances.len(),
            prohibited_phrase_hits: signals.prohibited_hits.len(),
        },
        degraded: !signals.anomalies.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuditConfig;
    use crate::outcome::OutcomeClassifier;
    use crate::performance::PerformanceCalculator;
    use crate::risk::RiskCalculator;
    use crate::types::{InputAnomaly, PolicyViolation, Severity};

    fn encode_with(encoder: &AuditEncoder, signals: &CallSignals) -> CallAuditRecord {
        let risk = RiskCalculator::assess(signals, &AuditConfig::default());
        let outcome = OutcomeClassifier::classify(signals, &risk);
        let performance = PerformanceCalculator::assess(signals, &risk, &outcome, &Default::default());
        encoder.encode(signals, risk, outcome, performance).unwrap()
    }

    fn make_test_signals() -> CallSignals {
        CallSignals {
            call_id: Some("call-2024-0001".to_string()),
            violations: vec![PolicyViolation {
                clause_id: Some("FDCPA-806".to_string()),
                severity: Severity::Medium,
                category: "Disclosure".to_string(),
                evidence: "Did not state the purpose of the call".to_string(),
                timestamp_sec: 14.0,
            }],
            anomalies: vec![InputAnomaly::UnknownTone],
            ..Default::default()
        }
    }

    #[test]
    fn test_encode_audit_record() {
        let signals = make_test_signals();
        let record = encode_with(&AuditEncoder::new(), &signals);

        assert_eq!(record.audit_version, AUDIT_VERSION);
        assert_eq!(record.producer.name, PRODUCER_NAME);
        assert_eq!(record.call_id.as_deref(), Some("call-2024-0001"));
        assert_eq!(record.risk_assessment.total_score, 10.0);
        assert_eq!(record.quality.signal_counts.violations, 1);
        assert_eq!(record.quality.anomalies, vec!["unknown_tone"]);
        assert!(record.quality.degraded);
    }

    #[test]
    fn test_audit_id_is_name_based() {
        let encoder = AuditEncoder::new();
        let signals = make_test_signals();
        let first = encoder.audit_id(&signals).unwrap();
        let second = encoder.audit_id(&signals).unwrap();
        assert_eq!(first, second);

        let parsed = Uuid::parse_str(&first).unwrap();
        assert_eq!(parsed.get_version_num(), 5);

        let other = AuditEncoder::with_namespace(Uuid::from_u128(7));
        assert_ne!(other.audit_id(&signals).unwrap(), first);

        // Without a call id the id follows the content.
        let mut anonymous = signals.clone();
        anonymous.call_id = None;
        let anon_id = encoder.audit_id(&anonymous).unwrap();
        anonymous.time_violation = true;
        assert_ne!(encoder.audit_id(&anonymous).unwrap(), anon_id);
    }

    #[test]
    fn test_encode_to_json() {
        let encoder = AuditEncoder::new();
        let signals = make_test_signals();
        let risk = RiskCalculator::assess(&signals, &AuditConfig::default());
        let outcome = OutcomeClassifier::classify(&signals, &risk);
        let performance = PerformanceCalculator::assess(&signals, &risk, &outcome, &Default::default());
        let json = encoder
            .encode_to_json(&signals, risk, outcome, performance)
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["risk_assessment"]["risk_level"], "minimal");
        assert_eq!(value["risk_assessment"]["risk_category"], "MINIMAL");
        assert_eq!(value["outcome_classification"]["primary_outcome"], "No Resolution");
        assert_eq!(
            value["outcome_classification"]["customer_satisfaction_indicator"],
            "neutral"
        );
        assert!(value["performance_assessment"]["overall_quality_score"].is_number());
        assert_eq!(
            value["risk_assessment"]["breakdown"]
                .as_object()
                .unwrap()
                .len(),
            6
        );
    }
}
