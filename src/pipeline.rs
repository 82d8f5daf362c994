//! Pipeline orchestration
//!
//! This module provides the public API for call auditing.
//! It runs the full pipeline from a raw signal bundle to an audit record.

use crate::config::AuditConfig;
use crate::encoder::AuditEncoder;
use crate::error::ComputeError;
use crate::normalizer::Normalizer;
use crate::outcome::OutcomeClassifier;
use crate::performance::PerformanceCalculator;
use crate::risk::RiskCalculator;
use crate::schema::RawCallBundle;
use crate::types::{CallAuditRecord, CallSignals};

/// Audit one call from its raw signal bundle JSON.
///
/// # Arguments
/// * `bundle_json` - A `call.signal_bundle.v1` document
/// * `config` - Audit configuration; validated before use
///
/// # Returns
/// The audit record as pretty JSON
///
/// # Example
/// ```ignore
/// let record_json = audit_call(bundle_json, &AuditConfig::default())?;
/// ```
pub fn audit_call(bundle_json: &str, config: &AuditConfig) -> Result<String, ComputeError> {
    AuditProcessor::new(config.clone())?.process(bundle_json)
}

/// Reusable processor holding a validated configuration.
///
/// Holds no mutable state, so one processor can serve any number of threads.
#[derive(Debug, Clone)]
pub struct AuditProcessor {
    config: AuditConfig,
    encoder: AuditEncoder,
}

impl AuditProcessor {
    /// Create a processor, rejecting invalid configuration up front
    pub fn new(config: AuditConfig) -> Result<Self, ComputeError> {
        config.validate()?;
        Ok(Self {
            config,
            encoder: AuditEncoder::new(),
        })
    }

    /// Create a processor with the default configuration
    pub fn with_defaults() -> Self {
        Self {
            config: AuditConfig::default(),
            encoder: AuditEncoder::new(),
        }
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Audit one bundle given as JSON and return the record as pretty JSON
    pub fn process(&self, bundle_json: &str) -> Result<String, ComputeError> {
        let record = self.process_record(bundle_json)?;
        serde_json::to_string_pretty(&record).map_err(ComputeError::JsonError)
    }

    /// Audit one bundle given as JSON
    pub fn process_record(&self, bundle_json: &str) -> Result<CallAuditRecord, ComputeError> {
        if bundle_json.trim().is_empty() {
            return Err(ComputeError::InvalidInput(
                "empty signal bundle".to_string(),
            ));
        }
        let bundle = RawCallBundle::from_json(bundle_json)
            .map_err(|e| ComputeError::ParseError(e.to_string()))?;
        self.assess(&bundle)
    }

    /// Audit one parsed bundle.
    ///
    /// Pipeline stages:
    /// 1. Normalizer - Map raw values onto canonical signals
    /// 2. RiskCalculator - Score risk and apply overrides
    /// 3. OutcomeClassifier - Run the outcome cascade
    /// 4. PerformanceCalculator - Score the agent
    /// 5. AuditEncoder - Merge into one record
    pub fn assess(&self, bundle: &RawCallBundle) -> Result<CallAuditRecord, ComputeError> {
        let signals = Normalizer::normalize(bundle, &self.config)?;
        self.assess_signals(&signals)
    }

    /// Audit already-normalized signals
    pub fn assess_signals(&self, signals: &CallSignals) -> Result<CallAuditRecord, ComputeError> {
        let risk = RiskCalculator::assess(signals, &self.config);
        let outcome = OutcomeClassifier::classify(signals, &risk);
        let performance =
            PerformanceCalculator::assess(signals, &risk, &outcome, &self.config.benchmarks);
        self.encoder.encode(signals, risk, outcome, performance)
    }
}
