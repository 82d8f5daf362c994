//! Audit configuration
//!
//! Configuration is an immutable value handed to every audit call. It is
//! validated once, when an [`AuditProcessor`](crate::pipeline::AuditProcessor)
//! is built or when [`AuditConfig::from_json`] parses it; scoring itself never
//! re-checks or clamps configuration values.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::{ComputeError, ConfigError};
use crate::types::RiskComponent;

/// Default critical threshold on the 0-100 risk scale
pub const DEFAULT_CRITICAL_THRESHOLD: f64 = 80.0;

/// Phrases agents must never use (debt-collection defaults)
pub const DEFAULT_PROHIBITED_PHRASES: &[&str] = &[
    "you will go to jail",
    "we will send someone to your house",
    "we will tell your family",
    "we will tell your employer",
    "you are a criminal",
    "you are a fraud",
];

/// Complete audit configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Per-component multipliers applied before each component's cap
    #[serde(default)]
    pub weights: RiskWeights,

    /// Total score at or above which a call needs immediate action
    #[serde(default = "default_critical_threshold")]
    pub critical_threshold: f64,

    /// Auto-escalate calls whose total reaches the critical threshold
    #[serde(default = "default_true")]
    pub auto_escalate_on_critical: bool,

    /// Exact phrases that force critical handling when an agent says them
    #[serde(default = "default_prohibited_phrases")]
    pub prohibited_phrases: Vec<String>,

    /// Permitted calling window; `None` disables the timestamp check
    #[serde(default = "default_call_hours")]
    pub allowed_call_hours: Option<CallHours>,

    /// Reference scores the agent's quality score is compared against
    #[serde(default)]
    pub benchmarks: PerformanceBenchmarks,
}

fn default_critical_threshold() -> f64 {
    DEFAULT_CRITICAL_THRESHOLD
}

fn default_true() -> bool {
    true
}

fn default_prohibited_phrases() -> Vec<String> {
    DEFAULT_PROHIBITED_PHRASES
        .iter()
        .map(|p| p.to_string())
        .collect()
}

fn default_call_hours() -> Option<CallHours> {
    Some(CallHours::default())
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            weights: RiskWeights::default(),
            critical_threshold: default_critical_threshold(),
            auto_escalate_on_critical: true,
            prohibited_phrases: default_prohibited_phrases(),
            allowed_call_hours: default_call_hours(),
            benchmarks: PerformanceBenchmarks::default(),
        }
    }
}

impl AuditConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, ComputeError> {
        let config: AuditConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject out-of-range thresholds, weights and call hours.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.critical_threshold.is_finite()
            || !(0.0..=100.0).contains(&self.critical_threshold)
        {
            return Err(ConfigError::invalid(
                "critical_threshold",
                format!("must be within [0, 100], got {}", self.critical_threshold),
            ));
        }

        self.weights.validate()?;

        if let Some(index) = self
            .prohibited_phrases
            .iter()
            .position(|p| p.trim().is_empty())
        {
            return Err(ConfigError::invalid(
                "prohibited_phrases",
                format!("entry {index} is blank"),
            ));
        }

        if let Some(hours) = &self.allowed_call_hours {
            hours.validate()?;
        }

        self.benchmarks.validate()?;

        Ok(())
    }
}

/// Team and company reference scores on the 0-100 quality scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceBenchmarks {
    #[serde(default = "default_team_average")]
    pub team_average: f64,
    #[serde(default = "default_company_benchmark")]
    pub company_benchmark: f64,
}

fn default_team_average() -> f64 {
    75.0
}

fn default_company_benchmark() -> f64 {
    80.0
}

impl Default for PerformanceBenchmarks {
    fn default() -> Self {
        Self {
            team_average: default_team_average(),
            company_benchmark: default_company_benchmark(),
        }
    }
}

impl PerformanceBenchmarks {
    fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("benchmarks.team_average", self.team_average),
            ("benchmarks.company_benchmark", self.company_benchmark),
        ] {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::invalid(
                    field,
                    format!("must be within [0, 100], got {value}"),
                ));
            }
        }
        Ok(())
    }
}

/// Advisory weights, one multiplier per risk component
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskWeights {
    #[serde(default = "unit_weight")]
    pub policy_violations: f64,
    #[serde(default = "unit_weight")]
    pub emotional_intensity: f64,
    #[serde(default = "unit_weight")]
    pub threat_level: f64,
    #[serde(default = "unit_weight")]
    pub agent_conduct: f64,
    #[serde(default = "unit_weight")]
    pub time_violation: f64,
    #[serde(default = "unit_weight")]
    pub prohibited_phrases: f64,
}

fn unit_weight() -> f64 {
    1.0
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            policy_violations: 1.0,
            emotional_intensity: 1.0,
            threat_level: 1.0,
            agent_conduct: 1.0,
            time_violation: 1.0,
            prohibited_phrases: 1.0,
        }
    }
}

impl RiskWeights {
    /// Multiplier for a component
    pub fn for_component(&self, component: RiskComponent) -> f64 {
        match component {
            RiskComponent::PolicyViolations => self.policy_violations,
            RiskComponent::EmotionalIntensity => self.emotional_intensity,
            RiskComponent::ThreatLevel => self.threat_level,
            RiskComponent::AgentConduct => self.agent_conduct,
            RiskComponent::TimeViolation => self.time_violation,
            RiskComponent::ProhibitedPhrases => self.prohibited_phrases,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for component in RiskComponent::ALL {
            let weight = self.for_component(component);
            if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
                return Err(ConfigError::invalid(
                    &format!("weights.{}", component.as_str()),
                    format!("must be within [0, 1], got {weight}"),
                ));
            }
        }
        Ok(())
    }
}

/// Permitted calling hours in a fixed UTC offset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallHours {
    /// Window start, "HH:MM"
    pub start: String,
    /// Window end, "HH:MM" (exclusive)
    pub end: String,
    /// Offset of the local clock from UTC, in minutes
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

impl Default for CallHours {
    fn default() -> Self {
        Self {
            start: "08:00".to_string(),
            end: "19:00".to_string(),
            // Asia/Kolkata
            utc_offset_minutes: 330,
        }
    }
}

impl CallHours {
    /// Parsed (start, end) bounds
    pub fn bounds(&self) -> Result<(NaiveTime, NaiveTime), ConfigError> {
        let start = parse_clock("allowed_call_hours.start", &self.start)?;
        let end = parse_clock("allowed_call_hours.end", &self.end)?;
        Ok((start, end))
    }

    /// Whether a local wall-clock time falls inside the window.
    pub fn permits(&self, local: NaiveTime) -> bool {
        match self.bounds() {
            Ok((start, end)) => local >= start && local < end,
            // Unreachable for validated configs.
            Err(_) => true,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let (start, end) = self.bounds()?;
        if start >= end {
            return Err(ConfigError::invalid(
                "allowed_call_hours",
                format!("start {} must precede end {}", self.start, self.end),
            ));
        }
        if self.utc_offset_minutes.abs() > 14 * 60 {
            return Err(ConfigError::invalid(
                "allowed_call_hours.utc_offset_minutes",
                format!("must be within ±840, got {}", self.utc_offset_minutes),
            ));
        }
        Ok(())
    }
}

fn parse_clock(field: &str, value: &str) -> Result<NaiveTime, ConfigError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|e| ConfigError::invalid(field, format!("expected HH:MM, got {value:?} ({e})")))
}
