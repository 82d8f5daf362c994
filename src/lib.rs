//! Call Audit - Deterministic analytics core for call-center compliance audits
//!
//! Call Audit turns the finalized upstream signals of one recorded call into a
//! single audit record through a pure pipeline: normalization → risk scoring →
//! outcome classification → agent performance scoring → record encoding.
//!
//! The same bundle and configuration always produce the same bytes. Nothing in
//! the pipeline reads the clock, draws random numbers or performs I/O.
//!
//! ## Modules
//!
//! - **Normalizer**: Map raw upstream values onto canonical signal vocabularies
//! - **Risk**: Weighted, capped 0-100 risk score with deterministic overrides
//! - **Outcome**: Ordered rule cascade deciding how the call concluded
//! - **Performance**: Agent quality score, weaknesses and training priority
//! - **Encoder**: Merge everything into one `CallAuditRecord`

pub mod config;
pub mod encoder;
pub mod error;
pub mod keywords;
pub mod normalizer;
pub mod outcome;
pub mod performance;
pub mod pipeline;
pub mod risk;
pub mod schema;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use config::{AuditConfig, CallHours, PerformanceBenchmarks, RiskWeights};
pub use encoder::AuditEncoder;
pub use error::{ComputeError, ConfigError};
pub use normalizer::Normalizer;
pub use outcome::OutcomeClassifier;
pub use performance::PerformanceCalculator;
pub use pipeline::{audit_call, AuditProcessor};
pub use risk::RiskCalculator;

// Schema exports
pub use schema::{RawCallBundle, ValidationError, SCHEMA_VERSION};

pub use types::CallAuditRecord;

/// Audit version embedded in every record
pub const AUDIT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for audit records
pub const PRODUCER_NAME: &str = "call-audit";
