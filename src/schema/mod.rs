//! call.signal_bundle.v1 schema
//!
//! This module defines the raw input shape handed over by the upstream
//! collaborators (violation detector, emotion model, diarizer, conduct rater).
//! Enum-like values are plain strings, most fields are optional and values of
//! the wrong JSON type are kept aside rather than rejected, so unfamiliar
//! upstream output still deserializes and the normalizer can recover it.

mod raw_bundle;

pub use raw_bundle::*;
