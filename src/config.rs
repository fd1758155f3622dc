//! Engine configuration.
//!
//! Everything here is static: built once, then shared read-only with the
//! engine. The knowledge base itself is configured separately (see
//! [`crate::knowledge::KnowledgeBase::from_json`]).

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How readings outside an input variable's universe are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputRange {
    /// Clamp the reading into `[lo, hi]` before fuzzification, so a reading
    /// below the floor gets the floor shoulder term's full degree.
    #[default]
    ClipToUniverse,

    /// Hand the raw reading to the membership functions. Anything outside
    /// every term's support fuzzifies to all zeros.
    Unbounded,
}

/// Inference engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Out-of-universe reading policy.
    pub input_range: InputRange,
}

impl EngineConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Malformed` on invalid JSON or unknown values.
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(|e| ConfigError::Malformed {
            reason: format!("engine config: {e}"),
        })
    }
}
