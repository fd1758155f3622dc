//! # agrofuzz - Explainable fuzzy plant disease diagnosis
//!
//! agrofuzz scores plant disease risk from environmental and plant readings
//! with Mamdani fuzzy inference, and reports which rules fired and how
//! strongly so every score can be explained.
//!
//! ## Core Concepts
//!
//! - **Triangular**: a triangular membership function `(a, b, c)`
//! - **LinguisticVariable**: a named universe of discourse with overlapping terms
//! - **Rule**: `IF v1 is t1 AND ... THEN output is term`, evaluated with min-AND
//! - **KnowledgeBase**: validated, immutable variables and rules
//! - **InferenceEngine**: fuzzify, fire, aggregate (max), defuzzify (centroid), trace
//! - **Diagnosis**: per-output score, risk level and fired-rule trace
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::collections::HashMap;
//! use agrofuzz::{plant, InferenceEngine};
//!
//! let engine = InferenceEngine::new(plant::knowledge_base()?);
//! let readings: HashMap<String, f64> = [
//!     ("Temp", 25.0), ("RH", 60.0), ("Rain", 150.0), ("LeafWet", 20.0),
//!     ("SoilM", 50.0), ("Drain", 5.0), ("SeedHealth", 5.0), ("Vector", 3.0),
//!     ("Stage", 3.0),
//! ]
//! .into_iter()
//! .map(|(k, v)| (k.to_string(), v))
//! .collect();
//!
//! let diagnosis = engine.infer(&readings)?;
//! let top = diagnosis.primary().unwrap();
//! println!("{}: {:.3} ({})", top.output, top.score, top.risk);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Fuzzy primitives
pub mod membership;
pub mod rule;
pub mod variable;

// Knowledge and inference
pub mod config;
pub mod diagnosis;
pub mod engine;
pub mod error;
pub mod knowledge;

// Built-in chilli crop knowledge base
pub mod plant;

// Re-export primary types at crate root for convenience
pub use config::{EngineConfig, InputRange};
pub use diagnosis::{Diagnosis, FiredRule, OutputScore};
pub use engine::runtime::{DiagnosisHandle, DiagnosisRuntime, RuntimeConfig};
pub use engine::{centroid, fuzzy_and, FuzzifiedInput, InferenceEngine, Readings, ACTIVATION_THRESHOLD};
pub use error::{AgroError, AgroResult, ConfigError, InferenceError};
pub use knowledge::KnowledgeBase;
pub use membership::Triangular;
pub use rule::{classify, Clause, RiskLevel, Rule, RuleBuilder, RuleId};
pub use variable::{LinguisticVariable, Term, Universe};
