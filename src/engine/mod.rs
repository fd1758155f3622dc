//! Mamdani inference engine.
//!
//! One inference pass is a pure pipeline over per-call buffers:
//!
//! 1. fuzzify every reading against its input variable,
//! 2. fire every rule (fuzzy AND = min over its clauses),
//! 3. per output, clip each rule's consequent at its firing strength and
//!    take the pointwise max across the output's rules,
//! 4. defuzzify the aggregated set by discrete centroid,
//! 5. trace the rules that fired above [`ACTIVATION_THRESHOLD`].
//!
//! The engine holds only the immutable knowledge base and configuration, so a
//! single instance can serve any number of threads.

/// Bounded worker runtime for running diagnoses off the caller's thread.
pub mod runtime;

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, trace};

use crate::config::{EngineConfig, InputRange};
use crate::diagnosis::{Diagnosis, FiredRule, OutputScore};
use crate::error::{AgroResult, InferenceError};
use crate::knowledge::KnowledgeBase;
use crate::rule::{RiskLevel, RuleId};
use crate::variable::Universe;

/// Rules must fire strictly above this strength to appear in a trace.
pub const ACTIVATION_THRESHOLD: f64 = 0.01;

/// Crisp readings keyed by input variable name.
pub type Readings = HashMap<String, f64>;

/// Degrees of one input reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuzzifiedInput {
    /// Input variable name.
    pub variable: String,
    /// Reading as supplied.
    pub reading: f64,
    /// Value handed to the membership functions after the range policy.
    pub value: f64,
    /// Degree per term, in declaration order.
    pub degrees: Vec<(String, f64)>,
}

/// Fuzzy AND over clause degrees: the minimum.
///
/// An empty antecedent never reaches here; knowledge base validation rejects it.
#[must_use]
pub fn fuzzy_and<I>(degrees: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    degrees.into_iter().fold(1.0, f64::min)
}

/// Discrete centroid `Σ x·μ(x) / Σ μ(x)` over the universe points.
///
/// `set[i]` is the degree at `universe.point(i)`. An identically zero set has
/// no centroid and yields exactly `0.0`.
#[must_use]
pub fn centroid(universe: &Universe, set: &[f64]) -> f64 {
    let mut weighted = 0.0;
    let mut total = 0.0;
    for (i, &mu) in set.iter().enumerate() {
        weighted += universe.point(i) * mu;
        total += mu;
    }
    if total > 0.0 {
        weighted / total
    } else {
        0.0
    }
}

/// Mamdani fuzzy inference engine over a shared knowledge base.
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    kb: Arc<KnowledgeBase>,
    config: EngineConfig,
}

impl InferenceEngine {
    /// Creates an engine with the default configuration.
    #[must_use]
    pub fn new(kb: impl Into<Arc<KnowledgeBase>>) -> Self {
        Self::with_config(kb, EngineConfig::default())
    }

    /// Creates an engine with an explicit configuration.
    #[must_use]
    pub fn with_config(kb: impl Into<Arc<KnowledgeBase>>, config: EngineConfig) -> Self {
        Self {
            kb: kb.into(),
            config,
        }
    }

    /// The knowledge base this engine evaluates.
    #[must_use]
    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    /// The engine configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs a full inference pass.
    ///
    /// Every declared input must be present with a finite value. Outputs
    /// whose rules all fire at zero score exactly `0.0` with an empty trace;
    /// that is a result, not an error.
    ///
    /// # Errors
    ///
    /// Returns `InferenceError::MissingInput`, `UnknownInput` or
    /// `NonFiniteInput` naming the offending variable.
    pub fn infer(&self, readings: &Readings) -> AgroResult<Diagnosis> {
        let degrees = self.degrees(readings)?;
        let strengths = self.strengths(&degrees);

        let outputs = self
            .kb
            .outputs()
            .iter()
            .enumerate()
            .map(|(o, var)| {
                let set = self.aggregate(o, &strengths);
                let score = centroid(var.universe(), &set);
                let fired = self.trace(o, &strengths);
                if fired.is_empty() && score == 0.0 {
                    debug!(output = var.name(), "no rule fired; score defaults to 0.0");
                }
                OutputScore {
                    output: var.name().to_string(),
                    score,
                    risk: RiskLevel::classify(score),
                    fired,
                }
            })
            .collect();

        Ok(Diagnosis {
            knowledge_base: self.kb.fingerprint().to_string(),
            outputs,
        })
    }

    /// Fuzzifies every reading, after applying the input range policy.
    ///
    /// # Errors
    ///
    /// Same input contract as [`InferenceEngine::infer`].
    pub fn fuzzify(&self, readings: &Readings) -> AgroResult<Vec<FuzzifiedInput>> {
        self.check_readings(readings)?;
        Ok(self
            .kb
            .inputs()
            .iter()
            .map(|var| {
                let reading = readings[var.name()];
                let value = self.effective_value(var.universe(), var.name(), reading);
                FuzzifiedInput {
                    variable: var.name().to_string(),
                    reading,
                    value,
                    degrees: var
                        .fuzzify(value)
                        .into_iter()
                        .map(|(term, d)| (term.to_string(), d))
                        .collect(),
                }
            })
            .collect())
    }

    /// Firing strength of every rule, in rule order, including rules that
    /// did not fire.
    ///
    /// # Errors
    ///
    /// Same input contract as [`InferenceEngine::infer`].
    pub fn firing_strengths(&self, readings: &Readings) -> AgroResult<Vec<(RuleId, f64)>> {
        let degrees = self.degrees(readings)?;
        let strengths = self.strengths(&degrees);
        Ok(self
            .kb
            .compiled()
            .iter()
            .map(|c| (self.kb.rules()[c.rule].id(), strengths[c.rule]))
            .collect())
    }

    /// The aggregated fuzzy set of one output as `(x, μ(x))` pairs.
    ///
    /// # Errors
    ///
    /// Same input contract as [`InferenceEngine::infer`], plus
    /// `InferenceError::UnknownOutput`.
    pub fn aggregated_set(&self, readings: &Readings, output: &str) -> AgroResult<Vec<(f64, f64)>> {
        let o = self
            .kb
            .output_index(output)
            .ok_or_else(|| InferenceError::UnknownOutput {
                variable: output.to_string(),
            })?;
        let degrees = self.degrees(readings)?;
        let strengths = self.strengths(&degrees);
        let universe = self.kb.outputs()[o].universe();
        Ok(self
            .aggregate(o, &strengths)
            .into_iter()
            .enumerate()
            .map(|(i, mu)| (universe.point(i), mu))
            .collect())
    }

    fn check_readings(&self, readings: &Readings) -> Result<(), InferenceError> {
        for var in self.kb.inputs() {
            let Some(&value) = readings.get(var.name()) else {
                return Err(InferenceError::MissingInput {
                    variable: var.name().to_string(),
                });
            };
            if !value.is_finite() {
                return Err(InferenceError::NonFiniteInput {
                    variable: var.name().to_string(),
                    value,
                });
            }
        }

        // Report the alphabetically first stray key so errors are reproducible.
        if let Some(unknown) = readings
            .keys()
            .filter(|name| self.kb.input(name).is_none())
            .min()
        {
            return Err(InferenceError::UnknownInput {
                variable: unknown.clone(),
            });
        }
        Ok(())
    }

    fn effective_value(&self, universe: &Universe, name: &str, reading: f64) -> f64 {
        match self.config.input_range {
            InputRange::Unbounded => reading,
            InputRange::ClipToUniverse => {
                if universe.contains(reading) {
                    reading
                } else {
                    let clipped = universe.clamp(reading);
                    debug!(variable = name, reading, clipped, "reading clipped to universe");
                    clipped
                }
            }
        }
    }

    /// Degrees indexed `[input][term]`.
    fn degrees(&self, readings: &Readings) -> Result<Vec<Vec<f64>>, InferenceError> {
        self.check_readings(readings)?;
        Ok(self
            .kb
            .inputs()
            .iter()
            .map(|var| {
                let value = self.effective_value(var.universe(), var.name(), readings[var.name()]);
                var.degrees(value)
            })
            .collect())
    }

    /// Firing strength per rule, indexed like the rule list.
    fn strengths(&self, degrees: &[Vec<f64>]) -> Vec<f64> {
        let mut strengths = vec![0.0; self.kb.rules().len()];
        for compiled in self.kb.compiled() {
            let strength = fuzzy_and(compiled.clauses.iter().map(|&(var, term)| degrees[var][term]));
            trace!(rule = %self.kb.rules()[compiled.rule].id(), strength, "rule fired");
            strengths[compiled.rule] = strength;
        }
        strengths
    }

    /// Pointwise max of every clipped consequent of one output.
    fn aggregate(&self, output: usize, strengths: &[f64]) -> Vec<f64> {
        let var = &self.kb.outputs()[output];
        let universe = var.universe();
        let mut set: Vec<f64> = vec![0.0; universe.len()];
        for compiled in self.kb.compiled_for(output) {
            let strength = strengths[compiled.rule];
            if strength <= 0.0 {
                continue;
            }
            let mf = &var.terms()[compiled.consequent].mf;
            for (i, mu) in set.iter_mut().enumerate() {
                let clipped = strength.min(mf.degree(universe.point(i)));
                *mu = mu.max(clipped);
            }
        }
        set
    }

    /// Fired rules of one output, strongest first, ties in rule order.
    fn trace(&self, output: usize, strengths: &[f64]) -> Vec<FiredRule> {
        let mut fired: Vec<FiredRule> = self
            .kb
            .compiled_for(output)
            .filter(|c| strengths[c.rule] > ACTIVATION_THRESHOLD)
            .map(|c| {
                let rule = &self.kb.rules()[c.rule];
                FiredRule {
                    rule_id: rule.id(),
                    strength: strengths[c.rule],
                    clauses: rule.antecedent().to_vec(),
                    risk_label: rule.label().to_string(),
                    description: rule.description().to_string(),
                }
            })
            .collect();
        // Stable: equal strengths keep rule order.
        fired.sort_by(|a, b| b.strength.total_cmp(&a.strength));
        fired
    }
}
