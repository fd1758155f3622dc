//! Diagnosis: the structured result of one inference pass.
//!
//! A diagnosis holds, per output variable, the crisp score, its risk
//! classification and the rules that fired, strongest first. It is rebuilt
//! from scratch on every call and never mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::error::AgroError;
use crate::rule::{Clause, RiskLevel, RuleId};

/// A rule whose firing strength exceeded the activation threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiredRule {
    /// Rule id.
    pub rule_id: RuleId,
    /// Firing strength in `(0.01, 1]`.
    pub strength: f64,
    /// The rule's antecedent clauses.
    pub clauses: Vec<Clause>,
    /// Risk label of the consequent.
    pub risk_label: String,
    /// Static description of the rule.
    pub description: String,
}

/// Score and explanation for one output variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputScore {
    /// Output variable name.
    pub output: String,
    /// Defuzzified score within the output universe.
    pub score: f64,
    /// Classification of `score`.
    pub risk: RiskLevel,
    /// Fired rules by descending strength; ties in rule order.
    pub fired: Vec<FiredRule>,
}

/// Result of an inference pass over every output variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    /// Fingerprint of the knowledge base that produced this diagnosis.
    pub knowledge_base: String,
    /// One entry per output variable, in declaration order.
    pub outputs: Vec<OutputScore>,
}

impl Diagnosis {
    /// Returns the entry for one output variable.
    #[must_use]
    pub fn get(&self, output: &str) -> Option<&OutputScore> {
        self.outputs.iter().find(|o| o.output == output)
    }

    /// Returns the score of one output variable.
    #[must_use]
    pub fn score(&self, output: &str) -> Option<f64> {
        self.get(output).map(|o| o.score)
    }

    /// Outputs by descending score; equal scores keep declaration order.
    #[must_use]
    pub fn ranked(&self) -> Vec<&OutputScore> {
        let mut ranked: Vec<&OutputScore> = self.outputs.iter().collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }

    /// The highest-scoring output.
    #[must_use]
    pub fn primary(&self) -> Option<&OutputScore> {
        self.ranked().into_iter().next()
    }

    /// Every fired rule across all outputs.
    pub fn fired_rules(&self) -> impl Iterator<Item = &FiredRule> {
        self.outputs.iter().flat_map(|o| o.fired.iter())
    }

    /// Serializes the diagnosis to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an internal error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, AgroError> {
        serde_json::to_string_pretty(self).map_err(|e| AgroError::internal(format!("serialize diagnosis: {e}")))
    }
}
