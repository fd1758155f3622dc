//! The knowledge base: input variables, output variables and rules.
//!
//! A knowledge base is validated once at construction and is immutable
//! afterwards. Every rule reference is resolved to indices up front, so an
//! inference pass can never hit an unknown variable or term.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::rule::{Rule, RuleId};
use crate::variable::LinguisticVariable;

/// A rule with every name resolved to a position.
#[derive(Debug, Clone)]
pub(crate) struct CompiledRule {
    /// Index into the rule list.
    pub(crate) rule: usize,
    /// `(input index, term index)` per antecedent clause.
    pub(crate) clauses: Vec<(usize, usize)>,
    /// Term index of the consequent within the output variable.
    pub(crate) consequent: usize,
}

/// Immutable, validated fuzzy knowledge base.
///
/// Safe to share across threads: nothing is mutated after construction.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    inputs: Vec<LinguisticVariable>,
    outputs: Vec<LinguisticVariable>,
    rules: Vec<Rule>,
    compiled: Vec<CompiledRule>,
    /// Compiled rule indices per output, in rule order.
    by_output: Vec<Vec<usize>>,
    fingerprint: String,
}

#[derive(Serialize)]
struct KnowledgeBaseRef<'a> {
    inputs: &'a [LinguisticVariable],
    outputs: &'a [LinguisticVariable],
    rules: &'a [Rule],
}

#[derive(Deserialize)]
struct RawKnowledgeBase {
    inputs: Vec<LinguisticVariable>,
    outputs: Vec<LinguisticVariable>,
    rules: Vec<Rule>,
}

fn index_variables(vars: &[LinguisticVariable]) -> Result<HashMap<&str, usize>, ConfigError> {
    let mut index = HashMap::with_capacity(vars.len());
    for (i, var) in vars.iter().enumerate() {
        if index.insert(var.name(), i).is_some() {
            return Err(ConfigError::DuplicateVariable {
                variable: var.name().to_string(),
            });
        }
    }
    Ok(index)
}

impl KnowledgeBase {
    /// Validates and assembles a knowledge base.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the offending variable or rule id when
    /// a variable name repeats (across inputs and outputs), a rule id repeats,
    /// or a rule references an unknown input variable, output variable or term.
    pub fn new(
        inputs: Vec<LinguisticVariable>,
        outputs: Vec<LinguisticVariable>,
        rules: Vec<Rule>,
    ) -> Result<Self, ConfigError> {
        let input_index = index_variables(&inputs)?;
        let output_index = index_variables(&outputs)?;
        if let Some(shared) = inputs.iter().find(|v| output_index.contains_key(v.name())) {
            return Err(ConfigError::DuplicateVariable {
                variable: shared.name().to_string(),
            });
        }

        let mut ids: HashSet<RuleId> = HashSet::with_capacity(rules.len());
        let mut compiled = Vec::with_capacity(rules.len());
        let mut by_output = vec![Vec::new(); outputs.len()];

        for (rule_idx, rule) in rules.iter().enumerate() {
            let rule_id = rule.id();
            if !ids.insert(rule_id) {
                return Err(ConfigError::DuplicateRuleId { rule_id });
            }

            let &output = output_index.get(rule.output()).ok_or_else(|| {
                ConfigError::UnknownOutputVariable {
                    rule_id,
                    variable: rule.output().to_string(),
                }
            })?;

            let mut clauses = Vec::with_capacity(rule.antecedent().len());
            for clause in rule.antecedent() {
                let &var = input_index.get(clause.variable.as_str()).ok_or_else(|| {
                    ConfigError::UnknownInputVariable {
                        rule_id,
                        variable: clause.variable.clone(),
                    }
                })?;
                let term = inputs[var].term_index(&clause.term).ok_or_else(|| ConfigError::UnknownTerm {
                    rule_id,
                    variable: clause.variable.clone(),
                    term: clause.term.clone(),
                })?;
                clauses.push((var, term));
            }

            let consequent = outputs[output]
                .term_index(&rule.consequent().term)
                .ok_or_else(|| ConfigError::UnknownTerm {
                    rule_id,
                    variable: rule.output().to_string(),
                    term: rule.consequent().term.clone(),
                })?;

            by_output[output].push(compiled.len());
            compiled.push(CompiledRule {
                rule: rule_idx,
                clauses,
                consequent,
            });
        }

        let canonical = serde_json::to_vec(&KnowledgeBaseRef {
            inputs: &inputs,
            outputs: &outputs,
            rules: &rules,
        })
        .map_err(|e| ConfigError::Malformed {
            reason: format!("serialize knowledge base: {e}"),
        })?;
        let fingerprint = blake3::hash(&canonical).to_hex().to_string();

        debug!(
            inputs = inputs.len(),
            outputs = outputs.len(),
            rules = rules.len(),
            fingerprint = %fingerprint,
            "knowledge base validated"
        );

        Ok(Self {
            inputs,
            outputs,
            rules,
            compiled,
            by_output,
            fingerprint,
        })
    }

    /// Parses and validates a knowledge base from JSON.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Malformed` for syntax errors and for any
    /// validation failure inside a variable, term or rule; cross-reference
    /// failures are reported by [`KnowledgeBase::new`].
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let raw: RawKnowledgeBase = serde_json::from_str(s).map_err(|e| ConfigError::Malformed {
            reason: e.to_string(),
        })?;
        Self::new(raw.inputs, raw.outputs, raw.rules)
    }

    /// Serializes the knowledge base to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Malformed` if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(&KnowledgeBaseRef {
            inputs: &self.inputs,
            outputs: &self.outputs,
            rules: &self.rules,
        })
        .map_err(|e| ConfigError::Malformed {
            reason: format!("serialize knowledge base: {e}"),
        })
    }

    /// Input variables in declaration order.
    #[must_use]
    pub fn inputs(&self) -> &[LinguisticVariable] {
        &self.inputs
    }

    /// Output variables in declaration order.
    #[must_use]
    pub fn outputs(&self) -> &[LinguisticVariable] {
        &self.outputs
    }

    /// Rules in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Looks up an input variable.
    #[must_use]
    pub fn input(&self, name: &str) -> Option<&LinguisticVariable> {
        self.inputs.iter().find(|v| v.name() == name)
    }

    /// Looks up an output variable.
    #[must_use]
    pub fn output(&self, name: &str) -> Option<&LinguisticVariable> {
        self.outputs.iter().find(|v| v.name() == name)
    }

    /// Looks up a rule by id.
    #[must_use]
    pub fn rule(&self, id: RuleId) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id() == id)
    }

    /// All rules belonging to one output, in rule order.
    #[must_use]
    pub fn rules_for(&self, output: &str) -> Vec<&Rule> {
        self.output_index(output)
            .map(|o| {
                self.by_output[o]
                    .iter()
                    .map(|&c| &self.rules[self.compiled[c].rule])
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Stable blake3 hex digest of the canonical JSON form.
    #[must_use]
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub(crate) fn output_index(&self, name: &str) -> Option<usize> {
        self.outputs.iter().position(|v| v.name() == name)
    }

    pub(crate) fn compiled(&self) -> &[CompiledRule] {
        &self.compiled
    }

    pub(crate) fn compiled_for(&self, output: usize) -> impl Iterator<Item = &CompiledRule> + '_ {
        self.by_output[output].iter().map(move |&c| &self.compiled[c])
    }
}

impl Serialize for KnowledgeBase {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        KnowledgeBaseRef {
            inputs: &self.inputs,
            outputs: &self.outputs,
            rules: &self.rules,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for KnowledgeBase {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawKnowledgeBase::deserialize(deserializer)?;
        KnowledgeBase::new(raw.inputs, raw.outputs, raw.rules).map_err(serde::de::Error::custom)
    }
}
