//! Fuzzy rules as plain data.
//!
//! A rule is `IF v1 is t1 AND v2 is t2 ... THEN output is term`. Rules carry
//! string keys only; the knowledge base resolves them to indices once.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Unique identifier for a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(u32);

impl RuleId {
    /// Wraps a raw rule number.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw rule number.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A `(variable, term)` pair: "variable is term".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Clause {
    /// Variable name.
    pub variable: String,
    /// Term name within that variable.
    pub term: String,
}

impl Clause {
    /// Creates a clause.
    pub fn new(variable: impl Into<String>, term: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            term: term.into(),
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is {}", self.variable, self.term)
    }
}

/// A single-output Mamdani rule.
///
/// Antecedent clauses are joined by fuzzy AND. Structural validity (non-empty
/// antecedent, no repeated clause, consequent on the owning output) is checked
/// here; references to variables and terms are checked by the knowledge base.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    id: RuleId,
    output: String,
    antecedent: Vec<Clause>,
    consequent: Clause,
    label: String,
    description: String,
}

impl Rule {
    /// Creates a builder for a rule with the given id.
    #[must_use]
    pub fn builder(id: u32) -> RuleBuilder {
        RuleBuilder::new(RuleId::new(id))
    }

    /// Rule id.
    #[must_use]
    pub const fn id(&self) -> RuleId {
        self.id
    }

    /// Owning output variable.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Antecedent clauses, in declaration order.
    #[must_use]
    pub fn antecedent(&self) -> &[Clause] {
        &self.antecedent
    }

    /// Consequent `(output, term)`.
    #[must_use]
    pub const fn consequent(&self) -> &Clause {
        &self.consequent
    }

    /// Risk-level label reported in traces.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.output.trim().is_empty() {
            return Err(ConfigError::MissingOutput { rule_id: self.id });
        }
        if self.consequent.term.trim().is_empty() {
            return Err(ConfigError::MissingConsequent { rule_id: self.id });
        }
        if self.antecedent.is_empty() {
            return Err(ConfigError::EmptyAntecedent { rule_id: self.id });
        }
        if self.consequent.variable != self.output {
            return Err(ConfigError::ConsequentMismatch {
                rule_id: self.id,
                owner: self.output.clone(),
                consequent: self.consequent.variable.clone(),
            });
        }

        let mut seen: HashSet<&Clause> = HashSet::with_capacity(self.antecedent.len());
        for clause in &self.antecedent {
            if !seen.insert(clause) {
                return Err(ConfigError::DuplicateClause {
                    rule_id: self.id,
                    variable: clause.variable.clone(),
                    term: clause.term.clone(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct RawRule {
    id: RuleId,
    output: String,
    antecedent: Vec<Clause>,
    consequent: Clause,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    description: String,
}

impl<'de> Deserialize<'de> for Rule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawRule::deserialize(deserializer)?;
        let rule = Rule {
            id: raw.id,
            label: raw.label.unwrap_or_else(|| raw.consequent.term.clone()),
            output: raw.output,
            antecedent: raw.antecedent,
            consequent: raw.consequent,
            description: raw.description,
        };
        rule.validate().map_err(serde::de::Error::custom)?;
        Ok(rule)
    }
}

/// Builder for [`Rule`].
#[derive(Debug, Clone)]
pub struct RuleBuilder {
    id: RuleId,
    output: Option<String>,
    antecedent: Vec<Clause>,
    term: Option<String>,
    label: Option<String>,
    description: String,
}

impl RuleBuilder {
    /// Creates a builder for the given rule id.
    #[must_use]
    pub fn new(id: RuleId) -> Self {
        Self {
            id,
            output: None,
            antecedent: Vec::new(),
            term: None,
            label: None,
            description: String::new(),
        }
    }

    /// Sets the owning output variable.
    #[must_use]
    pub fn output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Adds an antecedent clause.
    #[must_use]
    pub fn when(mut self, variable: impl Into<String>, term: impl Into<String>) -> Self {
        self.antecedent.push(Clause::new(variable, term));
        self
    }

    /// Sets the consequent term of the owning output.
    #[must_use]
    pub fn then(mut self, term: impl Into<String>) -> Self {
        self.term = Some(term.into());
        self
    }

    /// Sets the risk label. Defaults to the consequent term.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builds and validates the rule.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingOutput`, `MissingConsequent`,
    /// `EmptyAntecedent` or `DuplicateClause`, each naming the rule id.
    pub fn build(self) -> Result<Rule, ConfigError> {
        let output = self
            .output
            .ok_or(ConfigError::MissingOutput { rule_id: self.id })?;
        let term = self
            .term
            .ok_or(ConfigError::MissingConsequent { rule_id: self.id })?;

        let rule = Rule {
            id: self.id,
            label: self.label.unwrap_or_else(|| term.clone()),
            consequent: Clause::new(output.clone(), term),
            output,
            antecedent: self.antecedent,
            description: self.description,
        };
        rule.validate()?;
        Ok(rule)
    }
}

/// Linguistic risk classification of a crisp score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Score below 0.4.
    Low,
    /// Score in `[0.4, 0.6)`.
    Moderate,
    /// Score of 0.6 and above.
    High,
}

impl RiskLevel {
    /// Upper bound (exclusive) of `Low`.
    pub const LOW_BELOW: f64 = 0.4;

    /// Upper bound (exclusive) of `Moderate`.
    pub const MODERATE_BELOW: f64 = 0.6;

    /// Classifies a crisp risk score. Thresholds are fixed.
    #[must_use]
    pub fn classify(score: f64) -> Self {
        if score < Self::LOW_BELOW {
            Self::Low
        } else if score < Self::MODERATE_BELOW {
            Self::Moderate
        } else {
            Self::High
        }
    }

    /// Label as used in rule tables.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a crisp risk score as "Low", "Moderate" or "High".
#[must_use]
pub fn classify(score: f64) -> RiskLevel {
    RiskLevel::classify(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_consequent_on_owner() {
        let rule = Rule::builder(25)
            .output("Viral Leaf Curl")
            .when("Vector", "None")
            .then("Low")
            .description("Low risk with no vector pressure")
            .build()
            .unwrap();
        assert_eq!(rule.id(), RuleId::new(25));
        assert_eq!(rule.consequent(), &Clause::new("Viral Leaf Curl", "Low"));
        assert_eq!(rule.label(), "Low");
        assert_eq!(rule.antecedent().len(), 1);
    }

    #[test]
    fn empty_antecedent_fails_at_build() {
        let err = Rule::builder(9).output("Fusarium Wilt").then("Moderate").build().unwrap_err();
        assert_eq!(err, ConfigError::EmptyAntecedent { rule_id: RuleId::new(9) });
        assert!(format!("{err}").contains("Rule 9"));
    }

    #[test]
    fn missing_output_or_term_fails_at_build() {
        let err = Rule::builder(1).when("Temp", "High").then("High").build().unwrap_err();
        assert!(matches!(err, ConfigError::MissingOutput { .. }));

        let err = Rule::builder(1).output("Nematodes").when("Temp", "High").build().unwrap_err();
        assert!(matches!(err, ConfigError::MissingConsequent { .. }));
    }

    #[test]
    fn repeated_clause_is_rejected() {
        let err = Rule::builder(4)
            .output("Anthracnose")
            .when("Rain", "Low")
            .when("Rain", "Low")
            .then("Low")
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateClause { .. }));
    }

    #[test]
    fn deserialized_consequent_must_match_owner() {
        let json = r#"{
            "id": 7,
            "output": "Powdery Mildew",
            "antecedent": [{"variable": "RH", "term": "High"}],
            "consequent": {"variable": "Cercospora", "term": "Low"}
        }"#;
        let err = serde_json::from_str::<Rule>(json).unwrap_err();
        assert!(err.to_string().contains("Rule 7"));

        let json = r#"{
            "id": 7,
            "output": "Powdery Mildew",
            "antecedent": [{"variable": "RH", "term": "High"}],
            "consequent": {"variable": "Powdery Mildew", "term": "Low"}
        }"#;
        let rule: Rule = serde_json::from_str(json).unwrap();
        assert_eq!(rule.label(), "Low");
    }

    #[test]
    fn classify_uses_fixed_thresholds() {
        assert_eq!(classify(0.0), RiskLevel::Low);
        assert_eq!(classify(0.399_999), RiskLevel::Low);
        assert_eq!(classify(0.4), RiskLevel::Moderate);
        assert_eq!(classify(0.599_999), RiskLevel::Moderate);
        assert_eq!(classify(0.6), RiskLevel::High);
        assert_eq!(classify(1.0), RiskLevel::High);
        assert_eq!(RiskLevel::High.to_string(), "High");
    }
}
