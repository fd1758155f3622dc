//! Error types for agrofuzz.
//!
//! All errors are strongly typed using thiserror. Configuration errors are
//! raised while a knowledge base is being built and never during inference;
//! inference errors are caller contract violations or worker failures.

use thiserror::Error;

use crate::rule::RuleId;

/// Errors raised while validating a knowledge base or one of its parts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Triangle parameters ({a}, {b}, {c}) must satisfy a <= b <= c")]
    UnorderedTriangle {
        a: f64,
        b: f64,
        c: f64,
    },

    #[error("Triangle parameters ({a}, {b}, {c}) must be finite")]
    NonFiniteTriangle {
        a: f64,
        b: f64,
        c: f64,
    },

    #[error("Universe [{lo}, {hi}] with resolution {resolution} is invalid: {reason}")]
    InvalidUniverse {
        lo: f64,
        hi: f64,
        resolution: f64,
        reason: String,
    },

    #[error("Variable '{variable}' is invalid: {source}")]
    InvalidVariable {
        variable: String,
        #[source]
        source: Box<ConfigError>,
    },

    #[error("Term '{term}' of variable '{variable}' is invalid: {source}")]
    InvalidTerm {
        variable: String,
        term: String,
        #[source]
        source: Box<ConfigError>,
    },

    #[error("Term '{term}' of variable '{variable}' has support [{a}, {c}] outside the universe [{lo}, {hi}]")]
    TermOutsideUniverse {
        variable: String,
        term: String,
        a: f64,
        c: f64,
        lo: f64,
        hi: f64,
    },

    #[error("Variable '{variable}' declares no terms")]
    EmptyVariable {
        variable: String,
    },

    #[error("Variable name cannot be empty")]
    EmptyVariableName,

    #[error("Variable '{variable}' is declared more than once")]
    DuplicateVariable {
        variable: String,
    },

    #[error("Variable '{variable}' declares term '{term}' more than once")]
    DuplicateTerm {
        variable: String,
        term: String,
    },

    #[error("Rule {rule_id} has an empty antecedent")]
    EmptyAntecedent {
        rule_id: RuleId,
    },

    #[error("Rule {rule_id} has no output variable")]
    MissingOutput {
        rule_id: RuleId,
    },

    #[error("Rule {rule_id} has no consequent term")]
    MissingConsequent {
        rule_id: RuleId,
    },

    #[error("Rule {rule_id} repeats the clause '{variable} is {term}'")]
    DuplicateClause {
        rule_id: RuleId,
        variable: String,
        term: String,
    },

    #[error("Rule id {rule_id} is used by more than one rule")]
    DuplicateRuleId {
        rule_id: RuleId,
    },

    #[error("Rule {rule_id} references unknown input variable '{variable}'")]
    UnknownInputVariable {
        rule_id: RuleId,
        variable: String,
    },

    #[error("Rule {rule_id} references unknown output variable '{variable}'")]
    UnknownOutputVariable {
        rule_id: RuleId,
        variable: String,
    },

    #[error("Rule {rule_id} references unknown term '{term}' of variable '{variable}'")]
    UnknownTerm {
        rule_id: RuleId,
        variable: String,
        term: String,
    },

    #[error("Rule {rule_id} belongs to output '{owner}' but concludes on '{consequent}'")]
    ConsequentMismatch {
        rule_id: RuleId,
        owner: String,
        consequent: String,
    },

    #[error("Malformed knowledge base document: {reason}")]
    Malformed {
        reason: String,
    },
}

/// Errors raised by an inference call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    #[error("No value supplied for input variable '{variable}'")]
    MissingInput {
        variable: String,
    },

    #[error("Input variable '{variable}' is not declared by the knowledge base")]
    UnknownInput {
        variable: String,
    },

    #[error("Input variable '{variable}' has non-finite value {value}")]
    NonFiniteInput {
        variable: String,
        value: f64,
    },

    #[error("Output variable '{variable}' is not declared by the knowledge base")]
    UnknownOutput {
        variable: String,
    },

    #[error("Diagnosis queue is full (capacity: {capacity})")]
    QueueFull {
        capacity: usize,
    },

    #[error("Diagnosis worker disconnected")]
    Disconnected,

    #[error("Diagnosis timed out after {duration_ms}ms")]
    Timeout {
        duration_ms: u64,
    },
}

/// Top-level error type for agrofuzz.
#[derive(Debug, Error)]
pub enum AgroError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Inference error: {0}")]
    Inference(#[from] InferenceError),

    #[error("Internal error: {message}")]
    Internal {
        message: String,
    },
}

impl AgroError {
    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this is a configuration error.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns true if this is an inference error.
    #[must_use]
    pub const fn is_inference(&self) -> bool {
        matches!(self, Self::Inference(_))
    }

    /// Returns true if this is an internal error.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Config(_) => false, // A broken rule base stays broken
            Self::Inference(e) => {
                matches!(e, InferenceError::QueueFull { .. } | InferenceError::Timeout { .. })
            }
            Self::Internal { .. } => false,
        }
    }
}

/// Result type alias for agrofuzz operations.
pub type AgroResult<T> = Result<T, AgroError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_names_rule() {
        let err = ConfigError::UnknownTerm {
            rule_id: RuleId::new(17),
            variable: "Rain".to_string(),
            term: "Torrential".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("Rule 17"));
        assert!(msg.contains("Rain"));
        assert!(msg.contains("Torrential"));
    }

    #[test]
    fn test_invalid_term_wraps_triangle_error() {
        let err = ConfigError::InvalidTerm {
            variable: "Temp".to_string(),
            term: "Low".to_string(),
            source: Box::new(ConfigError::UnorderedTriangle { a: 20.0, b: 10.0, c: 10.0 }),
        };
        let msg = format!("{err}");
        assert!(msg.contains("Temp"));
        assert!(msg.contains("a <= b <= c"));
    }

    #[test]
    fn test_inference_error_missing_input() {
        let err = InferenceError::MissingInput {
            variable: "LeafWet".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("LeafWet"));
    }

    #[test]
    fn test_inference_error_timeout() {
        let err = InferenceError::Timeout { duration_ms: 5000 };
        let msg = format!("{err}");
        assert!(msg.contains("5000ms"));
    }

    #[test]
    fn test_agro_error_from_config() {
        let err: AgroError = ConfigError::EmptyAntecedent { rule_id: RuleId::new(3) }.into();
        assert!(err.is_config());
        assert!(!err.is_retryable());
        assert!(format!("{err}").contains("Rule 3"));
    }

    #[test]
    fn test_agro_error_from_inference() {
        let err: AgroError = InferenceError::QueueFull { capacity: 4 }.into();
        assert!(err.is_inference());
        assert!(err.is_retryable());

        let err: AgroError = InferenceError::MissingInput {
            variable: "Temp".to_string(),
        }
        .into();
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_agro_error_internal() {
        let err = AgroError::internal("unexpected state");
        assert!(err.is_internal());
        assert!(!err.is_retryable());
        assert!(format!("{err}").contains("unexpected state"));
    }
}
