//! Built-in chilli crop disease knowledge base.
//!
//! Nine environmental and plant readings, ten disease risk outputs on `[0, 1]`
//! and thirty rules.

mod diseases;
mod rules;
mod variables;

pub use diseases::{disease_profiles, profile, DiseaseProfile, PathogenKind, DISEASES};
pub use rules::rules;
pub use variables::{input_variables, output_variables, INPUT_NAMES};

use crate::error::ConfigError;
use crate::knowledge::KnowledgeBase;

/// Builds the validated chilli disease knowledge base.
///
/// # Errors
///
/// Only fails if the built-in tables are inconsistent, which the tests rule out.
pub fn knowledge_base() -> Result<KnowledgeBase, ConfigError> {
    KnowledgeBase::new(input_variables()?, output_variables()?, rules()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_tables_are_consistent() {
        let kb = knowledge_base().unwrap();
        assert_eq!(kb.inputs().len(), 9);
        assert_eq!(kb.outputs().len(), 10);
        assert_eq!(kb.rules().len(), 30);

        let stage = kb.input("Stage").unwrap();
        assert_eq!(stage.terms().len(), 4);
        for var in kb.inputs().iter().filter(|v| v.name() != "Stage") {
            assert_eq!(var.terms().len(), 3, "{}", var.name());
        }
        for out in kb.outputs() {
            let terms: Vec<&str> = out.terms().iter().map(|t| t.name.as_str()).collect();
            assert_eq!(terms, vec!["Low", "Moderate", "High"]);
        }
    }

    #[test]
    fn every_disease_has_rules_and_a_profile() {
        let kb = knowledge_base().unwrap();
        for name in DISEASES {
            assert!(!kb.rules_for(name).is_empty(), "{name}");
            assert!(profile(name).is_some(), "{name}");
        }
        assert_eq!(kb.rules_for("Mosaic Viruses").len(), 2);
        assert_eq!(kb.rules_for("Anthracnose").len(), 4);
    }

    #[test]
    fn rule_ids_run_from_one_to_thirty() {
        let kb = knowledge_base().unwrap();
        let ids: Vec<u32> = kb.rules().iter().map(|r| r.id().get()).collect();
        assert_eq!(ids, (1..=30).collect::<Vec<_>>());
    }
}
