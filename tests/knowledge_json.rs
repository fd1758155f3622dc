use std::fs;

use agrofuzz::{plant, ConfigError, InferenceEngine, KnowledgeBase, Readings};

fn blight_document(rules: &str) -> String {
    format!(
        r#"{{
  "inputs": [
    {{
      "name": "Humidity",
      "universe": {{ "lo": 0.0, "hi": 100.0, "resolution": 1.0 }},
      "terms": [
        {{ "name": "Dry", "mf": [0.0, 0.0, 50.0] }},
        {{ "name": "Humid", "mf": [40.0, 100.0, 100.0] }}
      ]
    }}
  ],
  "outputs": [
    {{
      "name": "Blight",
      "universe": {{ "lo": 0.0, "hi": 1.0, "resolution": 0.01 }},
      "terms": [
        {{ "name": "Low", "mf": [0.0, 0.0, 0.4] }},
        {{ "name": "High", "mf": [0.6, 1.0, 1.0] }}
      ]
    }}
  ],
  "rules": {rules}
}}"#
    )
}

const GOOD_RULES: &str = r#"[
    {
      "id": 1,
      "output": "Blight",
      "antecedent": [{ "variable": "Humidity", "term": "Humid" }],
      "consequent": { "variable": "Blight", "term": "High" },
      "description": "Humid air favours blight"
    },
    {
      "id": 2,
      "output": "Blight",
      "antecedent": [{ "variable": "Humidity", "term": "Dry" }],
      "consequent": { "variable": "Blight", "term": "Low" }
    }
  ]"#;

#[test]
fn built_in_knowledge_base_survives_a_file_roundtrip() {
    let kb = plant::knowledge_base().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chilli.json");
    fs::write(&path, kb.to_json_pretty().unwrap()).unwrap();

    let loaded = KnowledgeBase::from_json(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(loaded.fingerprint(), kb.fingerprint());
    assert_eq!(loaded.rules(), kb.rules());

    let readings: Readings = [
        ("Temp", 25.0),
        ("RH", 85.0),
        ("Rain", 180.0),
        ("LeafWet", 18.0),
        ("SoilM", 80.0),
        ("Drain", 2.0),
        ("SeedHealth", 5.0),
        ("Vector", 3.0),
        ("Stage", 1.5),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();
    let from_file = InferenceEngine::new(loaded).infer(&readings).unwrap();
    let built_in = InferenceEngine::new(kb).infer(&readings).unwrap();
    assert_eq!(from_file, built_in);
}

#[test]
fn custom_knowledge_base_loads_and_infers() {
    let kb = KnowledgeBase::from_json(&blight_document(GOOD_RULES)).unwrap();
    assert_eq!(kb.rules().len(), 2);
    // Label defaults to the consequent term.
    assert_eq!(kb.rules()[1].label(), "Low");
    assert_eq!(kb.rules()[1].description(), "");

    let engine = InferenceEngine::new(kb);
    let readings: Readings = [("Humidity".to_string(), 100.0)].into_iter().collect();
    let d = engine.infer(&readings).unwrap();
    let blight = d.get("Blight").unwrap();
    assert_eq!(blight.fired.len(), 1);
    assert_eq!(blight.fired[0].rule_id.get(), 1);
    assert!(blight.score > 0.8);
}

#[test]
fn fingerprint_tracks_content() {
    let a = KnowledgeBase::from_json(&blight_document(GOOD_RULES)).unwrap();
    let b = KnowledgeBase::from_json(&blight_document(GOOD_RULES)).unwrap();
    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_eq!(a.fingerprint().len(), 64);

    let changed = GOOD_RULES.replace("Humid air favours blight", "Humid air favours rot");
    let c = KnowledgeBase::from_json(&blight_document(&changed)).unwrap();
    assert_ne!(a.fingerprint(), c.fingerprint());
}

#[test]
fn unknown_term_names_the_rule() {
    let rules = GOOD_RULES.replace(r#""term": "Humid""#, r#""term": "Soggy""#);
    let err = KnowledgeBase::from_json(&blight_document(&rules)).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownTerm { ref term, .. } if term == "Soggy"));
    let msg = err.to_string();
    assert!(msg.contains("Rule 1"), "{msg}");
    assert!(msg.contains("Soggy"), "{msg}");
}

#[test]
fn unknown_input_variable_names_the_rule() {
    let rules = GOOD_RULES.replace(r#""variable": "Humidity", "term": "Dry""#, r#""variable": "Wind", "term": "Dry""#);
    let err = KnowledgeBase::from_json(&blight_document(&rules)).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownInputVariable { ref variable, .. } if variable == "Wind"));
    assert!(err.to_string().contains("Rule 2"));
}

#[test]
fn empty_antecedent_is_rejected_with_rule_id() {
    let rules = r#"[
    {
      "id": 7,
      "output": "Blight",
      "antecedent": [],
      "consequent": { "variable": "Blight", "term": "High" }
    }
  ]"#;
    let err = KnowledgeBase::from_json(&blight_document(rules)).unwrap_err();
    assert!(matches!(err, ConfigError::Malformed { .. }));
    assert!(err.to_string().contains("Rule 7"), "{err}");
}

#[test]
fn duplicate_rule_id_is_rejected() {
    let rules = GOOD_RULES.replace(r#""id": 2"#, r#""id": 1"#);
    let err = KnowledgeBase::from_json(&blight_document(&rules)).unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateRuleId { .. }));
}

#[test]
fn unordered_triangle_names_variable_and_term() {
    let doc = blight_document(GOOD_RULES).replace("[40.0, 100.0, 100.0]", "[40.0, 30.0, 100.0]");
    let err = KnowledgeBase::from_json(&doc).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("a <= b <= c"), "{msg}");
}

#[test]
fn term_outside_universe_is_rejected() {
    let doc = blight_document(GOOD_RULES).replace("[40.0, 100.0, 100.0]", "[40.0, 100.0, 120.0]");
    let err = KnowledgeBase::from_json(&doc).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("Humid"), "{msg}");
    assert!(msg.contains("outside the universe"), "{msg}");
}

#[test]
fn syntax_errors_are_malformed() {
    let err = KnowledgeBase::from_json("{ not json").unwrap_err();
    assert!(matches!(err, ConfigError::Malformed { .. }));
}
