//! Property-based tests for membership functions and inference.

use proptest::prelude::*;

use agrofuzz::{fuzzy_and, plant, InferenceEngine, Readings, RuleId, Triangular, ACTIVATION_THRESHOLD};

/// Sorted `(a, b, c)` within a bounded range.
fn triangle_strategy() -> impl Strategy<Value = (f64, f64, f64)> {
    (-100.0..100.0f64, -100.0..100.0f64, -100.0..100.0f64).prop_map(|(x, y, z)| {
        let mut v = [x, y, z];
        v.sort_by(f64::total_cmp);
        (v[0], v[1], v[2])
    })
}

/// Readings anywhere inside the built-in universes.
fn readings_strategy() -> impl Strategy<Value = Readings> {
    (
        (10.0..=40.0f64, 10.0..=100.0f64, 0.0..=200.0f64),
        (0.0..=24.0f64, 0.0..=100.0f64, 0.0..=10.0f64),
        (0.0..=10.0f64, 0.0..=10.0f64, 0.0..=3.0f64),
    )
        .prop_map(|((temp, rh, rain), (wet, soil, drain), (seed, vector, stage))| {
            [
                ("Temp", temp),
                ("RH", rh),
                ("Rain", rain),
                ("LeafWet", wet),
                ("SoilM", soil),
                ("Drain", drain),
                ("SeedHealth", seed),
                ("Vector", vector),
                ("Stage", stage),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
        })
}

fn strength(engine: &InferenceEngine, readings: &Readings, id: u32) -> f64 {
    engine
        .firing_strengths(readings)
        .unwrap()
        .into_iter()
        .find(|(rule, _)| *rule == RuleId::new(id))
        .map(|(_, s)| s)
        .unwrap()
}

proptest! {
    #[test]
    fn membership_stays_in_unit_interval((a, b, c) in triangle_strategy(), x in -200.0..200.0f64) {
        let mf = Triangular::new(a, b, c).unwrap();
        let mu = mf.degree(x);
        prop_assert!((0.0..=1.0).contains(&mu));
        if x < a || x > c {
            prop_assert_eq!(mu, 0.0);
        }
    }

    #[test]
    fn membership_peaks_at_b_and_vanishes_at_open_feet((a, b, c) in triangle_strategy()) {
        let mf = Triangular::new(a, b, c).unwrap();
        prop_assert_eq!(mf.degree(b), 1.0);
        if a < b {
            prop_assert_eq!(mf.degree(a), 0.0);
        }
        if b < c {
            prop_assert_eq!(mf.degree(c), 0.0);
        }
    }

    #[test]
    fn fuzzy_and_is_the_minimum(degrees in prop::collection::vec(0.0..=1.0f64, 1..8)) {
        let expected = degrees.iter().copied().fold(f64::INFINITY, f64::min);
        prop_assert_eq!(fuzzy_and(degrees.iter().copied()), expected);
    }

    #[test]
    fn single_clause_rules_fire_at_the_term_degree(r in readings_strategy()) {
        let engine = InferenceEngine::new(plant::knowledge_base().unwrap());
        let kb = engine.knowledge_base();

        // Rule 22: SoilM is Dry. Rule 25: Vector is None.
        let dry = kb.input("SoilM").unwrap().term("Dry").unwrap().degree(r["SoilM"]);
        let none = kb.input("Vector").unwrap().term("None").unwrap().degree(r["Vector"]);
        prop_assert_eq!(strength(&engine, &r, 22), dry);
        prop_assert_eq!(strength(&engine, &r, 25), none);
    }

    #[test]
    fn moving_toward_the_peak_never_weakens_a_rule(
        r in readings_strategy(),
        t1 in 10.0..=40.0f64,
        step in 0.0..=1.0f64,
    ) {
        let engine = InferenceEngine::new(plant::knowledge_base().unwrap());
        // Rule 12: LeafWet is Long AND Temp is Moderate (peak at 24).
        let t2 = t1 + step * (24.0 - t1);
        let t2 = if t1 <= 24.0 { t2.clamp(t1, 24.0) } else { t2.clamp(24.0, t1) };

        let mut far = r.clone();
        far.insert("Temp".to_string(), t1);
        let mut near = r;
        near.insert("Temp".to_string(), t2);
        prop_assert!(strength(&engine, &near, 12) >= strength(&engine, &far, 12));
    }

    #[test]
    fn scores_and_traces_are_well_formed(r in readings_strategy()) {
        let engine = InferenceEngine::new(plant::knowledge_base().unwrap());
        let d = engine.infer(&r).unwrap();
        prop_assert_eq!(d.outputs.len(), 10);
        for output in &d.outputs {
            prop_assert!((0.0..=1.0).contains(&output.score));
            for f in &output.fired {
                prop_assert!(f.strength > ACTIVATION_THRESHOLD);
            }
        }
    }

    #[test]
    fn inference_is_idempotent(r in readings_strategy()) {
        let engine = InferenceEngine::new(plant::knowledge_base().unwrap());
        let first = engine.infer(&r).unwrap();
        let second = engine.infer(&r).unwrap();
        for (a, b) in first.outputs.iter().zip(&second.outputs) {
            prop_assert_eq!(a.score.to_bits(), b.score.to_bits());
            prop_assert_eq!(&a.fired, &b.fired);
        }
    }
}
