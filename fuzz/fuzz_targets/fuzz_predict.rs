//! Fuzz target for fit/predict on arbitrary elapsed times and labels.
//!
//! Any input must either yield predictions with diagnostics in [0, 1] or a
//! structured error.

#![no_main]

use arbitrary::Arbitrary;
use homerec_core::{ActionSet, ClassifierSettings, TemporalEvidencesClassifier};
use libfuzzer_sys::fuzz_target;

const ACTIONS: [&str; 3] = ["open", "close", "toggle"];

#[derive(Debug, Arbitrary)]
struct Input {
    min_support: u8,
    threads: u8,
    training: Vec<([f64; 3], u8)>,
    queries: Vec<[f64; 3]>,
}

fuzz_target!(|input: Input| {
    let Ok(actions) = ActionSet::new(ACTIONS) else {
        return;
    };
    let settings = ClassifierSettings::default()
        .with_min_support(u32::from(input.min_support))
        .with_threads(usize::from(input.threads % 8));
    let Ok(mut cls) = TemporalEvidencesClassifier::new(["x", "y", "z"], actions, settings) else {
        return;
    };

    let data: Vec<Vec<f64>> = input.training.iter().map(|(row, _)| row.to_vec()).collect();
    let labels: Vec<String> = input
        .training
        .iter()
        .map(|(_, a)| ACTIONS[usize::from(*a) % ACTIONS.len()].to_string())
        .collect();
    if cls.fit(&data, &labels).is_err() {
        return;
    }

    let queries: Vec<Vec<f64>> = input.queries.iter().map(|p| p.to_vec()).collect();
    if let Ok(predictions) = cls.predict(&queries) {
        assert_eq!(predictions.len(), queries.len());
        for p in predictions {
            assert!((0.0..=1.0).contains(&p.conflict));
            assert!((0.0..=1.0).contains(&p.theta));
        }
    }
});
