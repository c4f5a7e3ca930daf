//! Fuzz target for `homerec.json` parsing and validation.
//!
//! Arbitrary bytes must only ever produce an error, never a panic, both when
//! parsing and when building a classifier from a validated config.

#![no_main]

use homerec_config::{validate_config, RecommenderConfig};
use homerec_core::{ActionSet, TemporalEvidencesClassifier};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(config) = RecommenderConfig::from_json(text) else {
        return;
    };
    if validate_config(&config).is_err() {
        return;
    }
    let Ok(actions) = ActionSet::new(["a", "b"]) else {
        return;
    };
    let mut features = config.evidence.exempt_features.clone();
    features.push("door".to_string());
    let _ = TemporalEvidencesClassifier::from_config(&config, features, actions);
});
