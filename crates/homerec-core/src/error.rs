//! Error types for the recommender core.
//!
//! Structural errors (bad elapsed times, calling predict before fit, shape
//! mismatches) propagate to the caller. Missing evidence is not an error: it
//! is expressed as "unknown" belief mass and never surfaces here.

use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for binning, evidence and classification.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Elapsed time outside the valid range (negative or NaN).
    #[error("elapsed time {value} for {feature} is outside the binned domain (must be >= {start})")]
    Domain {
        feature: String,
        value: f64,
        start: f64,
    },

    /// Prediction attempted before the classifier was trained.
    #[error("classifier has not been fitted; call fit before predict")]
    NotFitted,

    /// Input dimensions disagree with the configured shape.
    #[error("shape mismatch for {what}: expected {expected}, got {actual}")]
    Shape {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Label outside the fixed action vocabulary.
    #[error("unknown action label: {0}")]
    UnknownAction(String),

    /// Bin boundaries that cannot form a partition.
    #[error("invalid bins: {0}")]
    InvalidBins(String),

    /// Classifier construction with inconsistent features or actions.
    #[error("invalid classifier configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Stable numeric code for machine consumers.
    pub fn code(&self) -> u32 {
        match self {
            Error::Domain { .. } => 30,
            Error::NotFitted => 31,
            Error::Shape { .. } => 32,
            Error::UnknownAction(_) => 33,
            Error::InvalidBins(_) => 34,
            Error::InvalidConfig(_) => 35,
        }
    }

    pub(crate) fn shape(what: &'static str, expected: usize, actual: usize) -> Self {
        Error::Shape {
            what,
            expected,
            actual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let errors = [
            Error::Domain {
                feature: "door".into(),
                value: -1.0,
                start: 0.0,
            },
            Error::NotFitted,
            Error::shape("features", 3, 2),
            Error::UnknownAction("x".into()),
            Error::InvalidBins("x".into()),
            Error::InvalidConfig("x".into()),
        ];
        let mut codes: Vec<u32> = errors.iter().map(Error::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn shape_message_names_both_sizes() {
        let msg = Error::shape("features", 3, 2).to_string();
        assert!(msg.contains("features"));
        assert!(msg.contains('3') && msg.contains('2'));
    }
}
