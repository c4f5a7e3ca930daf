//! Evaluation of recommenders: quality metrics, cross-validation folds,
//! statistics over folds and the experiment runner tying them together.

pub mod experiment;
pub mod folds;
pub mod metrics;
pub mod stats;

pub use experiment::{Experiment, Results, RuntimeMetric};
pub use folds::{Fold, KFold};
pub use metrics::{QualityMeasurement, QualityMetric, QualityMetricsCalculator};
pub use stats::Statistic;

use thiserror::Error;

pub type EvaluationResult<T> = std::result::Result<T, EvaluationError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("at least 2 folds are required, got {0}")]
    TooFewFolds(usize),

    #[error("cannot split {instances} instances into {folds} folds")]
    TooManyFolds { folds: usize, instances: usize },

    #[error("dataset is empty")]
    EmptyDataset,

    #[error("{predictions} predictions for {labels} labels")]
    LengthMismatch { predictions: usize, labels: usize },

    #[error("no results recorded for classifier '{0}'")]
    UnknownClassifier(String),

    #[error(transparent)]
    Core(#[from] crate::error::Error),
}

impl EvaluationError {
    pub fn code(&self) -> u32 {
        match self {
            EvaluationError::TooFewFolds(_) => 40,
            EvaluationError::TooManyFolds { .. } => 41,
            EvaluationError::EmptyDataset => 42,
            EvaluationError::LengthMismatch { .. } => 43,
            EvaluationError::UnknownClassifier(_) => 44,
            EvaluationError::Core(inner) => inner.code(),
        }
    }
}
