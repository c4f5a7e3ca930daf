//! Recommenders and their common prediction type.
//!
//! The [`Recommender`] trait is the contract the experiment runner drives:
//! `fit` once per fold, then `predict` the fold's test instances. Any other
//! strategy (a frequency baseline, a naive Bayes model) joins an experiment by
//! implementing it.

pub mod temporal;

pub use temporal::{ClassifierSettings, TemporalEvidencesClassifier};

use serde::{Deserialize, Serialize};

use crate::belief::Belief;
use crate::error::Result;

/// Ranked belief for one instance plus the fusion diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub belief: Belief,
    /// Share of combined evidence discarded as contradictory, in `[0, 1]`.
    pub conflict: f64,
    /// Mass left on "unknown", in `[0, 1]`.
    pub theta: f64,
    /// Set when some fusion step hit total conflict.
    #[serde(default)]
    pub saturated: bool,
}

impl Prediction {
    /// Prediction with no diagnostics, for recommenders that do not fuse.
    pub fn from_belief(belief: Belief) -> Self {
        let theta = belief.unknown();
        Self {
            belief,
            conflict: 0.0,
            theta,
            saturated: false,
        }
    }
}

/// A trainable next-action recommender.
///
/// `data` rows hold one elapsed time per feature; `labels` hold the action
/// that followed each row.
pub trait Recommender: Send + Sync {
    /// Display name used in experiment results.
    fn name(&self) -> &str;

    /// Train from scratch, discarding any previous fit.
    fn fit(&mut self, data: &[Vec<f64>], labels: &[String]) -> Result<()>;

    /// One prediction per row, in input order.
    fn predict(&self, data: &[Vec<f64>]) -> Result<Vec<Prediction>>;
}
