//! Next-action recommendation for smart homes.
//!
//! The [`TemporalEvidencesClassifier`] learns, per sensor, which actions tend
//! to follow a change of that sensor after a given elapsed time, and fuses the
//! evidence of all sensors into a ranked [`Belief`] with conflict and
//! uncertainty diagnostics. [`postprocess`] narrows a belief to the
//! recommendations shown; [`evaluation`] compares recommenders by
//! cross-validation.

pub mod belief;
pub mod binning;
pub mod classifier;
pub mod dataset;
pub mod error;
pub mod evaluation;
pub mod evidence;
pub mod fusion;
pub mod logging;
pub mod matrix;
pub mod postprocess;

pub use belief::{ActionSet, Belief, MassFunction};
pub use binning::{build_bins, Bin, Bins};
pub use classifier::{ClassifierSettings, Prediction, Recommender, TemporalEvidencesClassifier};
pub use dataset::Dataset;
pub use error::{Error, Result};
pub use evidence::EvidenceSource;
pub use fusion::{combine, fuse, Combination, Fused, Fusion};
pub use matrix::LabeledMatrix;
pub use postprocess::{best_x_predictions, dynamic_cutoff, DynamicCutoff};

pub use homerec_config::RecommenderConfig;
