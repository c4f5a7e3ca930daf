//! Recommender configuration types.
//!
//! Every field has a default so a partial `homerec.json` is valid.

use serde::{Deserialize, Serialize};

use crate::validate::ValidationError;

/// Complete recommender configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommenderConfig {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub binning: BinningConfig,

    #[serde(default)]
    pub evidence: EvidenceConfig,

    #[serde(default)]
    pub dynamic_cutoff: DynamicCutoffConfig,

    #[serde(default)]
    pub prediction: PredictionConfig,

    #[serde(default)]
    pub evaluation: EvaluationConfig,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            description: None,
            binning: BinningConfig::default(),
            evidence: EvidenceConfig::default(),
            dynamic_cutoff: DynamicCutoffConfig::default(),
            prediction: PredictionConfig::default(),
            evaluation: EvaluationConfig::default(),
        }
    }
}

fn default_schema_version() -> String {
    crate::CONFIG_SCHEMA_VERSION.to_string()
}

impl RecommenderConfig {
    /// Load a configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ValidationError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(json)
            .map_err(|e| ValidationError::ParseError(format!("Invalid JSON: {}", e)))
    }
}

/// Elapsed-time discretization shared by all non-exempt sensors.
///
/// Either a regular grid `[start, end)` in steps of `width`, or explicit
/// ascending `edges`. In both cases the last boundary opens the unbounded
/// terminal bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinningConfig {
    #[serde(default)]
    pub start: f64,
    #[serde(default = "default_bin_end")]
    pub end: f64,
    #[serde(default = "default_bin_width")]
    pub width: f64,
    /// Explicit boundaries; overrides `start`/`end`/`width` when set.
    #[serde(default)]
    pub edges: Option<Vec<f64>>,
}

impl Default for BinningConfig {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: default_bin_end(),
            width: default_bin_width(),
            edges: None,
        }
    }
}

fn default_bin_end() -> f64 {
    60.0
}

fn default_bin_width() -> f64 {
    10.0
}

/// How per-sensor evidence is turned into belief mass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceConfig {
    /// Observations a bin needs before its empirical frequencies are trusted
    /// in full; below this the shortfall becomes "unknown" mass.
    #[serde(default = "default_min_support")]
    pub min_support: u32,

    /// Features whose source ignores elapsed time (single unbounded bin).
    #[serde(default)]
    pub exempt_features: Vec<String>,
}

impl Default for EvidenceConfig {
    fn default() -> Self {
        Self {
            min_support: default_min_support(),
            exempt_features: Vec::new(),
        }
    }
}

fn default_min_support() -> u32 {
    5
}

/// Thresholds for the adaptive recommendation-list length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DynamicCutoffConfig {
    #[serde(default = "default_max_conflict")]
    pub max_conflict: f64,
    #[serde(default = "default_max_theta")]
    pub max_theta: f64,
    #[serde(default = "default_cutoff")]
    pub cutoff: usize,
}

impl Default for DynamicCutoffConfig {
    fn default() -> Self {
        Self {
            max_conflict: default_max_conflict(),
            max_theta: default_max_theta(),
            cutoff: default_cutoff(),
        }
    }
}

fn default_max_conflict() -> f64 {
    0.5
}

fn default_max_theta() -> f64 {
    0.5
}

fn default_cutoff() -> usize {
    2
}

/// Prediction-time resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionConfig {
    /// Worker threads used for a predict batch.
    #[serde(default = "default_threads")]
    pub threads: usize,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            threads: default_threads(),
        }
    }
}

fn default_threads() -> usize {
    1
}

/// Cross-validation and statistics settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    #[serde(default = "default_folds")]
    pub folds: usize,
    /// Confidence intervals are two-sided at level `1 - alpha`.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Shuffle instances before splitting; `None` keeps dataset order.
    #[serde(default)]
    pub shuffle_seed: Option<u64>,
    /// Largest recommendation-list length to score; defaults to all actions.
    #[serde(default)]
    pub max_cutoff: Option<usize>,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            folds: default_folds(),
            alpha: default_alpha(),
            shuffle_seed: None,
            max_cutoff: None,
        }
    }
}

fn default_folds() -> usize {
    10
}

fn default_alpha() -> f64 {
    0.1
}
