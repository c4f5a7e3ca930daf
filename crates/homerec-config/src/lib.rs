//! Recommender configuration loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for `homerec.json`
//! - Config resolution (explicit path → env → XDG → defaults)
//! - Semantic validation

pub mod recommender;
pub mod resolve;
pub mod validate;

pub use recommender::{
    BinningConfig, DynamicCutoffConfig, EvaluationConfig, EvidenceConfig, PredictionConfig,
    RecommenderConfig,
};
pub use resolve::{load_config, resolve_config_path, ConfigSource, LoadedConfig};
pub use validate::{validate_config, ValidationError, ValidationResult};

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";
