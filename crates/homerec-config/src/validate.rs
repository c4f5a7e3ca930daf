//! Configuration validation errors and semantic validation.

use thiserror::Error;

use crate::recommender::{BinningConfig, DynamicCutoffConfig, RecommenderConfig};

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Configuration validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::IoError(_) => 60,
            ValidationError::ParseError(_) => 61,
            ValidationError::InvalidValue { .. } => 65,
            ValidationError::VersionMismatch { .. } => 66,
        }
    }
}

fn invalid(field: &str, message: impl Into<String>) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        message: message.into(),
    }
}

/// Validate a recommender configuration semantically.
pub fn validate_config(config: &RecommenderConfig) -> ValidationResult<()> {
    if config.schema_version != crate::CONFIG_SCHEMA_VERSION {
        return Err(ValidationError::VersionMismatch {
            expected: crate::CONFIG_SCHEMA_VERSION.to_string(),
            actual: config.schema_version.clone(),
        });
    }

    validate_binning(&config.binning)?;

    if config.evidence.min_support == 0 {
        return Err(invalid("evidence.min_support", "Must be at least 1"));
    }
    for (i, name) in config.evidence.exempt_features.iter().enumerate() {
        if config.evidence.exempt_features[..i].contains(name) {
            return Err(invalid(
                "evidence.exempt_features",
                format!("Duplicate feature '{}'", name),
            ));
        }
    }

    validate_cutoff(&config.dynamic_cutoff)?;

    if config.prediction.threads == 0 {
        return Err(invalid("prediction.threads", "Must be at least 1"));
    }

    let eval = &config.evaluation;
    if eval.folds < 2 {
        return Err(invalid(
            "evaluation.folds",
            format!("Must be at least 2, got {}", eval.folds),
        ));
    }
    if !(eval.alpha > 0.0 && eval.alpha < 1.0) {
        return Err(invalid(
            "evaluation.alpha",
            format!("Must be in (0, 1), got {}", eval.alpha),
        ));
    }
    if eval.max_cutoff == Some(0) {
        return Err(invalid("evaluation.max_cutoff", "Must be at least 1"));
    }

    Ok(())
}

fn validate_binning(binning: &BinningConfig) -> ValidationResult<()> {
    if let Some(edges) = &binning.edges {
        if edges.is_empty() {
            return Err(invalid("binning.edges", "Must contain at least one boundary"));
        }
        if edges.iter().any(|e| !e.is_finite()) {
            return Err(invalid("binning.edges", "Boundaries must be finite"));
        }
        if edges[0] < 0.0 {
            return Err(invalid(
                "binning.edges",
                format!("Elapsed times are non-negative; first edge is {}", edges[0]),
            ));
        }
        if edges.windows(2).any(|w| w[1] <= w[0]) {
            return Err(invalid("binning.edges", "Boundaries must be strictly ascending"));
        }
        return Ok(());
    }

    let BinningConfig {
        start, end, width, ..
    } = *binning;
    if !start.is_finite() || !end.is_finite() || !width.is_finite() {
        return Err(invalid("binning", "start, end and width must be finite"));
    }
    if start < 0.0 {
        return Err(invalid(
            "binning.start",
            format!("Elapsed times are non-negative; got {}", start),
        ));
    }
    if width <= 0.0 {
        return Err(invalid(
            "binning.width",
            format!("Must be positive, got {}", width),
        ));
    }
    if end <= start {
        return Err(invalid(
            "binning.end",
            format!("Must exceed start ({}), got {}", start, end),
        ));
    }
    Ok(())
}

fn validate_cutoff(cutoff: &DynamicCutoffConfig) -> ValidationResult<()> {
    for (field, value) in [
        ("dynamic_cutoff.max_conflict", cutoff.max_conflict),
        ("dynamic_cutoff.max_theta", cutoff.max_theta),
    ] {
        if !(0.0..=1.0).contains(&value) {
            return Err(invalid(field, format!("Must be in [0, 1], got {}", value)));
        }
    }
    if cutoff.cutoff == 0 {
        return Err(invalid("dynamic_cutoff.cutoff", "Must be at least 1"));
    }
    Ok(())
}
