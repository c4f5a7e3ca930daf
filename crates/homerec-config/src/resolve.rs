//! Configuration resolution and path discovery.
//!
//! Resolution order: explicit path → environment variables → XDG path → defaults.

use std::path::{Path, PathBuf};

use crate::recommender::RecommenderConfig;
use crate::validate::{validate_config, ValidationResult};

/// Where the configuration was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly provided by the caller.
    Explicit,

    /// Set via environment variable.
    Environment,

    /// Found in XDG config directory.
    XdgConfig,

    /// Using built-in defaults.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Explicit => write!(f, "explicit path"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// Environment variable names.
pub const ENV_CONFIG_PATH: &str = "HOMEREC_CONFIG";
pub const ENV_CONFIG_DIR: &str = "HOMEREC_CONFIG_DIR";

/// Standard config file name.
pub const CONFIG_FILENAME: &str = "homerec.json";

/// Application name for XDG directories.
const APP_NAME: &str = "homerec";

/// A validated configuration plus where it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: RecommenderConfig,
    pub path: Option<PathBuf>,
    pub source: ConfigSource,
}

/// Resolve the configuration file path.
///
/// 1. Explicit path (if provided and present)
/// 2. `HOMEREC_CONFIG`
/// 3. `HOMEREC_CONFIG_DIR` + `homerec.json`
/// 4. XDG config directory (`~/.config/homerec/homerec.json`)
/// 5. Built-in defaults (None)
pub fn resolve_config_path(explicit: Option<&Path>) -> (Option<PathBuf>, ConfigSource) {
    if let Some(path) = explicit {
        if path.exists() {
            return (Some(path.to_path_buf()), ConfigSource::Explicit);
        }
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_PATH) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return (Some(path), ConfigSource::Environment);
        }
    }

    if let Ok(config_dir) = std::env::var(ENV_CONFIG_DIR) {
        let path = PathBuf::from(config_dir).join(CONFIG_FILENAME);
        if path.exists() {
            return (Some(path), ConfigSource::Environment);
        }
    }

    if let Some(path) = xdg_config_path() {
        if path.exists() {
            return (Some(path), ConfigSource::XdgConfig);
        }
    }

    (None, ConfigSource::BuiltinDefault)
}

/// Load and validate the configuration using the resolution order.
pub fn load_config(explicit: Option<&Path>) -> ValidationResult<LoadedConfig> {
    let (path, source) = resolve_config_path(explicit);
    let config = match &path {
        Some(p) => RecommenderConfig::from_file(p)?,
        None => RecommenderConfig::default(),
    };
    validate_config(&config)?;
    Ok(LoadedConfig {
        config,
        path,
        source,
    })
}

/// The XDG location of `homerec.json`.
pub fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME).join(CONFIG_FILENAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_source_display() {
        assert_eq!(format!("{}", ConfigSource::Explicit), "explicit path");
        assert_eq!(
            format!("{}", ConfigSource::Environment),
            "environment variable"
        );
        assert_eq!(format!("{}", ConfigSource::XdgConfig), "XDG config");
        assert_eq!(
            format!("{}", ConfigSource::BuiltinDefault),
            "builtin default"
        );
    }

    #[test]
    fn xdg_path_ends_with_filename() {
        if let Some(path) = xdg_config_path() {
            assert!(path.ends_with("homerec/homerec.json"));
        }
    }
}
