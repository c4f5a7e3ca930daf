//! No-mock configuration validation + resolution tests.
//!
//! Covers:
//! - Loading real JSON files from disk
//! - Resolution order (explicit > env path > env dir > XDG > defaults)
//! - Validation failures surfacing through `load_config`

use homerec_config::resolve::{ENV_CONFIG_DIR, ENV_CONFIG_PATH};
use homerec_config::{
    load_config, resolve_config_path, ConfigSource, RecommenderConfig, ValidationError,
};
use std::env;
use std::fs;
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use tempfile::TempDir;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const KEYS: [&str; 3] = [ENV_CONFIG_PATH, ENV_CONFIG_DIR, "XDG_CONFIG_HOME"];

struct EnvGuard {
    saved: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    fn new(keys: &[&str]) -> Self {
        let saved = keys
            .iter()
            .map(|k| (k.to_string(), env::var(k).ok()))
            .collect();
        for key in keys {
            env::remove_var(key);
        }
        Self { saved }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            match value {
                Some(val) => env::set_var(key, val),
                None => env::remove_var(key),
            }
        }
    }
}

fn with_env_lock<T>(f: impl FnOnce() -> T) -> T {
    let _guard = ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    f()
}

fn write_config(path: &Path, body: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create config parent");
    }
    fs::write(path, body).expect("write config");
}

const WIDTH_5: &str = r#"{"schema_version": "1.0.0", "binning": {"width": 5.0}}"#;
const WIDTH_20: &str = r#"{"schema_version": "1.0.0", "binning": {"width": 20.0}}"#;

#[test]
fn explicit_path_wins_over_env() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(&KEYS);
        let temp = TempDir::new().expect("temp dir");
        let explicit = temp.path().join("explicit.json");
        let from_env = temp.path().join("env.json");
        write_config(&explicit, WIDTH_5);
        write_config(&from_env, WIDTH_20);
        env::set_var(ENV_CONFIG_PATH, from_env.display().to_string());

        let loaded = load_config(Some(&explicit)).expect("load");
        assert_eq!(loaded.source, ConfigSource::Explicit);
        assert_eq!(loaded.path.as_deref(), Some(explicit.as_path()));
        assert_eq!(loaded.config.binning.width, 5.0);
    });
}

#[test]
fn missing_explicit_path_falls_through_to_env() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(&KEYS);
        let temp = TempDir::new().expect("temp dir");
        let from_env = temp.path().join("env.json");
        write_config(&from_env, WIDTH_20);
        env::set_var(ENV_CONFIG_PATH, from_env.display().to_string());

        let missing = temp.path().join("missing.json");
        let (path, source) = resolve_config_path(Some(&missing));
        assert_eq!(source, ConfigSource::Environment);
        assert_eq!(path.unwrap(), from_env);
    });
}

#[test]
fn env_path_wins_over_env_dir() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(&KEYS);
        let temp = TempDir::new().expect("temp dir");
        let from_env = temp.path().join("direct.json");
        let dir = temp.path().join("dir");
        write_config(&from_env, WIDTH_5);
        write_config(&dir.join("homerec.json"), WIDTH_20);
        env::set_var(ENV_CONFIG_PATH, from_env.display().to_string());
        env::set_var(ENV_CONFIG_DIR, dir.display().to_string());

        let loaded = load_config(None).expect("load");
        assert_eq!(loaded.config.binning.width, 5.0);
    });
}

#[test]
fn env_dir_used_when_no_direct_path() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(&KEYS);
        let temp = TempDir::new().expect("temp dir");
        let dir = temp.path().join("dir");
        write_config(&dir.join("homerec.json"), WIDTH_20);
        env::set_var(ENV_CONFIG_DIR, dir.display().to_string());

        let loaded = load_config(None).expect("load");
        assert_eq!(loaded.source, ConfigSource::Environment);
        assert_eq!(loaded.config.binning.width, 20.0);
    });
}

#[test]
fn defaults_when_nothing_found() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(&KEYS);
        let temp = TempDir::new().expect("temp dir");
        env::set_var("XDG_CONFIG_HOME", temp.path().display().to_string());

        let loaded = load_config(None).expect("load");
        assert_eq!(loaded.source, ConfigSource::BuiltinDefault);
        assert!(loaded.path.is_none());
        assert_eq!(loaded.config, RecommenderConfig::default());
    });
}

#[test]
fn invalid_file_is_rejected_on_load() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(&KEYS);
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("bad.json");
        write_config(&path, r#"{"dynamic_cutoff": {"cutoff": 0}}"#);

        let err = load_config(Some(&path)).expect_err("cutoff 0 must fail");
        assert!(matches!(err, ValidationError::InvalidValue { .. }));
    });
}

#[test]
fn unparseable_file_is_parse_error() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(&KEYS);
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("garbage.json");
        write_config(&path, "binning = 3");

        let err = load_config(Some(&path)).expect_err("garbage must fail");
        assert_eq!(err.code(), 61);
    });
}
