//! Logging configuration.
//!
//! Read from `HOMEREC_LOG`, `RUST_LOG` and `HOMEREC_LOG_FORMAT`; an embedding
//! application may override both level and format.

use serde::{Deserialize, Serialize};

/// Environment variable holding the log level.
pub const ENV_LOG_LEVEL: &str = "HOMEREC_LOG";
/// Environment variable holding the log format.
pub const ENV_LOG_FORMAT: &str = "HOMEREC_LOG_FORMAT";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines on stderr.
    #[default]
    Human,
    /// One JSON object per event.
    Jsonl,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Human => "human",
            LogFormat::Jsonl => "jsonl",
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" | "text" | "pretty" => Ok(LogFormat::Human),
            "jsonl" | "json" => Ok(LogFormat::Jsonl),
            other => Err(format!("unknown log format '{other}' (expected human or jsonl)")),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimum level that is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Off,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = match s.trim().to_ascii_lowercase().as_str() {
            "warning" => "warn".to_string(),
            "none" | "quiet" | "silent" => "off".to_string(),
            other => other.to_string(),
        };
        LogLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == wanted)
            .ok_or_else(|| format!("unknown log level '{s}'"))
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<LogLevel> for tracing_subscriber::filter::LevelFilter {
    fn from(level: LogLevel) -> Self {
        use tracing_subscriber::filter::LevelFilter;
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Off => LevelFilter::OFF,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub format: LogFormat,
    pub level: LogLevel,
    /// Timestamps in human output.
    pub timestamps: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            format: LogFormat::Human,
            level: LogLevel::Info,
            timestamps: true,
        }
    }
}

impl LogConfig {
    /// Build from the environment, then apply explicit overrides.
    ///
    /// `HOMEREC_LOG` wins over `RUST_LOG`; unparsable values are ignored.
    pub fn from_env(level: Option<LogLevel>, format: Option<LogFormat>) -> Self {
        Self::from_vars(
            std::env::var(ENV_LOG_LEVEL).ok().as_deref(),
            std::env::var("RUST_LOG").ok().as_deref(),
            std::env::var(ENV_LOG_FORMAT).ok().as_deref(),
        )
        .overridden(level, format)
    }

    fn from_vars(homerec_log: Option<&str>, rust_log: Option<&str>, format: Option<&str>) -> Self {
        let mut config = LogConfig::default();

        if let Some(val) = homerec_log {
            if let Ok(level) = val.parse::<LogLevel>() {
                config.level = level;
            }
        } else if let Some(val) = rust_log {
            // Coarse: RUST_LOG directives are handed to EnvFilter verbatim,
            // this only picks the level used when no filter applies.
            for (needle, level) in [
                ("trace", LogLevel::Trace),
                ("debug", LogLevel::Debug),
                ("warn", LogLevel::Warn),
                ("error", LogLevel::Error),
            ] {
                if val.contains(needle) {
                    config.level = level;
                    break;
                }
            }
        }

        if let Some(format) = format.and_then(|v| v.parse::<LogFormat>().ok()) {
            config.format = format;
        }
        config
    }

    fn overridden(mut self, level: Option<LogLevel>, format: Option<LogFormat>) -> Self {
        if let Some(level) = level {
            self.level = level;
        }
        if let Some(format) = format {
            self.format = format;
        }
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.timestamps = enabled;
        self
    }
}
