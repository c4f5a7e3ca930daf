//! Structured logging setup.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the embedding application (or a test) via [`init_logging`].
//!
//! - Human-readable lines on stderr for interactive use
//! - JSON lines on stderr for experiment pipelines
//!
//! ```ignore
//! use homerec_core::logging::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::from_env(None, None));
//! ```

pub mod config;

pub use config::{LogConfig, LogFormat, LogLevel};

use std::io::IsTerminal;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Event targets used across the crate.
pub mod event_names {
    pub const CLASSIFIER_FIT: &str = "classifier.fit";
    pub const CLASSIFIER_PREDICT: &str = "classifier.predict";
    pub const FUSION_SATURATED: &str = "fusion.saturated";
    pub const EXPERIMENT_STARTED: &str = "experiment.started";
    pub const EXPERIMENT_FOLD: &str = "experiment.fold";
    pub const EXPERIMENT_FINISHED: &str = "experiment.finished";
}

/// Install the global subscriber.
///
/// `RUST_LOG` directives take precedence over `config.level`. Returns `false`
/// when a subscriber was already installed, which makes repeated calls from
/// tests harmless.
pub fn init_logging(config: &LogConfig) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::default().add_directive(LevelFilter::from(config.level).into())
    });

    let installed = match config.format {
        LogFormat::Human => {
            let layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(std::io::stderr().is_terminal());
            if config.timestamps {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(layer)
                    .try_init()
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(layer.without_time())
                    .try_init()
            }
        }
        LogFormat::Jsonl => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };
    installed.is_ok()
}

/// Initialize from the environment with no overrides.
pub fn init_default_logging() -> bool {
    init_logging(&LogConfig::from_env(None, None))
}

/// Short unique id correlating the log lines of one experiment run.
pub fn generate_run_id() -> String {
    let uuid = uuid::Uuid::new_v4().simple().to_string();
    format!("run-{}", &uuid[..12])
}
