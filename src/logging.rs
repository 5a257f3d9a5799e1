//! Logging setup
//!
//! Installs a console subscriber and, optionally, a plain-text file
//! subscriber next to it. `RUST_LOG` overrides the configured level.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{Result, WireError};

/// Where and how much to log
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Default filter directive (e.g. `info` or `framewire=debug`)
    pub level: String,

    /// Append log lines to this file as well as the console
    pub file: Option<PathBuf>,
}

impl LogConfig {
    pub fn new(level: impl Into<String>, file: Option<PathBuf>) -> Self {
        Self {
            level: level.into(),
            file,
        }
    }
}

/// Install the global subscriber
///
/// Calling it again after a subscriber is set is a no-op.
pub fn init(config: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| WireError::Config(format!("invalid log level {:?}: {}", config.level, e)))?;

    let console = fmt::layer().with_target(true);

    let file = match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    WireError::Config(format!("cannot open log file {}: {}", path.display(), e))
                })?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .try_init();

    Ok(())
}
