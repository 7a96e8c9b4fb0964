//! Event logging.
//!
//! - [`log_event`] / [`batch_log`]: `[category] timestamp: details` lines
//!   with an injectable sink and time formatter.
//! - [`log_asset_status`]: leveled asset status lines.
//! - [`init_tracing`]: fmt subscriber filtered by `TOKENSCAN_LOG`.
//! - [`init_tracing_with_file`]: the same plus a size-rotating log file.

pub mod asset;
pub mod logger;
pub mod rotating;

pub use asset::{format_asset_status, log_asset_status, AssetLevel};
pub use logger::{batch_log, iso_timestamp, log_event, Event, LogOptions, Sink, TimeFormatter};
pub use rotating::RotatingFileWriter;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV: &str = "TOKENSCAN_LOG";

/// Where and how large the rotating log file may grow.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogFileConfig {
    pub dir: PathBuf,
    pub file_name: String,
    /// Rotate before the active file reaches this size.
    pub max_bytes: u64,
    /// Rotated files kept next to the active one.
    pub backups: usize,
}

impl Default for LogFileConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("logs"),
            file_name: "tokenscan.log".to_string(),
            max_bytes: 1_000_000,
            backups: 5,
        }
    }
}

impl LogFileConfig {
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }
}

/// Install a global fmt subscriber. The filter comes from [`LOG_ENV`] and
/// defaults to `info`. Does nothing if a subscriber is already installed.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Install a console layer at INFO and a rotating file layer filtered by
/// [`LOG_ENV`] (default `debug`). Fails only if the log file cannot be
/// opened; an already installed subscriber is left in place.
pub fn init_tracing_with_file(config: &LogFileConfig) -> Result<()> {
    let writer = RotatingFileWriter::new(config.path(), config.max_bytes, config.backups)?;
    let file_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("debug"));

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(writer)
        .with_filter(file_filter);
    let console_layer = fmt::layer().with_filter(LevelFilter::INFO);

    let _ = tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_defaults() {
        let cfg = LogFileConfig::default();
        assert_eq!(cfg.path(), PathBuf::from("logs").join("tokenscan.log"));
        assert_eq!(cfg.max_bytes, 1_000_000);
        assert_eq!(cfg.backups, 5);
    }

    #[test]
    fn test_init_with_file_creates_log() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = LogFileConfig {
            dir: dir.path().join("logs"),
            ..Default::default()
        };
        init_tracing_with_file(&cfg).unwrap();
        assert!(cfg.path().exists());
    }
}
