//! Leveled asset status lines.

use chrono::Local;
use std::convert::Infallible;
use std::str::FromStr;
use tracing::{debug, error, info, warn};

/// Severity of an asset status line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AssetLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    /// Emitted at `tracing`'s ERROR level, which is its most severe.
    Critical,
}

impl FromStr for AssetLevel {
    type Err = Infallible;

    /// Case-insensitive; unknown names map to [`AssetLevel::Info`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "debug" => AssetLevel::Debug,
            "warning" | "warn" => AssetLevel::Warning,
            "error" => AssetLevel::Error,
            "critical" => AssetLevel::Critical,
            _ => AssetLevel::Info,
        })
    }
}

/// `[<local time>] Asset <id>: <status>`
pub fn format_asset_status(asset_id: &str, status: &str) -> String {
    let ts = Local::now().format("%Y-%m-%d %H:%M:%S");
    format!("[{}] Asset {}: {}", ts, asset_id, status)
}

/// Emit an asset status line at `level` and return it.
pub fn log_asset_status(asset_id: &str, status: &str, level: AssetLevel) -> String {
    let msg = format_asset_status(asset_id, status);
    match level {
        AssetLevel::Debug => debug!(asset = asset_id, "{}", msg),
        AssetLevel::Info => info!(asset = asset_id, "{}", msg),
        AssetLevel::Warning => warn!(asset = asset_id, "{}", msg),
        AssetLevel::Error => error!(asset = asset_id, "{}", msg),
        AssetLevel::Critical => error!(asset = asset_id, critical = true, "{}", msg),
    }
    msg
}
