//! Market signal helpers: strength, smoothing, banding and direction.

use crate::error::{Result, ScanError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One market observation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub volume: f64,
    pub momentum: f64,
    pub volatility: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalLevel {
    High,
    Mid,
    Low,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarketDirection {
    Upward,
    Downward,
    Stable,
}

impl fmt::Display for MarketDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MarketDirection::Upward => "UPWARD",
            MarketDirection::Downward => "DOWNWARD",
            MarketDirection::Stable => "STABLE",
        })
    }
}

/// `volume * momentum / max(1, volatility)`
pub fn signal_strength(point: &DataPoint) -> f64 {
    point.volume * point.momentum / point.volatility.max(1.0)
}

pub fn fetch_market_signals(points: &[DataPoint]) -> Vec<f64> {
    points.iter().map(signal_strength).collect()
}

/// Signals strictly above `threshold`.
pub fn detect_outliers(signals: &[f64], threshold: f64) -> Vec<f64> {
    signals.iter().copied().filter(|s| *s > threshold).collect()
}

/// Exponential smoothing seeded with the first signal:
/// `r[i] = r[i-1] * smoothing + s[i] * (1 - smoothing)`.
pub fn refine_signals(signals: &[f64], smoothing: f64) -> Vec<f64> {
    let mut refined: Vec<f64> = Vec::with_capacity(signals.len());
    for &s in signals {
        let next = match refined.last() {
            Some(prev) => prev * smoothing + s * (1.0 - smoothing),
            None => s,
        };
        refined.push(next);
    }
    refined
}

/// HIGH above 15, MID above 8, LOW otherwise.
pub fn classify_signal_levels(refined: &[f64]) -> Vec<SignalLevel> {
    refined
        .iter()
        .map(|&s| {
            if s > 15.0 {
                SignalLevel::High
            } else if s > 8.0 {
                SignalLevel::Mid
            } else {
                SignalLevel::Low
            }
        })
        .collect()
}

/// Compare the last refined value with the first.
pub fn market_direction(refined: &[f64]) -> Result<MarketDirection> {
    let (first, last) = match (refined.first(), refined.last()) {
        (Some(f), Some(l)) => (*f, *l),
        _ => return Err(ScanError::EmptyInput("refined signal series".to_string())),
    };
    Ok(if last > first {
        MarketDirection::Upward
    } else if last < first {
        MarketDirection::Downward
    } else {
        MarketDirection::Stable
    })
}
