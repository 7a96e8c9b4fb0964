//! Descriptive statistics over numeric series.
//!
//! Standard deviations here are population deviations (divide by `n`);
//! skewness and kurtosis are the bias-corrected sample estimators.

use crate::error::{Result, ScanError};
use chrono::{Local, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_ANOMALY_SIGMAS: f64 = 2.0;
pub const DEFAULT_SPIKE_FACTOR: f64 = 1.5;
pub const DEFAULT_SMOOTHING_ALPHA: f64 = 0.3;
pub const ENTROPY_BINS: usize = 10;

/// Basic shape of a series, from [`generate_features`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureSummary {
    pub average: f64,
    pub stdev: f64,
    pub max: f64,
    pub min: f64,
    pub range: f64,
}

fn mean(data: &[f64]) -> f64 {
    data.iter().sum::<f64>() / data.len() as f64
}

/// Central moment of order `k` (population).
fn central_moment(data: &[f64], k: i32) -> f64 {
    let m = mean(data);
    data.iter().map(|x| (x - m).powi(k)).sum::<f64>() / data.len() as f64
}

fn population_stdev(data: &[f64]) -> f64 {
    central_moment(data, 2).sqrt()
}

fn median(data: &[f64]) -> f64 {
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// `(max, min)`, or `None` for an empty series.
pub fn get_extremes(data: &[f64]) -> Option<(f64, f64)> {
    if data.is_empty() {
        return None;
    }
    let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = data.iter().copied().fold(f64::INFINITY, f64::min);
    Some((max, min))
}

pub fn generate_features(data: &[f64]) -> Result<FeatureSummary> {
    let (max, min) =
        get_extremes(data).ok_or_else(|| ScanError::EmptyInput("feature series".to_string()))?;
    Ok(FeatureSummary {
        average: mean(data),
        stdev: population_stdev(data),
        max,
        min,
        range: max - min,
    })
}

/// `true` if any value lies more than `sigmas` standard deviations from the
/// mean. A constant or empty series never qualifies.
pub fn detect_anomaly(data: &[f64], sigmas: f64) -> bool {
    if data.is_empty() {
        return false;
    }
    let m = mean(data);
    let limit = sigmas * population_stdev(data);
    data.iter().any(|x| (x - m).abs() > limit)
}

/// `true` if any value lies more than `factor` median absolute deviations
/// from the median.
pub fn detect_spike(data: &[f64], factor: f64) -> bool {
    if data.is_empty() {
        return false;
    }
    let med = median(data);
    let deviations: Vec<f64> = data.iter().map(|x| (x - med).abs()).collect();
    let mad = median(&deviations);
    deviations.iter().any(|d| *d > factor * mad)
}

/// Mean of every full window of length `window`, left to right.
pub fn rolling_window_features(data: &[f64], window: usize) -> Vec<f64> {
    if window == 0 {
        return Vec::new();
    }
    data.windows(window)
        .map(|w| w.iter().sum::<f64>() / window as f64)
        .collect()
}

/// Trailing moving average of length `n`, computed from a running sum.
pub fn moving_average(data: &[f64], n: usize) -> Vec<f64> {
    if n == 0 || data.len() < n {
        return Vec::new();
    }
    let mut sum: f64 = data[..n].iter().sum();
    let mut out = Vec::with_capacity(data.len() - n + 1);
    out.push(sum / n as f64);
    for i in n..data.len() {
        sum += data[i] - data[i - n];
        out.push(sum / n as f64);
    }
    out
}

/// `r[0] = s[0]`, `r[i] = alpha * s[i] + (1 - alpha) * r[i-1]`.
pub fn exponential_smoothing(series: &[f64], alpha: f64) -> Vec<f64> {
    let mut out: Vec<f64> = Vec::with_capacity(series.len());
    for &s in series {
        let next = match out.last() {
            Some(prev) => alpha * s + (1.0 - alpha) * prev,
            None => s,
        };
        out.push(next);
    }
    out
}

/// Shannon entropy (natural log) of a [`ENTROPY_BINS`]-bin equal-width
/// histogram spanning the data. 0 for empty or constant input.
pub fn calculate_entropy(values: &[f64]) -> f64 {
    let (max, min) = match get_extremes(values) {
        Some(e) => e,
        None => return 0.0,
    };
    if max == min {
        return 0.0;
    }

    let width = (max - min) / ENTROPY_BINS as f64;
    let mut counts = [0usize; ENTROPY_BINS];
    for &v in values {
        // the top edge belongs to the last bin
        let idx = (((v - min) / width).floor() as usize).min(ENTROPY_BINS - 1);
        counts[idx] += 1;
    }

    let total = values.len() as f64;
    counts
        .iter()
        .filter(|c| **c > 0)
        .map(|&c| {
            let p = c as f64 / total;
            -p * p.ln()
        })
        .sum()
}

/// Adjusted Fisher-Pearson skewness; `None` below three values.
pub fn calculate_skewness(data: &[f64]) -> Option<f64> {
    let n = data.len() as f64;
    if data.len() < 3 {
        return None;
    }
    let m2 = central_moment(data, 2);
    if m2 == 0.0 {
        return Some(0.0);
    }
    let g1 = central_moment(data, 3) / m2.powf(1.5);
    Some((n * (n - 1.0)).sqrt() / (n - 2.0) * g1)
}

/// Bias-corrected excess kurtosis; `None` below four values.
pub fn calculate_kurtosis(data: &[f64]) -> Option<f64> {
    let n = data.len() as f64;
    if data.len() < 4 {
        return None;
    }
    let m2 = central_moment(data, 2);
    if m2 == 0.0 {
        return Some(0.0);
    }
    let g2 = central_moment(data, 4) / (m2 * m2) - 3.0;
    Some(((n + 1.0) * g2 + 6.0) * (n - 1.0) / ((n - 2.0) * (n - 3.0)))
}

/// Coarse time-of-day bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPhase {
    Morning,
    Afternoon,
    Evening,
}

impl DayPhase {
    /// Before 12 is morning, before 18 afternoon, otherwise evening.
    pub fn from_hour(hour: u32) -> Self {
        if hour < 12 {
            DayPhase::Morning
        } else if hour < 18 {
            DayPhase::Afternoon
        } else {
            DayPhase::Evening
        }
    }

    /// Phase of the local wall clock.
    pub fn current() -> Self {
        Self::from_hour(Local::now().hour())
    }
}

impl fmt::Display for DayPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DayPhase::Morning => "morning",
            DayPhase::Afternoon => "afternoon",
            DayPhase::Evening => "evening",
        })
    }
}
