//! Detector configuration.

use crate::error::{Result, ScanError};
use serde::{Deserialize, Serialize};

/// Tunables for a [`PatternDetector`](super::PatternDetector).
///
/// Runtime setters on the detector assign values without checks; call
/// [`DetectorConfig::validate`] (or construct with
/// [`PatternDetector::try_with_config`](super::PatternDetector::try_with_config))
/// when a bounds check is wanted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Minimum best-match similarity counted as a detection.
    pub match_threshold: f64,
    /// Multiplier applied to every history entry by `decay_history`.
    pub decay_factor: f64,
    /// Registry capacity; the oldest pattern is evicted beyond this.
    pub max_patterns: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            match_threshold: 0.78,
            decay_factor: 0.95,
            max_patterns: 50,
        }
    }
}

impl DetectorConfig {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.match_threshold = threshold;
        self
    }

    pub fn with_decay_factor(mut self, factor: f64) -> Self {
        self.decay_factor = factor;
        self
    }

    pub fn with_max_patterns(mut self, max: usize) -> Self {
        self.max_patterns = max;
        self
    }

    /// Reject non-finite values, a decay factor outside [0, 1] and a zero
    /// capacity. Thresholds above 1 are accepted: they disable detection.
    pub fn validate(&self) -> Result<()> {
        if !self.match_threshold.is_finite() {
            return Err(ScanError::InvalidConfig(format!(
                "match_threshold must be finite, got {}",
                self.match_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.decay_factor) {
            return Err(ScanError::InvalidConfig(format!(
                "decay_factor must be within [0, 1], got {}",
                self.decay_factor
            )));
        }
        if self.max_patterns == 0 {
            return Err(ScanError::InvalidConfig(
                "max_patterns must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = DetectorConfig::default();
        assert_eq!(cfg.match_threshold, 0.78);
        assert_eq!(cfg.decay_factor, 0.95);
        assert_eq!(cfg.max_patterns, 50);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(DetectorConfig::default()
            .with_threshold(f64::NAN)
            .validate()
            .is_err());
        assert!(DetectorConfig::default()
            .with_decay_factor(1.5)
            .validate()
            .is_err());
        assert!(DetectorConfig::default()
            .with_max_patterns(0)
            .validate()
            .is_err());
        assert!(DetectorConfig::default()
            .with_threshold(1.2)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg: DetectorConfig = serde_json::from_str(r#"{"max_patterns": 5}"#).unwrap();
        assert_eq!(cfg.max_patterns, 5);
        assert_eq!(cfg.match_threshold, 0.78);
    }
}
