//! Sliding-window watch over a numeric event stream.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, warn};

pub const DEFAULT_WINDOW: usize = 100;
pub const DEFAULT_MULTIPLIER: f64 = 1.5;

/// Outcome of [`StreamWatch::check_for_anomalies`].
#[derive(Clone, Debug, PartialEq)]
pub enum WatchStatus {
    NoData,
    Stable,
    /// Values in the window above `mean * multiplier`, in arrival order.
    AnomalyDetected(Vec<f64>),
}

/// Summary of the current window.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WindowStats {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Sample standard deviation; `None` with fewer than two values.
    pub std_dev: Option<f64>,
}

/// Values strictly above `mean(values) * multiplier`; `None` if the input is
/// empty or nothing qualifies.
pub fn detect_anomalous_patterns(values: &[f64], multiplier: f64) -> Option<Vec<f64>> {
    if values.is_empty() {
        return None;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let threshold = mean * multiplier;
    let outliers: Vec<f64> = values.iter().copied().filter(|v| *v > threshold).collect();
    if outliers.is_empty() {
        None
    } else {
        Some(outliers)
    }
}

/// Keeps the most recent `capacity` values; older ones fall off the front.
#[derive(Clone, Debug)]
pub struct StreamWatch {
    events: VecDeque<f64>,
    capacity: usize,
    multiplier: f64,
}

impl Default for StreamWatch {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl StreamWatch {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
            multiplier: DEFAULT_MULTIPLIER,
        }
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub fn add_event(&mut self, value: f64) {
        if self.capacity == 0 {
            return;
        }
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(value);
        debug!(value, window = self.events.len(), "EVENT_ADDED");
    }

    pub fn check_for_anomalies(&self) -> WatchStatus {
        if self.events.is_empty() {
            return WatchStatus::NoData;
        }
        let window: Vec<f64> = self.events.iter().copied().collect();
        match detect_anomalous_patterns(&window, self.multiplier) {
            Some(outliers) => {
                warn!(?outliers, "Anomalies detected");
                WatchStatus::AnomalyDetected(outliers)
            }
            None => WatchStatus::Stable,
        }
    }

    pub fn statistics(&self) -> Option<WindowStats> {
        if self.events.is_empty() {
            return None;
        }
        let count = self.events.len();
        let mean = self.events.iter().sum::<f64>() / count as f64;
        let min = self.events.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.events.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let std_dev = (count > 1).then(|| {
            let var = self.events.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>()
                / (count - 1) as f64;
            var.sqrt()
        });
        Some(WindowStats {
            count,
            mean,
            min,
            max,
            std_dev,
        })
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_data() {
        let watch = StreamWatch::default();
        assert_eq!(watch.check_for_anomalies(), WatchStatus::NoData);
        assert!(watch.statistics().is_none());
    }

    #[test]
    fn test_stable_and_anomalous() {
        let mut watch = StreamWatch::new(10);
        for v in [10.0, 11.0, 9.0, 10.0] {
            watch.add_event(v);
        }
        assert_eq!(watch.check_for_anomalies(), WatchStatus::Stable);

        watch.add_event(40.0); // mean 16, threshold 24
        assert_eq!(
            watch.check_for_anomalies(),
            WatchStatus::AnomalyDetected(vec![40.0])
        );
    }

    #[test]
    fn test_window_drops_oldest() {
        let mut watch = StreamWatch::new(3);
        for v in [100.0, 1.0, 1.0, 1.0] {
            watch.add_event(v);
        }
        assert_eq!(watch.len(), 3);
        assert_eq!(watch.check_for_anomalies(), WatchStatus::Stable);
    }

    #[test]
    fn test_statistics() {
        let mut watch = StreamWatch::new(10);
        for v in [2.0, 4.0, 6.0] {
            watch.add_event(v);
        }
        let stats = watch.statistics().unwrap();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.mean, 4.0);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 6.0);
        assert!((stats.std_dev.unwrap() - 2.0).abs() < 1e-10);

        let mut single = StreamWatch::new(2);
        single.add_event(5.0);
        assert_eq!(single.statistics().unwrap().std_dev, None);
    }

    #[test]
    fn test_detect_anomalous_patterns_empty() {
        assert_eq!(detect_anomalous_patterns(&[], 1.5), None);
    }
}
