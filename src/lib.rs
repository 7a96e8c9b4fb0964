//! # tokenscan: signature matching and token risk scanning
//!
//! tokenscan bundles a few small, independent pieces used when screening
//! tokens:
//!
//! - a bounded signature registry scored by cosine similarity
//!   ([`memory::PatternDetector`]),
//! - a scan-button binder that asks two async evaluators about a token and
//!   writes the answer to a page ([`scanner::ScanBinder`]),
//! - category-tagged event logging ([`events::log_event`]),
//! - token health scoring and stream monitoring ([`health`], [`monitor`]).
//!
//! ## Quick Start
//!
//! ```rust
//! use tokenscan::kernel::SampleGenerator;
//! use tokenscan::memory::PatternDetector;
//!
//! let mut gen = SampleGenerator::for_label("quickstart", 0);
//! let mut detector = PatternDetector::new("ai-risk-engine-v2");
//!
//! let known = gen.vector(16);
//! detector.add(known.clone(), gen.metadata());
//!
//! assert!(detector.detect(&known)?);
//! println!("{:?}", detector.summary());
//! # Ok::<(), tokenscan::ScanError>(())
//! ```
//!
//! ## Layers
//!
//! - **kernel**: similarity math and sample generation, no state
//! - **memory**: the detector and its configuration
//! - **scanner**, **events**, **health**, **monitor**: independent units

pub mod error;
pub mod events;
pub mod health;
pub mod kernel;
pub mod memory;
pub mod monitor;
pub mod scanner;

// Re-exports for convenience
pub use error::{Result, ScanError};
pub use events::{batch_log, log_event, Event, LogOptions};
pub use kernel::{SampleGenerator, Similarity};
pub use memory::{DetectorConfig, DetectorSummary, MatchExplanation, PatternDetector, PatternRecord};
pub use scanner::{ScanBinder, TokenData};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_rate_falls_with_threshold() {
        let mut gen = SampleGenerator::for_label("sweep", 0);
        let mut detector = PatternDetector::new("sweep");
        for _ in 0..30 {
            detector.add(gen.vector(16), gen.metadata());
        }
        let samples = gen.vectors(10, 16);

        let mut rates = Vec::new();
        for threshold in [0.5, 0.6, 0.7, 0.8, 0.9] {
            detector.set_threshold(threshold);
            let hits = samples
                .iter()
                .filter(|v| detector.detect(v).unwrap())
                .count();
            rates.push(hits as f64 / samples.len() as f64);
        }

        for pair in rates.windows(2) {
            assert!(pair[0] >= pair[1], "rates should not increase: {:?}", rates);
        }
        assert_eq!(detector.history().len(), 50);
    }

    #[test]
    fn test_self_match_is_detected() {
        let mut gen = SampleGenerator::with_seed(11);
        let mut detector = PatternDetector::new("self");
        let stored = gen.vectors(5, 16);
        for v in &stored {
            detector.add(v.clone(), Default::default());
        }
        for v in &stored {
            assert!(detector.detect(v).unwrap());
            let top = detector.explain_top_matches(v, 1).unwrap();
            assert!((top[0].score - 1.0).abs() < 1e-10);
        }
    }
}
