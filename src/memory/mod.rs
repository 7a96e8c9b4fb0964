//! Memory layer: bounded signature registry with similarity matching.
//!
//! This module provides:
//!
//! - [`PatternDetector`] — stores signature vectors with metadata, scores
//!   queries by best cosine similarity and keeps a decayable score history.
//!
//! - [`DetectorConfig`] — threshold, decay factor and capacity.
//!
//! # Usage
//!
//! ```rust
//! use tokenscan::kernel::SampleGenerator;
//! use tokenscan::memory::{DetectorConfig, PatternDetector};
//!
//! let mut gen = SampleGenerator::for_label("patterns", 0);
//! let mut detector = PatternDetector::with_config(
//!     "ai-risk-engine-v2",
//!     DetectorConfig::default().with_max_patterns(10),
//! );
//!
//! for _ in 0..30 {
//!     detector.add(gen.vector(16), gen.metadata());
//! }
//! assert_eq!(detector.len(), 10);
//!
//! let query = gen.vector(16);
//! let matched = detector.detect(&query).unwrap();
//! let explanation = detector.explain_top_matches(&query, 2).unwrap();
//! println!("matched={} top={:?}", matched, explanation);
//! ```

pub mod config;
pub mod detector;

pub use config::DetectorConfig;
pub use detector::{DetectorSummary, MatchExplanation, PatternDetector, PatternRecord, DEFAULT_TOP_N};
