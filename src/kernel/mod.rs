//! Kernel layer: foundational math for signature matching.
//!
//! - Similarity metrics over `&[f64]` ([`Similarity`])
//! - Reproducible sample signatures and metadata ([`SampleGenerator`])
//!
//! This layer has no dependencies on [`memory`](crate::memory).
//!
//! # Example
//!
//! ```rust
//! use tokenscan::kernel::{SampleGenerator, Similarity};
//!
//! let mut gen = SampleGenerator::for_label("query", 0);
//! let a = gen.vector(16);
//! let b = gen.vector(16);
//! let sim = Similarity::cosine(&a, &b);
//! assert!((-1.0..=1.0).contains(&sim));
//! ```

pub mod generator;
pub mod similarity;

pub use generator::{SampleGenerator, DEFAULT_SIGNATURE_LEN};
pub use similarity::Similarity;
