//! Similarity metrics for signature comparison.
//!
//! Every function works on plain `&[f64]` slices. The unchecked variants
//! (`cosine`, `dot`) assume equal lengths and panic otherwise; the
//! `checked_*` variants report a [`ScanError::DimensionMismatch`] instead.

use crate::error::{Result, ScanError};

/// Similarity computation for signature vectors.
pub struct Similarity;

impl Similarity {
    /// Cosine similarity: dot(a, b) / (||a|| * ||b||)
    ///
    /// Returns a value in [-1, 1] where:
    /// - 1 means identical direction
    /// - 0 means orthogonal, or either vector has zero magnitude
    /// - -1 means opposite
    pub fn cosine(a: &[f64], b: &[f64]) -> f64 {
        let dot = Self::dot(a, b);
        let norm_a = Self::norm(a);
        let norm_b = Self::norm(b);

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        dot / (norm_a * norm_b)
    }

    /// Cosine similarity that rejects vectors of different length.
    pub fn checked_cosine(a: &[f64], b: &[f64]) -> Result<f64> {
        Self::check_dimensions(a, b)?;
        Ok(Self::cosine(a, b))
    }

    /// Raw dot product.
    pub fn dot(a: &[f64], b: &[f64]) -> f64 {
        assert_eq!(a.len(), b.len(), "Dimension mismatch in dot product");

        a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
    }

    /// L2 norm.
    pub fn norm(a: &[f64]) -> f64 {
        a.iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    /// Fail with [`ScanError::DimensionMismatch`] unless `a` and `b` have
    /// the same length. `expected` is the length of `b` (the stored side).
    pub fn check_dimensions(a: &[f64], b: &[f64]) -> Result<()> {
        if a.len() != b.len() {
            return Err(ScanError::DimensionMismatch {
                expected: b.len(),
                got: a.len(),
            });
        }
        Ok(())
    }
}
