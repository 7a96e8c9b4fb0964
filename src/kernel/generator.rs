//! Sample generator: reproducible random signatures and metadata.
//!
//! Seeds are derived from a label the same way atoms are hashed elsewhere:
//! SHA-256 of (global_seed || label), first 8 bytes, into a ChaCha8 RNG.
//! The same label and seed always yield the same stream of samples.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Default signature length used by the demo and benches.
pub const DEFAULT_SIGNATURE_LEN: usize = 16;

const ORIGINS: [&str; 2] = ["live", "historical"];
const RISK_LEVELS: [&str; 3] = ["low", "medium", "high"];

/// Produces random signatures in [-1, 1) and random pattern metadata.
pub struct SampleGenerator {
    rng: ChaCha8Rng,
}

impl SampleGenerator {
    /// Create a generator seeded directly from a number.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create a generator whose seed is derived from a label.
    pub fn for_label(label: &str, global_seed: u64) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(global_seed.to_le_bytes());
        hasher.update(label.as_bytes());
        let hash = hasher.finalize();

        let mut seed_bytes = [0u8; 8];
        seed_bytes.copy_from_slice(&hash[0..8]);
        Self::with_seed(u64::from_le_bytes(seed_bytes))
    }

    /// A signature of `len` values in [-1, 1), rounded to 4 decimals.
    pub fn vector(&mut self, len: usize) -> Vec<f64> {
        (0..len)
            .map(|_| {
                let v: f64 = self.rng.gen_range(-1.0..1.0);
                (v * 1e4).round() / 1e4
            })
            .collect()
    }

    /// `count` signatures of length `len`.
    pub fn vectors(&mut self, count: usize, len: usize) -> Vec<Vec<f64>> {
        (0..count).map(|_| self.vector(len)).collect()
    }

    /// Copy of `data` with uniform noise in [-level, level] added to each
    /// value. A non-positive `level` returns the data unchanged.
    pub fn jitter(&mut self, data: &[f64], level: f64) -> Vec<f64> {
        if level <= 0.0 {
            return data.to_vec();
        }
        data.iter()
            .map(|x| x + self.rng.gen_range(-level..=level))
            .collect()
    }

    /// Metadata with `origin`, `riskLevel` and `createdBy` keys.
    pub fn metadata(&mut self) -> HashMap<String, Value> {
        let origin = ORIGINS[usize::from(self.rng.gen_bool(0.5))];
        let risk = RISK_LEVELS[self.rng.gen_range(0..RISK_LEVELS.len())];
        let creator = self.rng.gen_range(0..10);

        let mut meta = HashMap::new();
        meta.insert("origin".to_string(), Value::from(origin));
        meta.insert("riskLevel".to_string(), Value::from(risk));
        meta.insert(
            "createdBy".to_string(),
            Value::from(format!("system_{}", creator)),
        );
        meta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        let mut g1 = SampleGenerator::for_label("detector", 42);
        let mut g2 = SampleGenerator::for_label("detector", 42);
        assert_eq!(g1.vector(16), g2.vector(16));
        assert_eq!(g1.metadata(), g2.metadata());
    }

    #[test]
    fn test_different_labels() {
        let mut g1 = SampleGenerator::for_label("a", 0);
        let mut g2 = SampleGenerator::for_label("b", 0);
        assert_ne!(g1.vector(16), g2.vector(16));
    }

    #[test]
    fn test_vector_range_and_rounding() {
        let mut g = SampleGenerator::with_seed(7);
        for v in g.vectors(20, DEFAULT_SIGNATURE_LEN) {
            assert_eq!(v.len(), DEFAULT_SIGNATURE_LEN);
            for x in v {
                assert!((-1.0..=1.0).contains(&x), "out of range: {}", x);
                assert!(((x * 1e4).round() - x * 1e4).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_jitter_stays_within_level() {
        let mut g = SampleGenerator::with_seed(5);
        let base = vec![1.0, -2.0, 0.5];
        let noisy = g.jitter(&base, 0.01);
        for (b, n) in base.iter().zip(noisy.iter()) {
            assert!((b - n).abs() <= 0.01 + 1e-12);
        }
        assert_eq!(g.jitter(&base, 0.0), base);
    }

    #[test]
    fn test_metadata_keys() {
        let mut g = SampleGenerator::with_seed(3);
        let meta = g.metadata();
        let origin = meta["origin"].as_str().unwrap();
        assert!(ORIGINS.contains(&origin));
        let risk = meta["riskLevel"].as_str().unwrap();
        assert!(RISK_LEVELS.contains(&risk));
        assert!(meta["createdBy"].as_str().unwrap().starts_with("system_"));
    }
}
