//! PatternDetector: a bounded registry of signature vectors scored by
//! cosine similarity.
//!
//! Each call to [`PatternDetector::score`] records the best match in a score
//! history, which can be averaged and decayed. Matching is a brute-force scan
//! over every stored record.
//!
//! # Example
//!
//! ```rust
//! use tokenscan::memory::PatternDetector;
//!
//! let mut detector = PatternDetector::new("risk-engine");
//! detector.add(vec![1.0, 0.0, 0.0], Default::default());
//! detector.add(vec![0.0, 1.0, 0.0], Default::default());
//!
//! let query = vec![0.9, 0.1, 0.0];
//! assert!(detector.detect(&query).unwrap());
//!
//! let top = detector.explain_top_matches(&query, 1).unwrap();
//! assert_eq!(top[0].id, "pt_1");
//! ```

use super::config::DetectorConfig;
use crate::error::Result;
use crate::kernel::Similarity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::path::Path;
use tracing::{debug, trace};

/// Number of matches returned by `explain_top_matches` when the caller has
/// no preference.
pub const DEFAULT_TOP_N: usize = 3;

// =============================================================================
// Records
// =============================================================================

/// A stored signature with its metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatternRecord {
    /// `pt_<n>`, sequential within one detector and never reused.
    pub id: String,
    pub signature: Vec<f64>,
    pub metadata: HashMap<String, Value>,
    pub created_at: DateTime<Utc>,
}

/// One line of [`PatternDetector::explain_top_matches`] output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchExplanation {
    pub id: String,
    pub score: f64,
}

/// Snapshot returned by [`PatternDetector::summary`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectorSummary {
    pub model_id: String,
    pub patterns_stored: usize,
    pub recent_avg_score: f64,
}

// =============================================================================
// PatternDetector
// =============================================================================

/// Signature registry with cosine-similarity matching.
///
/// The detector is a plain owned value: construct it, use it through
/// `&mut self`, drop it. Nothing is shared between instances, including the
/// id counter.
#[derive(Debug, Serialize, Deserialize)]
pub struct PatternDetector {
    model_id: String,
    config: DetectorConfig,
    patterns: VecDeque<PatternRecord>,
    recent_scores: Vec<f64>,
    next_id: u64,
}

impl PatternDetector {
    /// Create an empty detector with the default configuration.
    pub fn new(model_id: impl Into<String>) -> Self {
        Self::with_config(model_id, DetectorConfig::default())
    }

    /// Create an empty detector with the given configuration, unchecked.
    pub fn with_config(model_id: impl Into<String>, config: DetectorConfig) -> Self {
        Self {
            model_id: model_id.into(),
            config,
            patterns: VecDeque::new(),
            recent_scores: Vec::new(),
            next_id: 1,
        }
    }

    /// Like [`with_config`](Self::with_config) but runs
    /// [`DetectorConfig::validate`] first.
    pub fn try_with_config(model_id: impl Into<String>, config: DetectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_config(model_id, config))
    }

    // -------------------------------------------------------------------------
    // Registry
    // -------------------------------------------------------------------------

    /// Store a signature, evicting the oldest records while over capacity.
    ///
    /// Returns a copy of the new record. Signatures are not checked against
    /// each other; a length mismatch surfaces when a query is scored.
    pub fn add(&mut self, signature: Vec<f64>, metadata: HashMap<String, Value>) -> PatternRecord {
        let record = PatternRecord {
            id: format!("pt_{}", self.next_id),
            signature,
            metadata,
            created_at: Utc::now(),
        };
        self.next_id += 1;
        self.patterns.push_back(record.clone());
        self.evict_overflow();
        record
    }

    /// Remove a record by id. Returns `true` if it existed.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.patterns.iter().position(|p| p.id == id) {
            Some(idx) => self.patterns.remove(idx).is_some(),
            None => false,
        }
    }

    pub fn get(&self, id: &str) -> Option<&PatternRecord> {
        self.patterns.iter().find(|p| p.id == id)
    }

    /// Stored records, oldest first.
    pub fn patterns(&self) -> impl Iterator<Item = &PatternRecord> {
        self.patterns.iter()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    fn evict_overflow(&mut self) {
        while self.patterns.len() > self.config.max_patterns {
            if let Some(evicted) = self.patterns.pop_front() {
                debug!(
                    model = %self.model_id,
                    pattern_id = %evicted.id,
                    capacity = self.config.max_patterns,
                    "evicted oldest pattern"
                );
            }
        }
    }

    // -------------------------------------------------------------------------
    // Scoring
    // -------------------------------------------------------------------------

    /// Best cosine similarity between `query` and any stored signature.
    ///
    /// The running maximum starts at 0, so an empty registry or a query that
    /// is anti-correlated with everything scores 0. The result is appended to
    /// the score history. An empty query returns 0 without touching history.
    ///
    /// Fails with [`ScanError::DimensionMismatch`](crate::ScanError) if any
    /// stored signature differs in length from `query`; history is left
    /// unchanged in that case.
    pub fn score(&mut self, query: &[f64]) -> Result<f64> {
        if query.is_empty() {
            return Ok(0.0);
        }

        let mut max_score = 0.0_f64;
        for pattern in &self.patterns {
            let sim = Similarity::checked_cosine(query, &pattern.signature)?;
            max_score = max_score.max(sim);
        }

        trace!(model = %self.model_id, score = max_score, "scored query");
        self.recent_scores.push(max_score);
        Ok(max_score)
    }

    /// [`score`](Self::score) for a query that may be absent; `None` scores 0
    /// and leaves history untouched.
    pub fn score_optional(&mut self, query: Option<&[f64]>) -> Result<f64> {
        match query {
            Some(q) => self.score(q),
            None => Ok(0.0),
        }
    }

    /// `true` iff `score(query) >= match_threshold`.
    pub fn detect(&mut self, query: &[f64]) -> Result<bool> {
        let score = self.score(query)?;
        Ok(score >= self.config.match_threshold)
    }

    /// Per-record similarity, sorted descending, truncated to `top_n`.
    ///
    /// Does not touch the score history. Equal scores keep insertion order
    /// (stable sort). An empty query scores every record 0.
    pub fn explain_top_matches(&self, query: &[f64], top_n: usize) -> Result<Vec<MatchExplanation>> {
        let mut scored = self
            .patterns
            .iter()
            .map(|p| {
                let score = if query.is_empty() {
                    0.0
                } else {
                    Similarity::checked_cosine(query, &p.signature)?
                };
                Ok(MatchExplanation {
                    id: p.id.clone(),
                    score,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_n);
        Ok(scored)
    }

    // -------------------------------------------------------------------------
    // History
    // -------------------------------------------------------------------------

    /// Arithmetic mean of the score history, 0 when empty.
    pub fn average_recent_score(&self) -> f64 {
        if self.recent_scores.is_empty() {
            return 0.0;
        }
        self.recent_scores.iter().sum::<f64>() / self.recent_scores.len() as f64
    }

    /// Multiply every history entry by the decay factor.
    pub fn decay_history(&mut self) {
        let factor = self.config.decay_factor;
        for s in self.recent_scores.iter_mut() {
            *s *= factor;
        }
    }

    pub fn history(&self) -> &[f64] {
        &self.recent_scores
    }

    pub fn clear_history(&mut self) {
        self.recent_scores.clear();
    }

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Overwrite the match threshold. No bounds check.
    pub fn set_threshold(&mut self, threshold: f64) {
        self.config.match_threshold = threshold;
    }

    /// Overwrite the decay factor. No bounds check.
    pub fn set_decay_factor(&mut self, factor: f64) {
        self.config.decay_factor = factor;
    }

    /// Overwrite the capacity and evict immediately if now over it.
    pub fn set_max_patterns(&mut self, max: usize) {
        self.config.max_patterns = max;
        self.evict_overflow();
    }

    pub fn summary(&self) -> DetectorSummary {
        DetectorSummary {
            model_id: self.model_id.clone(),
            patterns_stored: self.patterns.len(),
            recent_avg_score: self.average_recent_score(),
        }
    }

    // -------------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------------

    /// Persist records, history, configuration and id counter as JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a detector previously written by [`save`](Self::save).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

// =============================================================================
// Tests
// =============================================================================
