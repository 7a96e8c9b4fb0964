//! Token health scoring.
//!
//! A token starts at 100 and loses a configurable penalty for each red flag
//! found in its extension map:
//!
//! | key                      | penalised when            | default |
//! |--------------------------|---------------------------|---------|
//! | `mint_authority`         | equals `"open"`           | 30      |
//! | `owner_changed_recently` | truthy                    | 20      |
//! | `liquidity_locked`       | explicitly `false`        | 25      |
//! | `blacklisted`            | truthy                    | 50      |
//!
//! Scores floor at 0. [`HealthRadar`] exposes the score through the
//! scanner's [`RiskScorer`] seam.

use crate::scanner::{RiskScorer, TokenData};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

const BASE_SCORE: u32 = 100;

/// Points deducted per red flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthPenalties {
    pub open_mint: u32,
    pub owner_change: u32,
    pub liquidity: u32,
    pub blacklist: u32,
}

impl Default for HealthPenalties {
    fn default() -> Self {
        Self {
            open_mint: 30,
            owner_change: 20,
            liquidity: 25,
            blacklist: 50,
        }
    }
}

/// Minimum scores for each flag band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlagThresholds {
    pub safe: u32,
    pub caution: u32,
}

impl Default for FlagThresholds {
    fn default() -> Self {
        Self {
            safe: 90,
            caution: 60,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskFlag {
    Safe,
    Caution,
    HighRisk,
}

impl RiskFlag {
    pub fn from_score(score: u32, thresholds: &FlagThresholds) -> Self {
        if score >= thresholds.safe {
            RiskFlag::Safe
        } else if score >= thresholds.caution {
            RiskFlag::Caution
        } else {
            RiskFlag::HighRisk
        }
    }
}

impl fmt::Display for RiskFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskFlag::Safe => "Safe",
            RiskFlag::Caution => "Caution",
            RiskFlag::HighRisk => "High Risk",
        };
        f.write_str(label)
    }
}

/// Score plus its flag, as produced by [`batch_with_flags`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlaggedScore {
    pub score: u32,
    pub flag: RiskFlag,
}

fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(false, |x| x != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Health score of one token in [0, 100].
pub fn evaluate_token_health(token: &TokenData, penalties: &HealthPenalties) -> u32 {
    let mut deductions = 0u32;

    if token.extra("mint_authority").and_then(Value::as_str) == Some("open") {
        deductions = deductions.saturating_add(penalties.open_mint);
    }
    if truthy(token.extra("owner_changed_recently")) {
        deductions = deductions.saturating_add(penalties.owner_change);
    }
    // absent means locked
    if token.extra("liquidity_locked").map_or(false, |v| !truthy(Some(v))) {
        deductions = deductions.saturating_add(penalties.liquidity);
    }
    if truthy(token.extra("blacklisted")) {
        deductions = deductions.saturating_add(penalties.blacklist);
    }

    BASE_SCORE.saturating_sub(deductions)
}

/// Health score per token symbol. A repeated symbol keeps its last score.
pub fn scan_token_batch(tokens: &[TokenData], penalties: &HealthPenalties) -> HashMap<String, u32> {
    tokens
        .iter()
        .map(|t| (t.symbol.clone(), evaluate_token_health(t, penalties)))
        .collect()
}

/// Scores sorted descending, ties broken by symbol, optionally truncated.
pub fn rank_tokens(scores: &HashMap<String, u32>, top_n: Option<usize>) -> Vec<(String, u32)> {
    let mut ranked: Vec<(String, u32)> = scores.iter().map(|(k, v)| (k.clone(), *v)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    if let Some(n) = top_n {
        ranked.truncate(n);
    }
    ranked
}

/// Score, rank and flag a batch in one pass.
pub fn batch_with_flags(
    tokens: &[TokenData],
    penalties: &HealthPenalties,
    thresholds: &FlagThresholds,
    top_n: Option<usize>,
) -> Vec<(String, FlaggedScore)> {
    let scores = scan_token_batch(tokens, penalties);
    rank_tokens(&scores, top_n)
        .into_iter()
        .map(|(symbol, score)| {
            let flag = RiskFlag::from_score(score, thresholds);
            (symbol, FlaggedScore { score, flag })
        })
        .collect()
}

/// Local [`RiskScorer`] backed by the health score.
#[derive(Clone, Debug, Default)]
pub struct HealthRadar {
    pub penalties: HealthPenalties,
    pub thresholds: FlagThresholds,
}

#[async_trait]
impl RiskScorer for HealthRadar {
    async fn score_risk(&self, token: &TokenData) -> anyhow::Result<String> {
        let score = evaluate_token_health(token, &self.penalties);
        let flag = RiskFlag::from_score(score, &self.thresholds);
        Ok(format!("health {} ({})", score, flag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(symbol: &str) -> TokenData {
        TokenData::new(symbol, 1.0, 1.0, 1.0)
    }

    #[test]
    fn test_clean_token_scores_full() {
        let t = token("OK").with_extra("liquidity_locked", true);
        assert_eq!(evaluate_token_health(&t, &HealthPenalties::default()), 100);
    }

    #[test]
    fn test_each_flag_deducts() {
        let p = HealthPenalties::default();
        assert_eq!(
            evaluate_token_health(&token("A").with_extra("mint_authority", "open"), &p),
            70
        );
        assert_eq!(
            evaluate_token_health(&token("B").with_extra("owner_changed_recently", true), &p),
            80
        );
        assert_eq!(
            evaluate_token_health(&token("C").with_extra("liquidity_locked", false), &p),
            75
        );
        assert_eq!(
            evaluate_token_health(&token("D").with_extra("blacklisted", 1), &p),
            50
        );
    }

    #[test]
    fn test_score_floors_at_zero() {
        let t = token("BAD")
            .with_extra("mint_authority", "open")
            .with_extra("owner_changed_recently", true)
            .with_extra("liquidity_locked", false)
            .with_extra("blacklisted", true);
        assert_eq!(evaluate_token_health(&t, &HealthPenalties::default()), 0);
    }

    #[test]
    fn test_oversized_penalties_saturate() {
        let penalties = HealthPenalties {
            open_mint: u32::MAX,
            owner_change: 1,
            ..Default::default()
        };
        let t = token("HUGE")
            .with_extra("mint_authority", "open")
            .with_extra("owner_changed_recently", true);
        assert_eq!(evaluate_token_health(&t, &penalties), 0);
    }

    #[test]
    fn test_rank_and_flags() {
        let tokens = vec![
            token("MID").with_extra("owner_changed_recently", true),
            token("TOP"),
            token("LOW").with_extra("blacklisted", true),
            token("ALSO_TOP"),
        ];
        let flagged = batch_with_flags(
            &tokens,
            &HealthPenalties::default(),
            &FlagThresholds::default(),
            Some(3),
        );

        let symbols: Vec<&str> = flagged.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(symbols, vec!["ALSO_TOP", "TOP", "MID"]);
        assert_eq!(flagged[0].1.flag, RiskFlag::Safe);
        assert_eq!(flagged[2].1, FlaggedScore { score: 80, flag: RiskFlag::Caution });

        let all = rank_tokens(&scan_token_batch(&tokens, &HealthPenalties::default()), None);
        assert_eq!(all.last().unwrap(), &("LOW".to_string(), 50));
        assert_eq!(RiskFlag::from_score(50, &FlagThresholds::default()), RiskFlag::HighRisk);
    }

    #[tokio::test]
    async fn test_health_radar_as_risk_scorer() {
        let radar = HealthRadar::default();
        let out = radar
            .score_risk(&token("X").with_extra("mint_authority", "open"))
            .await
            .unwrap();
        assert_eq!(out, "health 70 (Caution)");
    }
}
