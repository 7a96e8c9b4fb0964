//! Scan binder: button click → token evaluation → result text.

use super::document::{Document, Element};
use super::token::TokenData;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info};

pub const SCAN_BUTTON_ID: &str = "scan-button";
pub const SCAN_RESULT_ID: &str = "scan-result";
pub const SCAN_RESULT_CLASS: &str = "mt-4 p-3 bg-gray-100 dark:bg-gray-800 rounded";

pub const IDLE_LABEL: &str = "Scan Token";
pub const SCANNING_LABEL: &str = "Scanning...";

/// Shown when either evaluator fails.
pub const EVALUATION_ERROR: &str = "Error evaluating risk";
/// Shown when input gathering (or anything else outside evaluation) fails.
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

// =============================================================================
// Collaborators
// =============================================================================

/// Remote risk-scoring service.
#[async_trait]
pub trait RiskScorer: Send + Sync {
    async fn score_risk(&self, token: &TokenData) -> Result<String>;
}

/// Remote volatility-prediction service.
#[async_trait]
pub trait VolatilityPredictor: Send + Sync {
    async fn predict_volatility(&self, token: &TokenData) -> Result<String>;
}

/// Source of the token record to scan, typically a form on the page.
pub trait TokenInputSource: Send + Sync {
    fn gather(&self) -> Result<TokenData>;
}

impl<F> TokenInputSource for F
where
    F: Fn() -> Result<TokenData> + Send + Sync,
{
    fn gather(&self) -> Result<TokenData> {
        self()
    }
}

// =============================================================================
// Evaluation
// =============================================================================

/// Ask both services about `token` and join their answers with `" | "`.
///
/// The calls run one after the other; the volatility service is not
/// consulted if risk scoring fails. Any failure is logged and replaced by
/// [`EVALUATION_ERROR`].
pub async fn evaluate_token_risk(
    risk: &dyn RiskScorer,
    volatility: &dyn VolatilityPredictor,
    token: &TokenData,
) -> String {
    let outcome: Result<String> = async {
        let r = risk.score_risk(token).await?;
        let v = volatility.predict_volatility(token).await?;
        Ok(format!("{} | {}", r, v))
    }
    .await;

    match outcome {
        Ok(text) => text,
        Err(e) => {
            error!(symbol = %token.symbol, error = %e, "Risk evaluation failed");
            EVALUATION_ERROR.to_string()
        }
    }
}

/// Write `text` into the result region, creating it at the end of the body
/// if the page has none yet.
pub fn show_result<D: Document + ?Sized>(doc: &mut D, text: &str) {
    match doc.get_element_by_id_mut(SCAN_RESULT_ID) {
        Some(output) => output.text_content = text.to_string(),
        None => doc.append_child(
            Element::new(SCAN_RESULT_ID)
                .with_class(SCAN_RESULT_CLASS)
                .with_text(text),
        ),
    }
}

fn set_button<D: Document + ?Sized>(doc: &mut D, disabled: bool, label: &str) {
    if let Some(button) = doc.get_element_by_id_mut(SCAN_BUTTON_ID) {
        button.disabled = disabled;
        button.text_content = label.to_string();
    }
}

// =============================================================================
// ScanBinder
// =============================================================================

/// Click handler for the scan button.
///
/// Owns its collaborators; the page is passed to each [`click`](Self::click)
/// so the binder never holds on to it.
pub struct ScanBinder {
    risk: Arc<dyn RiskScorer>,
    volatility: Arc<dyn VolatilityPredictor>,
    input: Arc<dyn TokenInputSource>,
}

impl ScanBinder {
    /// Bind to the page's scan button. Returns `None` if the page has no
    /// element with id [`SCAN_BUTTON_ID`].
    pub fn bind<D: Document + ?Sized>(
        doc: &D,
        risk: Arc<dyn RiskScorer>,
        volatility: Arc<dyn VolatilityPredictor>,
        input: Arc<dyn TokenInputSource>,
    ) -> Option<Self> {
        doc.get_element_by_id(SCAN_BUTTON_ID)?;
        Some(Self {
            risk,
            volatility,
            input,
        })
    }

    /// Handle one click.
    ///
    /// Disables the button for the duration of the scan and always restores
    /// it with [`IDLE_LABEL`]. Failures are shown on the page, never returned.
    pub async fn click<D: Document + ?Sized>(&self, doc: &mut D) {
        set_button(doc, true, SCANNING_LABEL);

        match self.run_scan().await {
            Ok(text) => show_result(doc, &text),
            Err(e) => {
                error!(error = %e, "Scan error");
                show_result(doc, UNEXPECTED_ERROR);
            }
        }

        set_button(doc, false, IDLE_LABEL);
    }

    async fn run_scan(&self) -> Result<String> {
        let token = self.input.gather()?;
        info!(symbol = %token.symbol, "scanning token");
        Ok(evaluate_token_risk(self.risk.as_ref(), self.volatility.as_ref(), &token).await)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::document::MemoryDocument;
    use anyhow::anyhow;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedRisk(Option<&'static str>, AtomicUsize);

    #[async_trait]
    impl RiskScorer for FixedRisk {
        async fn score_risk(&self, _token: &TokenData) -> Result<String> {
            self.1.fetch_add(1, Ordering::SeqCst);
            self.0
                .map(str::to_string)
                .ok_or_else(|| anyhow!("risk service unavailable"))
        }
    }

    struct FixedVolatility(Option<&'static str>, AtomicUsize);

    #[async_trait]
    impl VolatilityPredictor for FixedVolatility {
        async fn predict_volatility(&self, _token: &TokenData) -> Result<String> {
            self.1.fetch_add(1, Ordering::SeqCst);
            self.0
                .map(str::to_string)
                .ok_or_else(|| anyhow!("volatility service unavailable"))
        }
    }

    fn page() -> MemoryDocument {
        let mut doc = MemoryDocument::new();
        doc.append_child(Element::new(SCAN_BUTTON_ID).with_text(IDLE_LABEL));
        doc
    }

    fn aaa() -> Result<TokenData> {
        Ok(TokenData::new("AAA", 1.0, 1.0, 1.0))
    }

    fn binder(
        doc: &MemoryDocument,
        risk: Option<&'static str>,
        vol: Option<&'static str>,
    ) -> (ScanBinder, Arc<FixedRisk>, Arc<FixedVolatility>) {
        let r = Arc::new(FixedRisk(risk, AtomicUsize::new(0)));
        let v = Arc::new(FixedVolatility(vol, AtomicUsize::new(0)));
        let b = ScanBinder::bind(doc, r.clone(), v.clone(), Arc::new(aaa)).expect("button present");
        (b, r, v)
    }

    fn result_text(doc: &MemoryDocument) -> &str {
        &doc.get_element_by_id(SCAN_RESULT_ID).unwrap().text_content
    }

    #[tokio::test]
    async fn test_success_joins_results() {
        let mut doc = page();
        let (b, _, _) = binder(&doc, Some("risk: low"), Some("vol: 0.2"));

        b.click(&mut doc).await;

        assert_eq!(result_text(&doc), "risk: low | vol: 0.2");
        let result = doc.get_element_by_id(SCAN_RESULT_ID).unwrap();
        assert_eq!(result.class_name, SCAN_RESULT_CLASS);
    }

    #[tokio::test]
    async fn test_both_services_reject() {
        let mut doc = page();
        let (b, _, _) = binder(&doc, None, None);

        b.click(&mut doc).await;

        assert_eq!(result_text(&doc), EVALUATION_ERROR);
        let button = doc.get_element_by_id(SCAN_BUTTON_ID).unwrap();
        assert!(!button.disabled);
        assert_eq!(button.text_content, IDLE_LABEL);
    }

    #[tokio::test]
    async fn test_volatility_skipped_when_risk_fails() {
        let mut doc = page();
        let (b, r, v) = binder(&doc, None, Some("vol"));

        b.click(&mut doc).await;

        assert_eq!(r.1.load(Ordering::SeqCst), 1);
        assert_eq!(v.1.load(Ordering::SeqCst), 0);
        assert_eq!(result_text(&doc), EVALUATION_ERROR);
    }

    #[tokio::test]
    async fn test_volatility_failure_alone() {
        let mut doc = page();
        let (b, _, _) = binder(&doc, Some("risk"), None);

        b.click(&mut doc).await;

        assert_eq!(result_text(&doc), EVALUATION_ERROR);
    }

    #[tokio::test]
    async fn test_gather_failure_shows_unexpected_error() {
        let mut doc = page();
        let failing = || -> Result<TokenData> { Err(anyhow!("form incomplete")) };
        let b = ScanBinder::bind(
            &doc,
            Arc::new(FixedRisk(Some("r"), AtomicUsize::new(0))),
            Arc::new(FixedVolatility(Some("v"), AtomicUsize::new(0))),
            Arc::new(failing),
        )
        .unwrap();

        b.click(&mut doc).await;

        assert_eq!(result_text(&doc), UNEXPECTED_ERROR);
        let button = doc.get_element_by_id(SCAN_BUTTON_ID).unwrap();
        assert!(!button.disabled);
        assert_eq!(button.text_content, IDLE_LABEL);
    }

    #[tokio::test]
    async fn test_result_region_reused() {
        let mut doc = page();
        let (b, _, _) = binder(&doc, Some("a"), Some("b"));

        b.click(&mut doc).await;
        b.click(&mut doc).await;

        let regions = doc.body().iter().filter(|e| e.id == SCAN_RESULT_ID).count();
        assert_eq!(regions, 1);
    }

    #[test]
    fn test_bind_without_button() {
        let doc = MemoryDocument::new();
        let bound = ScanBinder::bind(
            &doc,
            Arc::new(FixedRisk(None, AtomicUsize::new(0))),
            Arc::new(FixedVolatility(None, AtomicUsize::new(0))),
            Arc::new(aaa),
        );
        assert!(bound.is_none());
    }

    #[test]
    fn test_show_result_updates_existing_region() {
        let mut doc = MemoryDocument::new();
        doc.append_child(Element::new(SCAN_RESULT_ID).with_class("custom"));
        show_result(&mut doc, "hello");

        let region = doc.get_element_by_id(SCAN_RESULT_ID).unwrap();
        assert_eq!(region.text_content, "hello");
        assert_eq!(region.class_name, "custom");
    }
}
