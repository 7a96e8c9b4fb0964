//! Scanner: binds a page's scan button to two token evaluators.
//!
//! - [`TokenData`]: the typed token record with an open extension map.
//! - [`RiskScorer`] / [`VolatilityPredictor`]: async evaluator seams.
//! - [`Document`] / [`MemoryDocument`]: the page the binder reads and writes.
//! - [`ScanBinder`]: the click handler.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use tokenscan::scanner::{
//!     Document, Element, MemoryDocument, RiskScorer, ScanBinder, TokenData,
//!     VolatilityPredictor, SCAN_BUTTON_ID, SCAN_RESULT_ID,
//! };
//!
//! struct Low;
//! #[async_trait]
//! impl RiskScorer for Low {
//!     async fn score_risk(&self, _: &TokenData) -> anyhow::Result<String> {
//!         Ok("low".into())
//!     }
//! }
//! #[async_trait]
//! impl VolatilityPredictor for Low {
//!     async fn predict_volatility(&self, _: &TokenData) -> anyhow::Result<String> {
//!         Ok("calm".into())
//!     }
//! }
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let mut page = MemoryDocument::new();
//! page.append_child(Element::new(SCAN_BUTTON_ID).with_text("Scan Token"));
//!
//! let gather = || -> anyhow::Result<TokenData> { Ok(TokenData::new("AAA", 1.0, 1.0, 1.0)) };
//! let binder = ScanBinder::bind(&page, Arc::new(Low), Arc::new(Low), Arc::new(gather)).unwrap();
//! binder.click(&mut page).await;
//!
//! assert_eq!(page.get_element_by_id(SCAN_RESULT_ID).unwrap().text_content, "low | calm");
//! # });
//! ```

pub mod binder;
pub mod document;
pub mod token;

pub use binder::{
    evaluate_token_risk, show_result, RiskScorer, ScanBinder, TokenInputSource,
    VolatilityPredictor, EVALUATION_ERROR, IDLE_LABEL, SCANNING_LABEL, SCAN_BUTTON_ID,
    SCAN_RESULT_CLASS, SCAN_RESULT_ID, UNEXPECTED_ERROR,
};
pub use document::{Document, Element, MemoryDocument};
pub use token::TokenData;
