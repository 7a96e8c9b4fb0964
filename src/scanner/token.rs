//! Token input record.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Market data for one token, as gathered from the scan form.
///
/// The four required fields are typed. Anything else the form supplies lands
/// in `extra`, which is flattened on the wire so `{"symbol": "AAA", ...,
/// "blacklisted": true}` round-trips without a nested object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenData {
    pub symbol: String,
    pub price: f64,
    #[serde(rename = "volume24h")]
    pub volume_24h: f64,
    pub liquidity: f64,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl TokenData {
    pub fn new(symbol: impl Into<String>, price: f64, volume_24h: f64, liquidity: f64) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            volume_24h,
            liquidity,
            extra: HashMap::new(),
        }
    }

    /// Builder-style insert into the extension map.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
