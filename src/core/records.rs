//! Flat records handed from the CSV readers to the item graph

use serde::{Deserialize, Serialize};

/// One normalized catalog row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub base_code: String,
    pub multiplier: u32,
    /// (vendor name, ordered codes) pairs found on the row
    pub vendors: Vec<(String, Vec<String>)>,
}

impl CatalogRecord {
    pub fn new(base_code: impl Into<String>, multiplier: u32) -> Self {
        Self {
            base_code: base_code.into(),
            multiplier,
            vendors: Vec::new(),
        }
    }

    /// Builder-style helper for attaching a vendor's codes
    pub fn with_vendor<I, S>(mut self, vendor: impl Into<String>, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vendors
            .push((vendor.into(), codes.into_iter().map(Into::into).collect()));
        self
    }
}

/// One stock-feed row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    pub base_code: String,
    pub stock_level: f64,
}

impl StockRecord {
    pub fn new(base_code: impl Into<String>, stock_level: f64) -> Self {
        Self {
            base_code: base_code.into(),
            stock_level,
        }
    }
}
