//! Vendor feed line formats
//!
//! Each supported vendor has a [`VendorFormatter`] registered by name in a
//! [`FormatterRegistry`]. Asking for a vendor with no registered formatter is
//! a [`FeedError::NotImplemented`], never a guessed format.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::error::{FeedError, Result};
use crate::core::model::{Variant, VendorCodes, AMAZON, EBAY};
use crate::core::registry::{BaseItemRegistry, VendorIndex};

/// Renders a variant as one line of a vendor's stock-update feed
pub trait VendorFormatter {
    /// The vendor name this formatter serves
    fn vendor(&self) -> &str;

    /// Render one feed line, including the trailing newline
    fn format(&self, variant: &Variant) -> Result<String>;
}

fn missing(vendor: &str, variant: &Variant) -> FeedError {
    FeedError::MissingVendorData {
        vendor: vendor.to_string(),
        base_code: variant.base_code().to_string(),
        multiplier: variant.multiplier(),
    }
}

/// `<code>\t\t\t\t<stock>` inventory loader lines
#[derive(Debug, Default, Clone, Copy)]
pub struct AmazonFormatter;

impl VendorFormatter for AmazonFormatter {
    fn vendor(&self) -> &str {
        AMAZON
    }

    fn format(&self, variant: &Variant) -> Result<String> {
        let code = variant
            .codes_for(AMAZON)
            .ok_or_else(|| missing(AMAZON, variant))?
            .primary();
        Ok(format!("{}\t\t\t\t{}\n", code, variant.derived_stock()))
    }
}

/// `REVISE,<online>,<stock>,<retail>` file exchange lines
#[derive(Debug, Default, Clone, Copy)]
pub struct EbayFormatter;

impl VendorFormatter for EbayFormatter {
    fn vendor(&self) -> &str {
        EBAY
    }

    fn format(&self, variant: &Variant) -> Result<String> {
        match variant.codes_for(EBAY) {
            Some(VendorCodes::Pair(online, retail)) => Ok(format!(
                "REVISE,{},{},{}\n",
                online,
                variant.derived_stock(),
                retail
            )),
            Some(VendorCodes::Single(_)) => Err(FeedError::EbayShape {
                base_code: variant.base_code().to_string(),
                multiplier: variant.multiplier(),
            }),
            None => Err(missing(EBAY, variant)),
        }
    }
}

/// Vendor name → formatter
pub struct FormatterRegistry {
    formatters: HashMap<String, Box<dyn VendorFormatter>>,
}

impl FormatterRegistry {
    /// An empty registry; every vendor is unsupported until registered
    pub fn empty() -> Self {
        Self {
            formatters: HashMap::new(),
        }
    }

    /// Registry with the Amazon and eBay formats
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(AmazonFormatter));
        registry.register(Box::new(EbayFormatter));
        registry
    }

    pub fn register(&mut self, formatter: Box<dyn VendorFormatter>) {
        self.formatters
            .insert(formatter.vendor().to_string(), formatter);
    }

    pub fn get(&self, vendor: &str) -> Result<&dyn VendorFormatter> {
        self.formatters
            .get(vendor)
            .map(|f| f.as_ref())
            .ok_or_else(|| FeedError::NotImplemented {
                vendor: vendor.to_string(),
            })
    }

    pub fn supports(&self, vendor: &str) -> bool {
        self.formatters.contains_key(vendor)
    }

    /// Lazily render one line per variant indexed under `vendor`, in index
    /// order
    ///
    /// The formatter lookup happens up front, so an unsupported vendor fails
    /// before any line is produced. A vendor with a formatter but no index
    /// yields nothing.
    pub fn format_for_vendor<'a>(
        &'a self,
        vendor: &str,
        index: &'a VendorIndex,
        registry: &'a BaseItemRegistry,
    ) -> Result<impl Iterator<Item = Result<String>> + 'a> {
        let formatter = self.get(vendor)?;
        let entries = index.entries(vendor).into_iter().flatten();
        Ok(entries.map(move |(_, id)| formatter.format(registry.variant(id))))
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// What to do when a variant lacks the codes its vendor's format needs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingDataPolicy {
    /// Stop the run at the first offending variant
    #[default]
    Abort,
    /// Leave the variant out of the feed and report it
    Skip,
}

/// A fully rendered vendor feed
#[derive(Debug, Default, Clone, Serialize)]
pub struct RenderedFeed {
    pub vendor: String,
    pub lines: Vec<String>,
    /// Messages for variants left out under [`MissingDataPolicy::Skip`]
    pub skipped: Vec<String>,
}

impl RenderedFeed {
    /// The feed as file contents
    pub fn contents(&self) -> String {
        self.lines.concat()
    }
}

/// Render a vendor's whole feed, applying `policy` to per-variant data errors
pub fn render_feed(
    formatters: &FormatterRegistry,
    vendor: &str,
    index: &VendorIndex,
    registry: &BaseItemRegistry,
    policy: MissingDataPolicy,
) -> Result<RenderedFeed> {
    let mut feed = RenderedFeed {
        vendor: vendor.to_string(),
        ..RenderedFeed::default()
    };

    for line in formatters.format_for_vendor(vendor, index, registry)? {
        match line {
            Ok(line) => feed.lines.push(line),
            Err(e) if policy == MissingDataPolicy::Skip && e.is_item_error() => {
                tracing::warn!(vendor, "skipping variant: {}", e);
                feed.skipped.push(e.to_string());
            }
            Err(e) => return Err(e),
        }
    }

    tracing::info!(
        vendor,
        lines = feed.lines.len(),
        skipped = feed.skipped.len(),
        "rendered feed"
    );
    Ok(feed)
}
