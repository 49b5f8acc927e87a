//! CSV readers and feed writers around the item graph

pub mod catalog;
pub mod stock;
pub mod writer;

pub use catalog::{parse_catalog, read_catalog};
pub use stock::{parse_stock_feed, read_stock_feed};
pub use writer::{stage_feed, write_feed, write_feeds, StagedFeed};

use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::Read;

/// CSV reader configured the same way for every input file
pub(crate) fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader)
}

/// Position of a header, compared exactly after trimming
pub(crate) fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

/// Parse a pack multiplier: a non-negative whole number, written either as
/// an integer or as a decimal with no fractional part. Blank means a single
/// unit.
pub(crate) fn parse_multiplier(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(1);
    }
    if let Ok(n) = raw.parse::<u32>() {
        return Some(n);
    }
    let value = raw.parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX) {
        Some(value as u32)
    } else {
        None
    }
}

/// Largest stock level magnitude whose derived stock fits in an `i64`
pub(crate) const MAX_STOCK_LEVEL: f64 = i64::MAX as f64;

/// Parse a stock level; any finite number below [`MAX_STOCK_LEVEL`] in
/// magnitude is accepted
pub(crate) fn parse_stock_level(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.abs() < MAX_STOCK_LEVEL)
}
