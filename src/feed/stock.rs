//! Stock-level feed reader
//!
//! The first column of every row is the base code; the stock level comes
//! from the configured stock-level column, which must exist.

use std::io::Read;
use std::path::Path;

use crate::core::config::StockFeedLayout;
use crate::core::error::{FeedError, Result};
use crate::core::records::StockRecord;
use crate::feed::{column_index, csv_reader, parse_stock_level};

/// Read a stock feed file
pub fn read_stock_feed(path: &Path, layout: &StockFeedLayout) -> Result<Vec<StockRecord>> {
    let file = std::fs::File::open(path)?;
    parse_stock_feed(file, path, layout)
}

/// Parse stock-feed CSV from any reader; `source` names it in errors
pub fn parse_stock_feed<R: Read>(
    reader: R,
    source: &Path,
    layout: &StockFeedLayout,
) -> Result<Vec<StockRecord>> {
    let mut rdr = csv_reader(reader);
    let csv_err = |e: csv::Error| FeedError::Csv {
        path: source.to_path_buf(),
        source: e,
    };

    let headers = rdr.headers().map_err(csv_err)?.clone();
    if headers.is_empty() {
        return Err(FeedError::Configuration {
            message: format!("stock feed {} has no header row", source.display()),
        });
    }
    let level_idx = column_index(&headers, &layout.stock_level_column).ok_or_else(|| {
        FeedError::MissingColumn {
            column: layout.stock_level_column.clone(),
            path: source.to_path_buf(),
        }
    })?;

    let mut records = Vec::new();
    let mut blank = 0usize;
    for row in rdr.records() {
        let row = row.map_err(csv_err)?;
        let line = row.position().map_or(0, |p| p.line());

        let base_code = row.get(0).map(str::trim).unwrap_or("");
        let raw_level = row.get(level_idx).map(str::trim).unwrap_or("");
        if base_code.is_empty() || raw_level.is_empty() {
            blank += 1;
            continue;
        }

        let stock_level = parse_stock_level(raw_level).ok_or_else(|| FeedError::InvalidNumber {
            field: layout.stock_level_column.clone(),
            value: raw_level.to_string(),
            path: source.to_path_buf(),
            line,
        })?;
        records.push(StockRecord::new(base_code, stock_level));
    }

    if blank > 0 {
        tracing::debug!(rows = blank, "skipped stock rows with a blank code or level");
    }
    tracing::info!(path = %source.display(), rows = records.len(), "read stock feed");
    Ok(records)
}
