//! Master catalog reader
//!
//! Turns catalog CSV rows into [`CatalogRecord`]s according to a
//! [`CatalogLayout`]. Blank vendor cells mean the row has no code for that
//! vendor.

use csv::StringRecord;
use std::io::Read;
use std::path::Path;

use crate::core::config::CatalogLayout;
use crate::core::error::{FeedError, Result};
use crate::core::model::EBAY;
use crate::core::records::CatalogRecord;
use crate::feed::{column_index, csv_reader, parse_multiplier};

/// Resolved column positions for one catalog file
struct Columns {
    base_code: usize,
    multiplier: usize,
    vendors: Vec<(usize, String)>,
    ebay: Vec<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord, layout: &CatalogLayout, source: &Path) -> Result<Self> {
        let required = |name: &str| {
            column_index(headers, name).ok_or_else(|| FeedError::MissingColumn {
                column: name.to_string(),
                path: source.to_path_buf(),
            })
        };

        let base_code = required(&layout.base_code_column)?;
        let multiplier = required(&layout.multiplier_column)?;

        // Vendor columns are optional; a catalog may not list every vendor
        let vendors = layout
            .vendor_columns
            .iter()
            .filter_map(|(column, vendor)| {
                let idx = column_index(headers, column);
                if idx.is_none() {
                    tracing::debug!(column = %column, "vendor column not present in catalog");
                }
                idx.map(|i| (i, vendor.clone()))
            })
            .collect();
        let ebay = layout
            .ebay_columns
            .iter()
            .filter_map(|column| column_index(headers, column))
            .collect();

        Ok(Self {
            base_code,
            multiplier,
            vendors,
            ebay,
        })
    }
}

/// Read and normalize a catalog file
pub fn read_catalog(path: &Path, layout: &CatalogLayout) -> Result<Vec<CatalogRecord>> {
    let file = std::fs::File::open(path)?;
    parse_catalog(file, path, layout)
}

/// Normalize catalog CSV from any reader; `source` names it in errors
pub fn parse_catalog<R: Read>(
    reader: R,
    source: &Path,
    layout: &CatalogLayout,
) -> Result<Vec<CatalogRecord>> {
    let mut rdr = csv_reader(reader);
    let csv_err = |e: csv::Error| FeedError::Csv {
        path: source.to_path_buf(),
        source: e,
    };

    let headers = rdr.headers().map_err(csv_err)?.clone();
    let columns = Columns::resolve(&headers, layout, source)?;

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row.map_err(csv_err)?;
        let line = row.position().map_or(0, |p| p.line());
        let cell = |idx: usize| row.get(idx).map(str::trim).unwrap_or("");

        let base_code = cell(columns.base_code);
        if base_code.is_empty() {
            tracing::debug!(line, "skipping catalog row without a base code");
            continue;
        }

        let raw_multiplier = cell(columns.multiplier);
        if raw_multiplier.is_empty() {
            tracing::debug!(line, base_code, "blank multiplier, treating as a single unit");
        }
        let multiplier = parse_multiplier(raw_multiplier).ok_or_else(|| FeedError::InvalidNumber {
            field: layout.multiplier_column.clone(),
            value: raw_multiplier.to_string(),
            path: source.to_path_buf(),
            line,
        })?;

        let mut record = CatalogRecord::new(base_code, multiplier);
        for (idx, vendor) in &columns.vendors {
            let code = cell(*idx);
            if !code.is_empty() {
                record.vendors.push((vendor.clone(), vec![code.to_string()]));
            }
        }

        let ebay: Vec<String> = columns
            .ebay
            .iter()
            .map(|&idx| cell(idx))
            .filter(|code| !code.is_empty())
            .map(str::to_string)
            .collect();
        if !ebay.is_empty() {
            record.vendors.push((EBAY.to_string(), ebay));
        }

        records.push(record);
    }

    tracing::info!(path = %source.display(), rows = records.len(), "read catalog");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::AMAZON;

    fn parse(csv: &str) -> Result<Vec<CatalogRecord>> {
        parse_catalog(csv.as_bytes(), Path::new("catalog.csv"), &CatalogLayout::default())
    }

    #[test]
    fn test_amazon_row() {
        let records = parse("FIVEM,MULTIPLE,AMZ SKU\nX1,2,AMZ-1\n").unwrap();
        assert_eq!(
            records,
            vec![CatalogRecord::new("X1", 2).with_vendor(AMAZON, ["AMZ-1"])]
        );
    }

    #[test]
    fn test_ebay_columns_merge_in_order() {
        // Column order in the file does not matter; layout order does
        let records =
            parse("EBAY ONLINE SKU,FIVEM,EBAY SKU,MULTIPLE\nE2,X2,E1,3\n").unwrap();
        assert_eq!(
            records,
            vec![CatalogRecord::new("X2", 3).with_vendor(EBAY, ["E1", "E2"])]
        );
    }

    #[test]
    fn test_blank_cells_mean_no_code() {
        let records = parse(
            "FIVEM,MULTIPLE,AMZ SKU,CUBECART,EBAY SKU,EBAY ONLINE SKU\nX1,1, ,CC-1,,\n",
        )
        .unwrap();
        assert_eq!(records[0].vendors, vec![("CubeCart".to_string(), vec!["CC-1".to_string()])]);
    }

    #[test]
    fn test_half_filled_ebay_keeps_single_code() {
        let records = parse("FIVEM,MULTIPLE,EBAY SKU,EBAY ONLINE SKU\nX1,1,,ONLINE\n").unwrap();
        assert_eq!(
            records[0].vendors,
            vec![(EBAY.to_string(), vec!["ONLINE".to_string()])]
        );
    }

    #[test]
    fn test_rows_without_base_code_are_skipped() {
        let records = parse("FIVEM,MULTIPLE,AMZ SKU\n,2,AMZ-1\nX1,1,AMZ-2\n").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].base_code, "X1");
    }

    #[test]
    fn test_missing_required_column() {
        let err = parse("FIVEM,AMZ SKU\nX1,AMZ-1\n").unwrap_err();
        assert!(matches!(err, FeedError::MissingColumn { ref column, .. } if column == "MULTIPLE"));
    }

    #[test]
    fn test_invalid_multiplier_names_line() {
        let err = parse("FIVEM,MULTIPLE\nX1,2\nX2,two\n").unwrap_err();
        match err {
            FeedError::InvalidNumber { value, line, .. } => {
                assert_eq!(value, "two");
                assert_eq!(line, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_multiplier_forms() {
        let records = parse("FIVEM,MULTIPLE\nA,2.0\nB,\nC,0\n").unwrap();
        let multipliers: Vec<u32> = records.iter().map(|r| r.multiplier).collect();
        assert_eq!(multipliers, vec![2, 1, 0]);
    }

    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_blank_multiplier_is_logged() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            parse("FIVEM,MULTIPLE\nA,2\nB,\n").unwrap();
        });

        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("blank multiplier"));
        assert!(logs.contains("base_code=\"B\"") || logs.contains("base_code=B"));
        assert_eq!(logs.matches("blank multiplier").count(), 1);
    }

    #[test]
    fn test_custom_layout() {
        let mut layout = CatalogLayout::default();
        layout.base_code_column = "SKU".to_string();
        layout.vendor_columns.insert("WALMART".to_string(), "Walmart".to_string());

        let records =
            parse_catalog("SKU,MULTIPLE,WALMART\nS1,1,W-1\n".as_bytes(), Path::new("c.csv"), &layout)
                .unwrap();
        assert_eq!(
            records,
            vec![CatalogRecord::new("S1", 1).with_vendor("Walmart", ["W-1"])]
        );
    }
}
