//! Errors raised while building, propagating and rendering stock feeds

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur anywhere in the feed pipeline
#[derive(Debug, Error, Diagnostic)]
pub enum FeedError {
    #[error("Configuration error: {message}")]
    #[diagnostic(code(stockfeed::configuration))]
    Configuration { message: String },

    #[error("Required column '{column}' is missing from {}", path.display())]
    #[diagnostic(
        code(stockfeed::missing_column),
        help("check the header row of the file, or adjust the column names in stockfeed.yaml")
    )]
    MissingColumn { column: String, path: PathBuf },

    #[error("Variant {base_code} x{multiplier} has no {vendor} code")]
    #[diagnostic(
        code(stockfeed::missing_vendor_data),
        help("add the missing vendor code to the catalog, or set on_missing_vendor_data to skip")
    )]
    MissingVendorData {
        vendor: String,
        base_code: String,
        multiplier: u32,
    },

    #[error("Variant {base_code} x{multiplier} has a zero multiplier; derived stock is undefined")]
    #[diagnostic(
        code(stockfeed::zero_multiplier),
        help("the MULTIPLE column must be a positive pack size")
    )]
    ZeroMultiplier { base_code: String, multiplier: u32 },

    #[error("No feed format is defined for vendor '{vendor}'")]
    #[diagnostic(code(stockfeed::not_implemented))]
    NotImplemented { vendor: String },

    #[error("Variant {base_code} x{multiplier} needs exactly two eBay codes (online, retail), found one")]
    #[diagnostic(
        code(stockfeed::ebay_shape),
        help("fill in both the EBAY SKU and EBAY ONLINE SKU columns")
    )]
    EbayShape { base_code: String, multiplier: u32 },

    #[error("Invalid catalog record for {base_code}: {message}")]
    #[diagnostic(code(stockfeed::invalid_record))]
    InvalidRecord { base_code: String, message: String },

    #[error("Invalid {field} '{value}' at {}:{line}", path.display())]
    #[diagnostic(code(stockfeed::invalid_number))]
    InvalidNumber {
        field: String,
        value: String,
        path: PathBuf,
        line: u64,
    },

    #[error("Failed to read {}: {source}", path.display())]
    #[diagnostic(code(stockfeed::csv))]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    #[diagnostic(
        code(stockfeed::write),
        help("check that the output path names a writable file, not a directory")
    )]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    #[diagnostic(code(stockfeed::io))]
    Io(#[from] std::io::Error),
}

impl FeedError {
    /// Whether this error concerns a single variant's data, as opposed to
    /// the run as a whole
    pub fn is_item_error(&self) -> bool {
        matches!(
            self,
            FeedError::MissingVendorData { .. } | FeedError::EbayShape { .. }
        )
    }
}

pub type Result<T, E = FeedError> = std::result::Result<T, E>;
