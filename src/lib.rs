//! Stockfeed: vendor stock-update feeds from a master catalog
//!
//! Reads a master product catalog and a stock-level feed, links every base
//! product to its pack-size variants, divides the base stock level down to
//! each variant, and renders the Amazon and eBay stock-update files.

pub mod cli;
pub mod core;
pub mod feed;
pub mod pipeline;
