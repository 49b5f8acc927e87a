//! Core module - the item graph, stock propagation and vendor formats

pub mod builder;
pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod propagate;
pub mod records;
pub mod registry;

pub use builder::build;
pub use config::{CatalogLayout, Config, ConfigError, StockFeedLayout};
pub use error::FeedError;
pub use format::{
    render_feed, AmazonFormatter, EbayFormatter, FormatterRegistry, MissingDataPolicy,
    RenderedFeed, VendorFormatter,
};
pub use model::{BaseId, BaseItem, Variant, VariantId, VendorCodes, AMAZON, EBAY};
pub use propagate::{propagate, PropagationStats};
pub use records::{CatalogRecord, StockRecord};
pub use registry::{BaseItemRegistry, VendorIndex};
