//! The batch run: read → build → propagate → render → write
//!
//! Every feed is rendered before any file is touched, so a run that fails
//! part-way leaves the previous outputs in place.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::core::builder::build;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::format::{render_feed, FormatterRegistry, RenderedFeed};
use crate::core::model::{AMAZON, EBAY};
use crate::core::propagate::{propagate, PropagationStats};
use crate::core::registry::{BaseItemRegistry, VendorIndex};
use crate::feed::{read_catalog, read_stock_feed, write_feeds};

/// Vendors that get a feed file, in output order
pub const OUTPUT_VENDORS: [&str; 2] = [AMAZON, EBAY];

/// The item graph after stock levels have been applied
pub struct StockGraph {
    pub registry: BaseItemRegistry,
    pub index: VendorIndex,
    pub catalog_rows: usize,
    pub stock: PropagationStats,
}

/// Read both inputs and build the propagated item graph
pub fn load_graph(config: &Config) -> Result<StockGraph> {
    let catalog = read_catalog(&config.catalog_path, &config.catalog)?;
    let stock = read_stock_feed(&config.stock_feed_path, &config.stock_feed)?;

    let vendor_names = config.catalog.vendor_names();
    let (mut registry, index) = build(&catalog, vendor_names.iter().map(String::as_str))?;
    let stats = propagate(&stock, &mut registry)?;

    Ok(StockGraph {
        registry,
        index,
        catalog_rows: catalog.len(),
        stock: stats,
    })
}

/// Render the Amazon and eBay feeds
pub fn render_outputs(
    config: &Config,
    graph: &StockGraph,
    formatters: &FormatterRegistry,
) -> Result<Vec<RenderedFeed>> {
    OUTPUT_VENDORS
        .iter()
        .map(|vendor| {
            render_feed(
                formatters,
                vendor,
                &graph.index,
                &graph.registry,
                config.on_missing_vendor_data,
            )
        })
        .collect()
}

/// Per-feed part of a [`RunReport`]
#[derive(Debug, Clone, Serialize)]
pub struct FeedReport {
    pub vendor: String,
    /// Destination, or `None` when the feed was not written
    pub path: Option<PathBuf>,
    pub lines: usize,
    pub skipped: Vec<String>,
}

/// Summary of one run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub catalog_rows: usize,
    pub base_items: usize,
    pub variants: usize,
    pub stock: PropagationStats,
    pub feeds: Vec<FeedReport>,
}

/// Run the whole pipeline; with `write` unset the rendered feeds are
/// returned without touching the filesystem
pub fn run(config: &Config, write: bool) -> Result<(RunReport, Vec<RenderedFeed>)> {
    let graph = load_graph(config)?;
    let formatters = FormatterRegistry::new();
    let feeds = render_outputs(config, &graph, &formatters)?;

    if write {
        let outputs: Vec<(&Path, String)> = feeds
            .iter()
            .filter_map(|feed| Some((config.output_path(&feed.vendor)?, feed.contents())))
            .collect();
        write_feeds(outputs.iter().map(|(path, contents)| (*path, contents.as_str())))?;
    }

    let mut reports = Vec::with_capacity(feeds.len());
    for feed in &feeds {
        let path = config.output_path(&feed.vendor).map(|p| p.to_path_buf());
        reports.push(FeedReport {
            vendor: feed.vendor.clone(),
            path: if write { path } else { None },
            lines: feed.lines.len(),
            skipped: feed.skipped.clone(),
        });
    }

    let report = RunReport {
        catalog_rows: graph.catalog_rows,
        base_items: graph.registry.base_count(),
        variants: graph.registry.variant_count(),
        stock: graph.stock,
        feeds: reports,
    };
    tracing::info!(
        variants = report.variants,
        written = write,
        "run complete"
    );
    Ok((report, feeds))
}
