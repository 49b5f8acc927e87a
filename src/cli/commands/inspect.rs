//! `stockfeed inspect` command - show the item graph after propagation

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::helpers::{format_stock_level, truncate_str};
use crate::cli::output::effective_format;
use crate::cli::{helpers, GlobalOpts, OutputFormat};
use crate::core::{BaseItemRegistry, Variant, VendorCodes, VendorIndex};
use crate::pipeline;

#[derive(clap::Args, Debug)]
pub struct InspectArgs {
    /// Only show variants listed under this vendor
    #[arg(long)]
    pub vendor: Option<String>,

    /// Only show variants of this base code
    #[arg(long)]
    pub base: Option<String>,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value = "auto")]
    pub format: OutputFormat,

    /// Show only the count
    #[arg(long)]
    pub count: bool,
}

/// One listed variant
#[derive(Debug, Serialize, Tabled)]
struct VariantRow {
    #[tabled(rename = "BASE")]
    base_code: String,
    #[tabled(rename = "PACK")]
    multiplier: u32,
    #[tabled(rename = "BASE STOCK")]
    #[serde(skip)]
    base_stock_display: String,
    #[tabled(skip)]
    base_stock: Option<f64>,
    #[tabled(rename = "STOCK")]
    derived_stock: i64,
    #[tabled(rename = "CODES")]
    #[serde(skip)]
    codes_display: String,
    #[tabled(skip)]
    vendor_codes: BTreeMap<String, VendorCodes>,
}

impl VariantRow {
    fn new(variant: &Variant, registry: &BaseItemRegistry) -> Self {
        let base_stock = registry.base(variant.base()).stock_level();
        let codes_display = variant
            .vendor_codes()
            .iter()
            .map(|(vendor, codes)| format!("{}={}", vendor, codes))
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            base_code: variant.base_code().to_string(),
            multiplier: variant.multiplier(),
            base_stock_display: format_stock_level(base_stock),
            base_stock,
            derived_stock: variant.derived_stock(),
            codes_display: truncate_str(&codes_display, 60),
            vendor_codes: variant.vendor_codes().clone(),
        }
    }
}

/// Variants to list, in registry order, filtered by vendor and base code
fn select<'a>(
    registry: &'a BaseItemRegistry,
    index: &'a VendorIndex,
    args: &InspectArgs,
) -> Result<Vec<&'a Variant>> {
    let mut variants: Vec<&Variant> = match &args.vendor {
        Some(vendor) => {
            let entries = index
                .entries(vendor)
                .ok_or_else(|| miette::miette!("Unknown vendor '{}'", vendor))?;
            entries.map(|(_, id)| registry.variant(id)).collect()
        }
        None => registry.variants().collect(),
    };

    if let Some(base) = &args.base {
        variants.retain(|v| v.base_code() == base.as_str());
    }
    Ok(variants)
}

pub fn run(args: InspectArgs, global: &GlobalOpts) -> Result<()> {
    let config = helpers::load_config(global)?;
    let graph = pipeline::load_graph(&config)?;
    let variants = select(&graph.registry, &graph.index, &args)?;

    if args.count {
        println!("{}", variants.len());
        return Ok(());
    }

    let rows: Vec<VariantRow> = variants
        .iter()
        .map(|v| VariantRow::new(v, &graph.registry))
        .collect();

    match effective_format(args.format, true) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&rows).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&rows).into_diagnostic()?);
        }
        OutputFormat::Tsv => {
            for row in &rows {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    row.base_code,
                    row.multiplier,
                    row.base_stock_display,
                    row.derived_stock,
                    row.codes_display
                );
            }
        }
        OutputFormat::Text | OutputFormat::Auto => {
            if rows.is_empty() {
                println!("No variants found.");
                return Ok(());
            }
            let mut table = Table::new(&rows);
            table.with(Style::sharp());
            println!("{}", table);
            println!(
                "\n{} variant(s), {} base item(s), {} stock row(s) not in catalog",
                style(rows.len()).cyan(),
                style(graph.registry.base_count()).cyan(),
                style(graph.stock.unmatched).yellow()
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{build, propagate, CatalogRecord, StockRecord, AMAZON, EBAY};

    fn args(vendor: Option<&str>, base: Option<&str>) -> InspectArgs {
        InspectArgs {
            vendor: vendor.map(str::to_string),
            base: base.map(str::to_string),
            format: OutputFormat::Tsv,
            count: false,
        }
    }

    fn graph() -> (BaseItemRegistry, VendorIndex) {
        let records = vec![
            CatalogRecord::new("X1", 1).with_vendor(AMAZON, ["A1"]),
            CatalogRecord::new("X1", 2).with_vendor(EBAY, ["E1", "E2"]),
            CatalogRecord::new("X2", 1).with_vendor(AMAZON, ["A2"]),
        ];
        let (mut registry, index) = build(&records, [AMAZON, EBAY]).unwrap();
        propagate(&[StockRecord::new("X1", 9.0)], &mut registry).unwrap();
        (registry, index)
    }

    #[test]
    fn test_select_by_vendor_and_base() {
        let (registry, index) = graph();

        assert_eq!(select(&registry, &index, &args(None, None)).unwrap().len(), 3);
        assert_eq!(select(&registry, &index, &args(Some(AMAZON), None)).unwrap().len(), 2);
        let x1_amazon = select(&registry, &index, &args(Some(AMAZON), Some("X1"))).unwrap();
        assert_eq!(x1_amazon.len(), 1);
        assert_eq!(x1_amazon[0].multiplier(), 1);
        assert!(select(&registry, &index, &args(Some("Walmart"), None)).is_err());
    }

    #[test]
    fn test_row_shows_codes_and_stock() {
        let (registry, _) = graph();
        let variant = registry.find_variant("X1", 2).unwrap();
        let row = VariantRow::new(variant, &registry);

        assert_eq!(row.derived_stock, 4);
        assert_eq!(row.base_stock_display, "9");
        assert_eq!(row.codes_display, "eBay=E1/E2");
    }
}
