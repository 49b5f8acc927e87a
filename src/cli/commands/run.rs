//! `stockfeed run` command - produce the vendor feeds

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::output::effective_format;
use crate::cli::{helpers, GlobalOpts, OutputFormat};
use crate::core::RenderedFeed;
use crate::pipeline::{self, RunReport};

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Print the feeds to stdout instead of writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Format of the run summary
    #[arg(long, short = 'f', value_enum, default_value = "auto")]
    pub format: OutputFormat,
}

pub fn run(args: RunArgs, global: &GlobalOpts) -> Result<()> {
    let config = helpers::load_config(global)?;
    let (report, feeds) = pipeline::run(&config, !args.dry_run)?;

    if args.dry_run {
        print_feeds(&feeds);
        // The feeds own stdout; keep the summary off it
        eprint!("{}", render_text_summary(&report));
        return Ok(());
    }

    match effective_format(args.format, false) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&report).into_diagnostic()?);
        }
        OutputFormat::Tsv => {
            for feed in &report.feeds {
                println!(
                    "{}\t{}\t{}\t{}",
                    feed.vendor,
                    feed.lines,
                    feed.skipped.len(),
                    feed.path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_default()
                );
            }
        }
        OutputFormat::Text | OutputFormat::Auto => print!("{}", render_text_summary(&report)),
    }
    Ok(())
}

fn print_feeds(feeds: &[RenderedFeed]) {
    for feed in feeds {
        println!("# {}", feed.vendor);
        print!("{}", feed.contents());
    }
}

fn render_text_summary(report: &RunReport) -> String {
    let mut out = String::new();
    let rule = style("─".repeat(60)).dim();

    out.push_str(&format!("{}\n{}\n{}\n", rule, style("Run Summary").bold(), rule));
    out.push_str(&format!(
        "  Catalog rows:   {}\n",
        style(report.catalog_rows).cyan()
    ));
    out.push_str(&format!(
        "  Base items:     {}\n",
        style(report.base_items).cyan()
    ));
    out.push_str(&format!("  Variants:       {}\n", style(report.variants).cyan()));
    out.push_str(&format!(
        "  Stock rows:     {} matched, {} not in catalog\n",
        style(report.stock.matched).green(),
        style(report.stock.unmatched).yellow()
    ));

    for feed in &report.feeds {
        let target = feed
            .path
            .as_ref()
            .map(|p| format!(" → {}", p.display()))
            .unwrap_or_default();
        out.push_str(&format!(
            "  {:<15} {} line(s){}\n",
            format!("{}:", feed.vendor),
            style(feed.lines).green(),
            target
        ));
        for skipped in &feed.skipped {
            out.push_str(&format!("    {} {}\n", style("skipped").yellow(), skipped));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PropagationStats;
    use crate::pipeline::FeedReport;
    use std::path::PathBuf;

    #[test]
    fn test_text_summary_lists_feeds_and_skips() {
        console::set_colors_enabled(false);
        let report = RunReport {
            catalog_rows: 3,
            base_items: 2,
            variants: 3,
            stock: PropagationStats {
                rows: 4,
                matched: 2,
                unmatched: 2,
                variants_updated: 3,
            },
            feeds: vec![
                FeedReport {
                    vendor: "Amazon".to_string(),
                    path: Some(PathBuf::from("amazon.txt")),
                    lines: 2,
                    skipped: vec![],
                },
                FeedReport {
                    vendor: "eBay".to_string(),
                    path: None,
                    lines: 0,
                    skipped: vec!["Variant X1 x2 has no eBay code".to_string()],
                },
            ],
        };

        let text = render_text_summary(&report);

        assert!(text.contains("2 matched, 2 not in catalog"));
        assert!(text.contains("Amazon:         2 line(s) → amazon.txt"));
        assert!(text.contains("skipped Variant X1 x2 has no eBay code"));
    }
}
