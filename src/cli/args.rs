//! Command-line argument definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::completions::CompletionsArgs;
use crate::cli::commands::config::ConfigCommands;
use crate::cli::commands::inspect::InspectArgs;
use crate::cli::commands::run::RunArgs;

#[derive(Parser, Debug)]
#[command(name = "stockfeed")]
#[command(version)]
#[command(about = "Turn a master catalog and a stock-level feed into Amazon and eBay stock feeds")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read the catalog and stock feed, then write the vendor feeds
    Run(RunArgs),

    /// List variants with their vendor codes and derived stock
    Inspect(InspectArgs),

    /// Manage the stockfeed.yaml configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Options accepted by every command
#[derive(clap::Args, Debug, Default, Clone)]
pub struct GlobalOpts {
    /// Config file to use instead of ./stockfeed.yaml
    #[arg(long, global = true, env = "STOCKFEED_CONFIG")]
    pub config: Option<PathBuf>,

    /// Master catalog CSV
    #[arg(long, global = true, env = "STOCKFEED_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Stock-level feed CSV
    #[arg(long, global = true, env = "STOCKFEED_STOCK_FEED")]
    pub stock_feed: Option<PathBuf>,

    /// Amazon feed output file
    #[arg(long, global = true, env = "STOCKFEED_AMAZON_OUTPUT")]
    pub amazon_output: Option<PathBuf>,

    /// eBay feed output file
    #[arg(long, global = true, env = "STOCKFEED_EBAY_OUTPUT")]
    pub ebay_output: Option<PathBuf>,

    /// What to do with variants missing a vendor code
    #[arg(long, global = true, value_enum)]
    pub on_missing: Option<MissingPolicyArg>,

    /// More log output (-v debug, -vv trace)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log line format
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub log_format: LogFormat,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Text on a terminal, TSV for lists when piped
    #[default]
    Auto,
    /// Human-readable tables and summaries
    Text,
    /// Tab-separated values
    Tsv,
    /// JSON
    Json,
    /// YAML
    Yaml,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum MissingPolicyArg {
    /// Stop at the first variant missing a code
    Abort,
    /// Leave such variants out and report them
    Skip,
}
