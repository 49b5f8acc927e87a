//! Shared helper functions for CLI commands
//!
//! Config loading with command-line overrides, plus small display helpers
//! used by more than one command.

use miette::{IntoDiagnostic, Result};

use crate::cli::args::MissingPolicyArg;
use crate::cli::GlobalOpts;
use crate::core::{Config, MissingDataPolicy};

/// Load the layered config from the working directory and apply flag and
/// environment overrides on top
pub fn load_config(global: &GlobalOpts) -> Result<Config> {
    let cwd = std::env::current_dir().into_diagnostic()?;
    let mut config = Config::load(&cwd, global.config.as_deref())?;
    apply_overrides(&mut config, global);
    Ok(config)
}

/// Apply the path and policy options from the command line
pub fn apply_overrides(config: &mut Config, global: &GlobalOpts) {
    if let Some(path) = &global.catalog {
        config.catalog_path = path.clone();
    }
    if let Some(path) = &global.stock_feed {
        config.stock_feed_path = path.clone();
    }
    if let Some(path) = &global.amazon_output {
        config.amazon_output_path = path.clone();
    }
    if let Some(path) = &global.ebay_output {
        config.ebay_output_path = path.clone();
    }
    if let Some(policy) = global.on_missing {
        config.on_missing_vendor_data = match policy {
            MissingPolicyArg::Abort => MissingDataPolicy::Abort,
            MissingPolicyArg::Skip => MissingDataPolicy::Skip,
        };
    }
}

/// Truncate a string to max_len, adding "..." if truncated
///
/// Counts characters, not bytes, so codes with non-ASCII text are safe.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Display a stock level without a trailing ".0" for whole numbers
pub fn format_stock_level(level: Option<f64>) -> String {
    match level {
        None => "-".to_string(),
        Some(v) if v.fract() == 0.0 => format!("{}", v as i64),
        Some(v) => format!("{}", v),
    }
}
