//! Configuration: file paths, catalog/stock-feed column layouts and policies
//!
//! Configuration is layered, later layers winning:
//! 1. Built-in defaults
//! 2. User config (`<config dir>/stockfeed/config.yaml`)
//! 3. Project config (`stockfeed.yaml` in the working directory, or `--config`)
//! 4. Environment variables and command-line flags (applied by the CLI)

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::format::MissingDataPolicy;
use crate::core::model::{AMAZON, EBAY};

/// Project config file name looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "stockfeed.yaml";

/// Errors raised while loading configuration
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    #[diagnostic(code(stockfeed::config::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {}: {message}", path.display())]
    #[diagnostic(
        code(stockfeed::config::parse),
        help("run 'stockfeed config init' to see a complete example")
    )]
    Parse { path: PathBuf, message: String },

    #[error("Failed to serialize config: {0}")]
    #[diagnostic(code(stockfeed::config::serialize))]
    Serialize(String),
}

/// Column layout of the master catalog
///
/// Passed explicitly to the catalog reader; nothing reads it from global
/// state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogLayout {
    /// Column holding the base product code
    pub base_code_column: String,

    /// Column holding the pack multiplier
    pub multiplier_column: String,

    /// Column header → vendor name, one code per column
    pub vendor_columns: BTreeMap<String, String>,

    /// Columns merged, in order, into the eBay (online, retail) pair
    pub ebay_columns: Vec<String>,
}

impl Default for CatalogLayout {
    fn default() -> Self {
        let mut vendor_columns = BTreeMap::new();
        vendor_columns.insert("AMZ SKU".to_string(), AMAZON.to_string());
        vendor_columns.insert("CUBECART".to_string(), "CubeCart".to_string());

        Self {
            base_code_column: "FIVEM".to_string(),
            multiplier_column: "MULTIPLE".to_string(),
            vendor_columns,
            ebay_columns: vec!["EBAY SKU".to_string(), "EBAY ONLINE SKU".to_string()],
        }
    }
}

impl CatalogLayout {
    /// Every vendor name the layout can produce, without duplicates
    pub fn vendor_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.vendor_columns.values().cloned().collect();
        if !self.ebay_columns.is_empty() {
            names.push(EBAY.to_string());
        }
        names.sort();
        names.dedup();
        names
    }
}

/// Column layout of the stock-level feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StockFeedLayout {
    /// Column holding the stock level; the base code is always the first column
    pub stock_level_column: String,
}

impl Default for StockFeedLayout {
    fn default() -> Self {
        Self {
            stock_level_column: "Stock_Level".to_string(),
        }
    }
}

/// Effective configuration for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub catalog_path: PathBuf,
    pub stock_feed_path: PathBuf,
    pub amazon_output_path: PathBuf,
    pub ebay_output_path: PathBuf,

    /// Abort on, or skip, variants lacking codes their vendor format needs
    pub on_missing_vendor_data: MissingDataPolicy,

    pub catalog: CatalogLayout,
    pub stock_feed: StockFeedLayout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("catalog.csv"),
            stock_feed_path: PathBuf::from("stock.csv"),
            amazon_output_path: PathBuf::from("amazon_stock.txt"),
            ebay_output_path: PathBuf::from("ebay_stock.csv"),
            on_missing_vendor_data: MissingDataPolicy::default(),
            catalog: CatalogLayout::default(),
            stock_feed: StockFeedLayout::default(),
        }
    }
}

/// Partial config as written in a file; absent keys leave lower layers alone
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigLayer {
    catalog_path: Option<PathBuf>,
    stock_feed_path: Option<PathBuf>,
    amazon_output_path: Option<PathBuf>,
    ebay_output_path: Option<PathBuf>,
    on_missing_vendor_data: Option<MissingDataPolicy>,
    catalog: Option<CatalogLayout>,
    stock_feed: Option<StockFeedLayout>,
}

impl Config {
    /// Load defaults, then the user config, then `project_file` (or
    /// `stockfeed.yaml` in `dir` when none is given)
    pub fn load(dir: &Path, project_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(user) = Self::user_config_path() {
            if user.exists() {
                config.apply_file(&user)?;
            }
        }

        match project_file {
            // An explicitly named file must exist
            Some(path) => config.apply_file(&dir.join(path))?,
            None => {
                let path = dir.join(PROJECT_CONFIG_FILE);
                if path.exists() {
                    config.apply_file(&path)?;
                }
            }
        }

        // Relative paths in the config are relative to the working directory
        config.resolve_paths(dir);
        Ok(config)
    }

    /// Location of the per-user config file, if the platform has one
    pub fn user_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "stockfeed")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Overlay the keys present in a YAML file
    pub fn apply_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.apply_str(&content, path)?;
        tracing::debug!(path = %path.display(), "applied config file");
        Ok(())
    }

    fn apply_str(&mut self, content: &str, path: &Path) -> Result<(), ConfigError> {
        if content.trim().is_empty() {
            return Ok(());
        }
        let layer: ConfigLayer = serde_yml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        if let Some(v) = layer.catalog_path {
            self.catalog_path = v;
        }
        if let Some(v) = layer.stock_feed_path {
            self.stock_feed_path = v;
        }
        if let Some(v) = layer.amazon_output_path {
            self.amazon_output_path = v;
        }
        if let Some(v) = layer.ebay_output_path {
            self.ebay_output_path = v;
        }
        if let Some(v) = layer.on_missing_vendor_data {
            self.on_missing_vendor_data = v;
        }
        if let Some(v) = layer.catalog {
            self.catalog = v;
        }
        if let Some(v) = layer.stock_feed {
            self.stock_feed = v;
        }
        Ok(())
    }

    fn resolve_paths(&mut self, dir: &Path) {
        for path in [
            &mut self.catalog_path,
            &mut self.stock_feed_path,
            &mut self.amazon_output_path,
            &mut self.ebay_output_path,
        ] {
            if path.is_relative() {
                *path = dir.join(&*path);
            }
        }
    }

    /// Output path for a vendor's feed, for vendors that have one
    pub fn output_path(&self, vendor: &str) -> Option<&Path> {
        match vendor {
            AMAZON => Some(&self.amazon_output_path),
            EBAY => Some(&self.ebay_output_path),
            _ => None,
        }
    }

    /// Render as YAML
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yml::to_string(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}
