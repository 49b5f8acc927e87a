//! Shared test helpers for integration tests
//!
//! This module provides common utilities used across all test files.

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Header row matching the default catalog layout
pub const CATALOG_HEADER: &str = "FIVEM,MULTIPLE,AMZ SKU,CUBECART,EBAY SKU,EBAY ONLINE SKU";

/// Helper to get a stockfeed command with logging and config env cleared
pub fn stockfeed() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("stockfeed"));
    cmd.env_remove("RUST_LOG")
        .env_remove("STOCKFEED_CONFIG")
        .env_remove("STOCKFEED_CATALOG")
        .env_remove("STOCKFEED_STOCK_FEED")
        .env_remove("STOCKFEED_AMAZON_OUTPUT")
        .env_remove("STOCKFEED_EBAY_OUTPUT");
    cmd
}

/// Helper to create a project directory holding catalog.csv and stock.csv
/// with the given data rows
pub fn setup_project(catalog_rows: &[&str], stock_rows: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_catalog(tmp.path(), catalog_rows);
    write_stock(tmp.path(), stock_rows);
    tmp
}

/// Write catalog.csv with the default header
pub fn write_catalog(dir: &Path, rows: &[&str]) {
    let mut content = format!("{}\n", CATALOG_HEADER);
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    fs::write(dir.join("catalog.csv"), content).unwrap();
}

/// Write stock.csv with a `Code,Stock_Level` header
pub fn write_stock(dir: &Path, rows: &[&str]) {
    let mut content = String::from("Code,Stock_Level\n");
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    fs::write(dir.join("stock.csv"), content).unwrap();
}

/// Read an output file from the project, or None if it was not written
pub fn read_output(tmp: &TempDir, name: &str) -> Option<String> {
    fs::read_to_string(tmp.path().join(name)).ok()
}

/// Helper to get a stockfeed command running inside a project directory,
/// isolated from any real user config
pub fn stockfeed_in(tmp: &TempDir) -> Command {
    let mut cmd = stockfeed();
    cmd.current_dir(tmp.path())
        .env("XDG_CONFIG_HOME", tmp.path().join(".xdg"))
        .env("HOME", tmp.path());
    cmd
}
