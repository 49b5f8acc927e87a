//! `stockfeed config` command - create and show configuration

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::{Path, PathBuf};

use crate::cli::{helpers, GlobalOpts};
use crate::core::config::PROJECT_CONFIG_FILE;
use crate::core::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a stockfeed.yaml with every option at its default
    Init(InitArgs),

    /// Print the effective configuration after all layers and flags
    Show,

    /// Print the config file locations that are consulted
    Path,
}

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,

    /// Where to write (default: ./stockfeed.yaml)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Init(args) => run_init(args),
        ConfigCommands::Show => run_show(global),
        ConfigCommands::Path => run_path(global),
    }
}

/// Default config as YAML, with relative paths as a user would write them
pub fn default_config_yaml() -> Result<String> {
    let yaml = Config::default().to_yaml()?;
    Ok(format!(
        "# stockfeed configuration\n# Relative paths are resolved against the working directory.\n{}",
        yaml
    ))
}

fn run_init(args: InitArgs) -> Result<()> {
    let path = args
        .output
        .unwrap_or_else(|| PathBuf::from(PROJECT_CONFIG_FILE));

    if path.exists() && !args.force {
        println!(
            "{} {} already exists (use --force to overwrite)",
            style("!").yellow(),
            path.display()
        );
        return Ok(());
    }

    std::fs::write(&path, default_config_yaml()?).into_diagnostic()?;
    println!("{} Created {}", style("✓").green(), path.display());
    Ok(())
}

fn run_show(global: &GlobalOpts) -> Result<()> {
    let config = helpers::load_config(global)?;
    print!("{}", config.to_yaml()?);
    Ok(())
}

fn describe(path: &Path) -> String {
    let state = if path.exists() {
        style("found").green()
    } else {
        style("not found").dim()
    };
    format!("{} ({})", path.display(), state)
}

fn run_path(global: &GlobalOpts) -> Result<()> {
    match Config::user_config_path() {
        Some(path) => println!("user:    {}", describe(&path)),
        None => println!("user:    (no config directory on this platform)"),
    }
    let project = global
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(PROJECT_CONFIG_FILE));
    println!("project: {}", describe(&project));
    Ok(())
}
