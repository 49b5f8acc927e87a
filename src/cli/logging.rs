//! Tracing/logging initialization
//!
//! Logs always go to stderr; stdout is reserved for feeds and reports.

use tracing_subscriber::EnvFilter;

use crate::cli::args::LogFormat;
use crate::cli::GlobalOpts;

/// Default filter directive for the given verbosity flags
pub fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

/// Initialize tracing for the process
///
/// `RUST_LOG` wins over `-v`/`-q` when set. Safe to call multiple times
/// (subsequent calls are no-ops).
pub fn init(global: &GlobalOpts) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(global.verbose, global.quiet)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = match global.log_format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.compact().without_time().try_init(),
    };
}
