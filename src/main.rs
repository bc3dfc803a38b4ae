//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `link_chain` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - JSON output of the traces
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use link_chain::app::normalize_start_url;
use link_chain::config::Opt;
use link_chain::initialization::init_logger_with;
use link_chain::{trace_links, Config, TraceContext};

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::parse();
    let config = Config::from(&opt);

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let urls: Vec<String> = opt
        .urls
        .iter()
        .filter_map(|url| normalize_start_url(url))
        .collect();
    if urls.is_empty() {
        eprintln!("link_chain error: no valid URLs to trace");
        process::exit(1);
    }

    let ctx = TraceContext::from_config(&config).context("Failed to initialize HTTP clients")?;
    let traces = trace_links(&urls, &ctx).await;

    let output = if opt.pretty {
        serde_json::to_string_pretty(&traces)
    } else {
        serde_json::to_string(&traces)
    }
    .context("Failed to serialize traces")?;
    println!("{}", output);

    Ok(())
}
