//! `olc`: personal OSINT link catalog.
//!
//! # Environment Variables
//!
//! - `OLC_DATA_FILE`: catalog path (default: `links.json`)
//! - `COHERE_API_KEY`: enables AI classification for bare URLs
//! - `RUST_LOG`, `LOG_FORMAT`: log level and format (logs go to stderr)
//!
//! See [`osint_link_catalog::config`] for the full list.

use anyhow::{Context, Result};
use clap::Parser;
use osint_link_catalog::cli::{self, Cli};
use osint_link_catalog::config::{self, Config};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Cli::parse();

    let config =
        config::load_from_env(args.data_file.clone()).context("Invalid configuration")?;

    init_tracing(&config)?;
    config.print_summary();

    cli::run(args, &config).await
}

/// Installs the stderr log subscriber.
fn init_tracing(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_new(&config.log_level)
        .with_context(|| format!("Invalid RUST_LOG filter '{}'", config.log_level))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.log_format == "json" {
        builder.json().init();
    } else {
        builder.with_target(false).init();
    }

    Ok(())
}
