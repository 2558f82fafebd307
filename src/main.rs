//! pumpcycle - create -> wait -> sell token cycles on pump.fun

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use pumpcycle::adapters::cli::{self, CliApp};
use pumpcycle::config::load_settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (SOLANA_RPC_URL goes here, not in the TOML)
    dotenvy::dotenv().ok();

    let app = CliApp::parse();

    let settings = load_settings(&app.config)
        .with_context(|| format!("Failed to load configuration from {}", app.config.display()))?;
    init_logging(app.verbose, app.debug, &settings.logging.level)?;

    cli::execute(app.command, settings).await
}

fn init_logging(verbose: bool, debug: bool, level: &str) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_new(level).context("Invalid logging.level")?
    };

    fmt().with_env_filter(filter).with_target(false).init();
    Ok(())
}
