//! MassMessage delivery list CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use massmessage_list::{ListGenerator, WikiClient};
use shared::{Config, LogConfig};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Write the delivery list here instead of the configured path
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration; its source is reported once logging is up
    let (config, config_source) = Config::load(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    // Initialize logging
    let mut log_config = LogConfig::from_settings("massmessage-list", &config.logging);
    log_config.log_dir = config.log_dir().to_string_lossy().to_string();
    if args.verbose {
        log_config.default_level = tracing::Level::DEBUG;
    }
    shared::logging::init(log_config)?;

    info!("MassMessage list generator starting");
    config_source.log();
    info!(api_url = %config.wiki.api_url, "Target wiki");

    let output_path = args.output.clone().unwrap_or_else(|| config.output_path());

    let client = WikiClient::new(&config).context("Failed to create wiki client")?;
    let mut generator = ListGenerator::new(client, config);

    let report = generator.run().await;

    if !report.exclusion.complete {
        warn!("Opt-out list is incomplete; some opted-out users may be included");
    }
    if !report.enumeration.complete {
        warn!("User enumeration stopped early; the list is partial");
    }

    report
        .list
        .write_to(&output_path)
        .context("Failed to save delivery list")?;

    info!("=== Generation Complete ===");
    info!("Opted-out users: {}", report.excluded_users);
    info!("Registered users (non-bot): {}", report.enumeration.total_accounts);
    info!("Blocked: {}", report.enumeration.blocked);
    info!("Bots: {}", report.enumeration.bots);
    info!("Opted out: {}", report.enumeration.opted_out);
    info!("Delivery targets: {}", report.enumeration.delivered);
    info!("Delivery list written to: {}", output_path.display());

    Ok(())
}
