//! openhouse CLI
//!
//! Populates listings from their page URLs and prints them as JSON.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use openhouse::{error::Result, models::Config, pipeline};

/// openhouse - Listing page extractor
#[derive(Parser, Debug)]
#[command(name = "openhouse", version, about = "Real-estate listing extractor")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "openhouse.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Populate listings and print them as JSON
    Extract {
        /// Listing page URLs (default: batch.targets from the config)
        urls: Vec<String>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag and configured level.
fn init_logging(verbose: bool, level: &str) {
    let level = if verbose { "debug" } else { level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging needs the configured level, so report load failures afterwards.
    let loaded = Config::load(&cli.config);
    let level = loaded
        .as_ref()
        .map(|c| c.logging.level.clone())
        .unwrap_or_else(|_| "info".to_string());
    init_logging(cli.verbose, &level);

    let config = loaded.unwrap_or_else(|e| {
        log::warn!(
            "Config load failed from {}: {}. Using defaults.",
            cli.config.display(),
            e
        );
        Config::default()
    });

    match cli.command {
        Command::Extract { urls, pretty } => {
            config.validate()?;

            let urls = if urls.is_empty() {
                log::info!(
                    "No URLs given, using {} configured targets",
                    config.batch.targets.len()
                );
                config.batch.targets.clone()
            } else {
                urls
            };

            let outcome = pipeline::run_extract(&config, &urls).await?;

            let json = if pretty {
                serde_json::to_string_pretty(&outcome)?
            } else {
                serde_json::to_string(&outcome)?
            };
            println!("{json}");
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK ({} targets)", config.batch.targets.len());
        }
    }

    Ok(())
}
