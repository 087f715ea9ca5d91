//! Report-Harvest main entry point
//!
//! This is the command-line interface for the Report-Harvest table harvester.

use clap::Parser;
use report_harvest::config::load_config_with_hash;
use report_harvest::crawler::harvest;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Report-Harvest: a three-stage report table harvester
///
/// Report-Harvest walks a report site's index page, its detail tables and
/// the per-report summary pages, and writes every report into one JSON
/// document.
#[derive(Parser, Debug)]
#[command(name = "report-harvest")]
#[command(version)]
#[command(about = "A three-stage report table harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be fetched without fetching
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics from an existing output document and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config)?;
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_harvest(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("report_harvest=info,warn"),
            1 => EnvFilter::new("report_harvest=debug,info"),
            2 => EnvFilter::new("report_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be fetched
fn handle_dry_run(config: &report_harvest::Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Report-Harvest Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Index page: {}", config.site.index_url()?);
    println!(
        "  Identifier format: {} digits + '{}'",
        config.site.identifier_digits, config.site.page_suffix
    );

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nCrawler:");
    println!(
        "  Max concurrent summaries: {}",
        config.crawler.max_concurrent_summaries
    );
    if config.crawler.checkpoint_every > 0 {
        println!(
            "  Checkpoint every: {} detail pages",
            config.crawler.checkpoint_every
        );
    } else {
        println!("  Checkpoint every: disabled");
    }

    println!("\nOutput:");
    println!("  Data file: {}", config.output.data_path);
    println!("  Enrichment field: {}", config.output.enrichment_field);

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the --stats mode: shows statistics from the output document
fn handle_stats(config: &report_harvest::Config) -> Result<(), Box<dyn std::error::Error>> {
    use report_harvest::output::{collection_statistics, print_statistics, JsonFileSink};

    println!("Data file: {}\n", config.output.data_path);

    let collection = JsonFileSink::new(&config.output.data_path).load()?;
    let stats = collection_statistics(&collection, &config.output.enrichment_field);
    print_statistics(&stats);

    Ok(())
}

/// Handles the main harvest operation
async fn handle_harvest(config: report_harvest::Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Starting harvest of {} into {}",
        config.site.base_url,
        config.output.data_path
    );

    match harvest(config).await {
        Ok(collection) => {
            tracing::info!("Harvest completed: {} records", collection.len());
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            Err(e.into())
        }
    }
}
