//! Zipharvest main entry point
//!
//! This is the command-line interface for the Zipharvest job-listing
//! harvester.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use zipharvest::config::load_config_with_hash;
use zipharvest::crawler::harvest;

/// Zipharvest: a job-listing harvester
///
/// Zipharvest walks the listing pages of a job site for each configured
/// search term, follows every posting it finds, and appends one record per
/// job to the configured output.
#[derive(Parser, Debug)]
#[command(name = "zipharvest")]
#[command(version = "1.0.0")]
#[command(about = "A job-listing harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG", default_value = "config.toml")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be harvested without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration; a fault here is the one process-fatal
    // error class
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, _config_hash) = match load_config_with_hash(&cli.config) {
        Ok((config, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (config, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    tracing::info!(
        "Queries: {}, output: {}",
        config.queries.len(),
        config.output.records_path
    );

    // Startup faults (sink, client build) abort; everything after that
    // degrades to fewer records and the run completes
    let totals = harvest(config).await?;

    println!(
        "Harvest complete: {} links found, {} records written, {} omissions",
        totals.links_found,
        totals.records_written,
        totals.omissions()
    );

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("zipharvest=info,warn"),
            1 => EnvFilter::new("zipharvest=debug,info"),
            2 => EnvFilter::new("zipharvest=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows the crawl plan
fn handle_dry_run(config: &zipharvest::config::Config) {
    println!("=== Zipharvest Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Base URL: {}", config.crawler.base_url);
    println!("  Max pages per query: {}", config.crawler.max_pages_per_query);
    println!("  Page delay: {}ms", config.crawler.page_delay_ms);
    println!(
        "  Max concurrent details: {}",
        config.crawler.max_concurrent_details
    );
    println!(
        "  Request timeout: {}s",
        config.crawler.request_timeout_secs
    );

    println!("\nOutput:");
    println!("  Records: {}", config.output.records_path);

    println!("\nQueries ({}):", config.queries.len());
    for query in &config.queries {
        println!("  - {}", query);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would harvest {} queries", config.queries.len());
}
