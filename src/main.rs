//! Philo-Walk main entry point
//!
//! This is the command-line interface for measuring degrees of separation to
//! Wikipedia's "Philosophy" article.

use clap::Parser;
use philo_walk::config::{load_config_with_hash, Config};
use philo_walk::walk::run_pipeline;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Philo-Walk: how many first links does it take to reach Philosophy?
///
/// Philo-Walk samples Wikipedia articles, follows the first real link of each
/// one until it reaches the target article, and reports the distribution of
/// hop counts.
#[derive(Parser, Debug)]
#[command(name = "philo-walk")]
#[command(version = "1.0.0")]
#[command(about = "Degrees of separation to Wikipedia's Philosophy article", long_about = None)]
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

    /// Validate config and show what would be walked without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config, &config_hash);
    } else {
        handle_run(&config, &config_hash).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("philo_walk=info,warn"),
            1 => EnvFilter::new("philo_walk=debug,info"),
            2 => EnvFilter::new("philo_walk=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows the planned run
fn handle_dry_run(config: &Config, config_hash: &str) {
    println!("=== Philo-Walk Dry Run ===\n");

    println!("Walker Configuration:");
    println!("  Base URL: {}", config.walker.base_url);
    println!("  Target: {}", config.walker.target_title);
    println!("  Max steps: {}", config.walker.max_steps);
    println!(
        "  Stop on title revisit: {}",
        config.walker.stop_on_title_revisit
    );
    println!(
        "  Max concurrent walks: {}",
        config.walker.max_concurrent_walks
    );
    println!(
        "  Request delay: {}ms (back-off up to {}ms)",
        config.walker.request_delay_ms, config.walker.max_backoff_ms
    );

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nSamples:");
    println!("  Random articles: {}", config.sample.random_count);
    println!("  Most viewed articles: {}", config.sample.top_count);
    println!(
        "  Per category: {} (tables from index {})",
        config.sample.per_category_count, config.sample.first_category_table
    );
    println!("  Ranking page: {}", config.sample.ranking_page);

    println!("\nOutput:");
    println!("  Export directory: {}", config.output.export_dir);
    if let Some(db) = &config.output.database_path {
        println!("  Database: {}", db);
    }
    println!("  Summary: {}", config.output.summary_path);

    println!("\n✓ Configuration is valid (hash: {})", config_hash);
    println!(
        "✓ Would walk from at most {} random and {} ranked articles",
        config.sample.random_count, config.sample.top_count
    );
}

/// Handles the main run
async fn handle_run(config: &Config, config_hash: &str) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Walking to '{}' (max {} steps, {} concurrent walks)",
        config.walker.target_title,
        config.walker.max_steps,
        config.walker.max_concurrent_walks
    );

    match run_pipeline(config, config_hash).await {
        Ok(summary) => {
            tracing::info!(
                "Run completed successfully: {}/{} walks reached {}",
                summary.succeeded(),
                summary.attempted(),
                summary.target_title
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Run failed: {}", e);
            Err(e.into())
        }
    }
}
