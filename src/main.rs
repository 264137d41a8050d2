//! Sumi-Glean main entry point
//!
//! This is the command-line interface for the Sumi-Glean page gleaner.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use sumi_glean::config::{load_config_with_hash, Config};
use sumi_glean::crawler::crawl;
use sumi_glean::output::{load_results, print_report, print_results_summary};
use tracing_subscriber::EnvFilter;

/// Sumi-Glean: a bounded, pattern-constrained page gleaner
///
/// Sumi-Glean walks a site breadth-first from a seed URL, keeps the text of
/// one CSS-selected fragment per page, and follows only links that match a
/// glob pattern. Results are saved to a JSON file after every page.
#[derive(Parser, Debug)]
#[command(name = "sumi-glean")]
#[command(version)]
#[command(about = "A bounded, pattern-constrained page gleaner", long_about = None)]
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

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long, conflicts_with = "summary")]
    dry_run: bool,

    /// Summarize the existing output file and exit
    #[arg(long, conflicts_with = "dry_run")]
    summary: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    // Handle different modes
    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.summary {
        handle_summary(&config)?;
    } else {
        handle_crawl(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_glean=info,warn"),
            1 => EnvFilter::new("sumi_glean=debug,info"),
            2 => EnvFilter::new("sumi_glean=trace,debug"),
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

/// Handles the --dry-run mode: shows the validated configuration
fn handle_dry_run(config: &Config) {
    println!("=== Sumi-Glean Dry Run ===\n");

    println!("Crawl:");
    println!("  Seed URL: {}", config.crawl.url);
    println!("  Match pattern: {}", config.crawl.match_pattern);
    println!("  Content selector: {}", config.crawl.selector);
    println!("  Max pages: {}", config.crawl.max_pages_to_crawl);
    println!("  Output file: {}", config.crawl.output_file_name);

    println!("\nRenderer:");
    println!(
        "  Navigation timeout: {}ms",
        config.renderer.navigation_timeout_ms
    );
    println!(
        "  Selector timeout: {}ms",
        config.renderer.selector_timeout_ms
    );
    println!(
        "  User agent: {}",
        config.renderer.user_agent.as_deref().unwrap_or("(default)")
    );

    match &config.cookie {
        Some(cookie) => println!("\nCookie: {} (set before first navigation)", cookie.name),
        None => println!("\nCookie: none"),
    }

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would start crawling at {} and keep up to {} pages",
        config.crawl.url, config.crawl.max_pages_to_crawl
    );
}

/// Handles the --summary mode: lists what the output file currently holds
fn handle_summary(config: &Config) -> anyhow::Result<()> {
    let output = &config.crawl.output_file_name;
    let results = load_results(Path::new(output))
        .with_context(|| format!("Failed to read results from {}", output))?;

    print_results_summary(output, &results);
    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> anyhow::Result<()> {
    tracing::info!(
        "Seed: {}, pattern: {}, budget: {} pages",
        config.crawl.url,
        config.crawl.match_pattern,
        config.crawl.max_pages_to_crawl
    );

    match crawl(config).await {
        Ok(report) => {
            tracing::info!("Crawl completed ({})", report.termination);
            print_report(&report);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
