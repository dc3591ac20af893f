//! Clue-Harvest main entry point
//!
//! This is the command-line interface for the Clue-Harvest crossword answer
//! harvester.

use anyhow::{bail, Context};
use clap::Parser;
use clue_harvest::config::{load_config_with_hash, Config};
use clue_harvest::crawler::crawl;
use clue_harvest::output::{generate_markdown_summary, print_json, write_json};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Clue-Harvest: a crossword answer harvester
///
/// Clue-Harvest discovers the categories of a crossword-answer site, walks the
/// configured category page by page, reveals each clue's answer in a headless
/// browser and prints the results grouped by category as JSON.
#[derive(Parser, Debug)]
#[command(name = "clue-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A crossword answer harvester", long_about = None)]
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

    /// Write the JSON response here instead of the configured path
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Write a markdown summary here instead of the configured path
    #[arg(long, value_name = "FILE")]
    summary: Option<PathBuf>,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for the JSON response
    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config, cli.output, cli.summary).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("clue_harvest=info,warn"),
            1 => EnvFilter::new("clue_harvest=debug,info"),
            2 => EnvFilter::new("clue_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Clue-Harvest Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Target category: {}", config.site.target_category_url);

    println!("\nTiming:");
    println!("  Element wait: {}ms", config.timing.element_wait_timeout);
    println!("  Navigation timeout: {}ms", config.timing.navigation_timeout);
    println!("  Reveal settle delay: {}ms", config.timing.reveal_settle_delay);
    println!(
        "  Max reveal iterations: {}",
        config.timing.max_reveal_iterations
    );
    println!("  Node retries: {}", config.timing.node_retries);
    match config.timing.crawl_timeout {
        Some(secs) => println!("  Crawl timeout: {}s", secs),
        None => println!("  Crawl timeout: none"),
    }

    println!("\nBrowser:");
    println!(
        "  Executable: {}",
        config.browser.executable.as_deref().unwrap_or("auto-detect")
    );
    println!("  Headless: {}", config.browser.headless);
    println!("  Sandbox disabled: {}", config.browser.no_sandbox);
    if !config.browser.args.is_empty() {
        println!("  Extra args: {}", config.browser.args.join(" "));
    }

    println!("\nOutput:");
    println!(
        "  JSON: {}",
        config.output.json_path.as_deref().unwrap_or("stdout")
    );
    println!(
        "  Summary: {}",
        config.output.summary_path.as_deref().unwrap_or("none")
    );

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(
    config: Config,
    output: Option<PathBuf>,
    summary: Option<PathBuf>,
) -> anyhow::Result<()> {
    let json_path = output.or_else(|| config.output.json_path.as_ref().map(PathBuf::from));
    let summary_path = summary.or_else(|| config.output.summary_path.as_ref().map(PathBuf::from));

    tracing::info!(
        "Starting crawl of {} (target: {})",
        config.site.base_url,
        config.site.target_category_url
    );

    let response = crawl(config).await;

    match &json_path {
        Some(path) => {
            write_json(&response, path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!("Response written to: {}", path.display());
        }
        None => print_json(&response, std::io::stdout().lock())?,
    }

    if let Some(path) = &summary_path {
        generate_markdown_summary(&response, path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!("Summary written to: {}", path.display());
    }

    if !response.is_success() {
        bail!(
            "crawl failed: {}",
            response.error.as_deref().unwrap_or("unknown error")
        );
    }

    tracing::info!(
        "Crawl completed in {}s: {} records in {} categories",
        response.duration_seconds(),
        response.results.record_count(),
        response.results.category_count()
    );
    Ok(())
}
