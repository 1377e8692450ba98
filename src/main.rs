//! a11y-sweep main entry point
//!
//! This is the command-line interface for the a11y-sweep accessibility scanner.

use a11y_sweep::config::{load_config_with_hash, Config};
use a11y_sweep::discovery::build_http_client;
use a11y_sweep::output::{aggregate, JsonReportWriter, ReportSink, ScanReport};
use a11y_sweep::scan::{execute_scans, HttpEnhancer, HttpScanEngine, ScanEngine, ScanSettings};
use a11y_sweep::url::parse_base_url;
use a11y_sweep::{discover, DiscoveryOptions, DiscoveryStrategy};
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// a11y-sweep: site-wide accessibility scanning
///
/// a11y-sweep discovers the pages of a running web application, scans each
/// one with an accessibility scan engine, and writes a scored JSON report.
#[derive(Parser, Debug)]
#[command(name = "a11y-sweep")]
#[command(version)]
#[command(about = "Site-wide accessibility scanner", long_about = None)]
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

    /// Validate config and list the pages that would be scanned
    #[arg(long)]
    dry_run: bool,

    /// Override the configured discovery strategy (single, sitemap, crawl, paths)
    #[arg(long, value_name = "NAME")]
    strategy: Option<String>,

    /// Override the configured report path
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if let Some(strategy) = cli.strategy {
        config.discovery.strategy = strategy;
    }
    if let Some(output) = cli.output {
        config.output.report_path = output.display().to_string();
    }

    let strategy = DiscoveryStrategy::from_config(&config.discovery);
    let pages = run_discovery(&config, &strategy).await?;

    if cli.dry_run {
        print_dry_run(&config, &strategy, &pages);
        return Ok(());
    }

    run_scan(&config, &config_hash, &strategy, &pages).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("a11y_sweep=info,warn"),
            1 => EnvFilter::new("a11y_sweep=debug,info"),
            2 => EnvFilter::new("a11y_sweep=trace,debug"),
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

/// Runs page discovery with the configured strategy
async fn run_discovery(
    config: &Config,
    strategy: &DiscoveryStrategy,
) -> anyhow::Result<Vec<String>> {
    let base_url = parse_base_url(&config.target.base_url).context("Invalid target base URL")?;
    let client = build_http_client(
        &config.user_agent,
        Duration::from_secs(config.discovery.request_timeout_secs),
    )
    .context("Failed to build HTTP client")?;

    let options = DiscoveryOptions::from_config(&config.discovery, &config.user_agent);

    let pages = discover(&client, &base_url, strategy, &options)
        .await
        .context("Page discovery failed")?;

    Ok(pages)
}

/// Handles the --dry-run mode: shows what would be scanned
fn print_dry_run(config: &Config, strategy: &DiscoveryStrategy, pages: &[String]) {
    println!("=== a11y-sweep Dry Run ===\n");

    println!("Target: {}", config.target.base_url);
    println!("Strategy: {}", strategy);
    println!("Scan engine: {}", config.scan.engine_url);
    println!("WCAG level: {}", config.scan.wcag_level);
    println!("Report: {}", config.output.report_path);

    println!("\nPages ({}):", pages.len());
    for page in pages {
        println!("  - {}", page);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would scan {} page(s)", pages.len());
}

/// Handles the main scan operation
async fn run_scan(
    config: &Config,
    config_hash: &str,
    strategy: &DiscoveryStrategy,
    pages: &[String],
) -> anyhow::Result<()> {
    let base_url = parse_base_url(&config.target.base_url)?;

    let engine = HttpScanEngine::new(
        &config.scan.engine_url,
        Duration::from_secs(config.scan.timeout_secs),
    )
    .context("Failed to create scan engine client")?;

    engine
        .health_check()
        .await
        .with_context(|| format!("Scan engine at {} is unavailable", config.scan.engine_url))?;
    tracing::info!("Scan engine at {} is healthy", config.scan.engine_url);

    let enhancer = match &config.enhancement {
        Some(enhancement) => Some(
            HttpEnhancer::new(enhancement).context("Failed to create enhancement client")?,
        ),
        None => None,
    };

    let settings = ScanSettings::from_config(&config.scan, &config.user_agent);
    let results = execute_scans(&engine, &base_url, pages, &settings, enhancer.as_ref()).await;

    let report = ScanReport::new(
        base_url.as_str(),
        config_hash,
        strategy.name(),
        aggregate(&results),
    );

    let writer = JsonReportWriter::new(&config.output.report_path);
    writer
        .write_report(&report)
        .with_context(|| format!("Failed to write report to {}", writer.path().display()))?;

    let summary = &report.summary;
    tracing::info!(
        "Scan {} finished: score {}, {}/{} page(s) completed, {} violation(s), {} pass(es)",
        report.scan_id,
        summary.overall_score,
        summary.completed_scans,
        summary.total_scans,
        summary.total_violations,
        summary.total_passes
    );
    tracing::info!("Report written to {}", writer.path().display());

    Ok(())
}
