//! docfold main entry point
//!
//! Command-line interface for crawling a documentation site and folding its
//! pages into Markdown documents with front matter.

use anyhow::Context;
use clap::Parser;
use docfold::config::{builtin_config, load_config, Config};
use docfold::crawler::crawl;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use url::Url;

/// docfold: fold documentation sites into Markdown
///
/// Crawls a documentation site from a seed URL, detects which static-site
/// generator produced each page, extracts the main content through
/// per-framework selectors, and writes one Markdown file per page.
#[derive(Parser, Debug)]
#[command(name = "docfold")]
#[command(version)]
#[command(about = "Fold documentation sites into Markdown", long_about = None)]
struct Cli {
    /// Seed URL to start crawling from
    #[arg(value_name = "URL")]
    url: String,

    /// Path to a TOML framework configuration (builtin set when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Preload the crawl cache from previously persisted output
    #[arg(long)]
    preload: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => builtin_config().context("builtin configuration is invalid")?,
    };

    if cli.preload {
        config.cache.preload_from_output = true;
    }

    let seed = Url::parse(&cli.url).with_context(|| format!("invalid seed URL '{}'", cli.url))?;

    if cli.dry_run {
        handle_dry_run(&config, &seed);
        return Ok(());
    }

    tracing::info!(seed = %seed, frameworks = config.frameworks.len(), "starting crawl");
    let stats = crawl(config, seed).await?;
    stats.print_summary();

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("docfold=info,warn"),
            1 => EnvFilter::new("docfold=debug,info"),
            2 => EnvFilter::new("docfold=trace,debug"),
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

/// Handles --dry-run: validates config and shows what a crawl would do
fn handle_dry_run(config: &Config, seed: &Url) {
    println!("=== docfold Dry Run ===\n");

    println!("Crawl Settings:");
    println!("  Seed URL: {}", seed);
    println!("  Max depth: {}", config.crawl.max_depth);
    println!("  Max pages: {}", config.crawl.max_pages);
    println!("  Delay: {}ms", config.crawl.delay_ms);
    println!("  Retries: {}", config.crawl.retry_times);

    println!("\nOutput:");
    println!("  Documents: {}", config.output.output_dir);
    println!("  Side cache: {}", config.output.cache_dir);

    println!("\nCrawl Cache:");
    println!("  Enabled: {}", config.cache.enabled);
    println!("  Preload from output: {}", config.cache.preload_from_output);

    println!("\nFrameworks ({}):", config.frameworks.len());
    for fw in &config.frameworks {
        println!(
            "  - {} ({} url / {} html / {} meta patterns, {} content selectors)",
            fw.name,
            fw.patterns.url.len(),
            fw.patterns.html.len(),
            fw.patterns.meta.len(),
            fw.selectors.content.len(),
        );
    }

    println!("\n✓ Configuration is valid");
}
