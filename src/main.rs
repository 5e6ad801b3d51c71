//! checklink main entry point
//!
//! This is the command-line interface for the checklink multi-language link
//! checker.

use anyhow::{bail, Context};
use checklink::config::{load_config_with_hash, validate, Config};
use checklink::crawler::Coordinator;
use checklink::output::{print_summary, MarkdownReport, ReportSink};
use checklink::url::parse_target_url;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable consulted when no model key is given
const MODEL_KEY_ENV: &str = "OPENAI_API_KEY";

/// checklink: check multi-language website links for issues
///
/// checklink detects the language versions of a website, crawls each one,
/// and reports broken links as well as pages whose content looks suspicious
/// or unrelated to the site's purpose.
#[derive(Parser, Debug)]
#[command(name = "checklink")]
#[command(version)]
#[command(about = "Check multi-language website links for issues", long_about = None)]
struct Cli {
    /// Website URL to analyze
    #[arg(value_name = "URL")]
    url: String,

    /// Maximum crawl depth [default: 2]
    #[arg(long)]
    depth: Option<u32>,

    /// Delay between requests in seconds [default: 1.0]
    #[arg(long, value_name = "SECONDS")]
    delay: Option<f64>,

    /// Output directory for reports [default: reports]
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// API key for model-based content analysis (falls back to OPENAI_API_KEY)
    #[arg(long, value_name = "KEY")]
    model_key: Option<String>,

    /// Path to TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of link checks in flight [default: 1]
    #[arg(long, value_name = "N")]
    concurrency: Option<usize>,

    /// Validate settings and show what would be analyzed without fetching anything
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let base_url = parse_target_url(&cli.url)
        .with_context(|| format!("Invalid website URL: {}", cli.url))?;

    let (mut config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    apply_overrides(&mut config, &cli)?;
    validate(&config).context("Invalid settings")?;

    if cli.dry_run {
        print_dry_run(&config, &base_url);
        return Ok(());
    }

    let output_dir = config.output.output_dir.clone();
    let mut coordinator = Coordinator::new(config).context("Failed to initialize checker")?;
    if let Some(hash) = config_hash {
        coordinator = coordinator.with_config_hash(hash);
    }

    let report = coordinator
        .run(&base_url)
        .await
        .with_context(|| format!("Failed to analyze {}", base_url))?;

    let files = MarkdownReport::new(&output_dir)
        .write(&report)
        .with_context(|| format!("Failed to write reports to {}", output_dir))?;

    if !cli.quiet {
        print_summary(&report, &files);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("checklink=info,warn"),
            1 => EnvFilter::new("checklink=debug,info"),
            2 => EnvFilter::new("checklink=trace,debug"),
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

/// Layers command-line flags and the environment over file settings
fn apply_overrides(config: &mut Config, cli: &Cli) -> anyhow::Result<()> {
    if let Some(depth) = cli.depth {
        config.crawler.max_depth = depth;
    }

    if let Some(delay) = cli.delay {
        if !delay.is_finite() || delay < 0.0 {
            bail!("--delay must be a non-negative number of seconds, got {}", delay);
        }
        config.crawler.delay_ms = (delay * 1000.0).round() as u64;
    }

    if let Some(dir) = &cli.output_dir {
        config.output.output_dir = dir.to_string_lossy().into_owned();
    }

    if let Some(concurrency) = cli.concurrency {
        config.crawler.check_concurrency = concurrency;
    }

    if let Some(key) = &cli.model_key {
        config.classifier.model_key = Some(key.clone());
    } else if config.classifier.model_key.is_none() {
        config.classifier.model_key = std::env::var(MODEL_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty());
    }

    Ok(())
}

/// Handles the --dry-run mode: shows the effective settings
fn print_dry_run(config: &Config, base_url: &url::Url) {
    println!("=== checklink Dry Run ===\n");

    println!("Target: {}", base_url);

    println!("\nCrawler Configuration:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Delay: {}ms", config.crawler.delay_ms);
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    println!("  Check concurrency: {}", config.crawler.check_concurrency);

    println!("\nUser Agent: {}", config.user_agent.value);

    println!("\nClassifier:");
    match &config.classifier.model_key {
        Some(_) => println!(
            "  Model: {} via {}",
            config.classifier.model, config.classifier.endpoint
        ),
        None => println!("  Model: none (keyword analysis only)"),
    }
    if !config.classifier.topic_keywords.is_empty() {
        println!(
            "  Topic keywords: {}",
            config.classifier.topic_keywords.join(", ")
        );
    }

    println!("\nOutput directory: {}", config.output.output_dir);

    println!("\n✓ Configuration is valid");
}
