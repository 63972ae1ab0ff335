//! Term-Sweep main entry point
//!
//! This is the command-line interface for the Term-Sweep site scanner.

use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use term_sweep::config::{load_config_or_default, DEFAULT_CONFIG_PATH};
use term_sweep::crawler::sweep;
use term_sweep::url::parse_seed_url;
use tracing_subscriber::EnvFilter;

/// Term-Sweep: scan a website for search terms
///
/// Crawls every same-origin page reachable from the seed URL, matches each
/// page against the terms listed in the terms file (items.txt by default),
/// and writes JSON and HTML reports named after the seed's hostname.
/// Optional settings are read from term-sweep.toml in the working directory.
#[derive(Parser, Debug)]
#[command(name = "term-sweep")]
#[command(version)]
#[command(about = "Scan a website for search terms", long_about = None)]
struct Cli {
    /// URL the crawl starts from
    #[arg(value_name = "SEED_URL")]
    seed_url: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Sets up the logging/tracing subscriber
///
/// `RUST_LOG` overrides the default filter.
fn setup_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("term_sweep=info,warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

async fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let seed = parse_seed_url(&cli.seed_url)?;

    let config = load_config_or_default(Path::new(DEFAULT_CONFIG_PATH))?;
    tracing::debug!("Configuration: {:?}", config);

    let summary = sweep(&seed, &config).await?;

    tracing::info!(
        "Crawl completed: {} pages, {} with matches, {} files written",
        summary.report.len(),
        summary.report.pages_with_matches(),
        summary.artifacts.len()
    );

    Ok(())
}
