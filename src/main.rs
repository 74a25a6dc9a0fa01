//! jobdrop CLI
//!
//! One-shot job aggregator: fetches postings from the Adzuna API and RSS
//! feeds, filters them, and writes a CSV. Always exits 0; fetch and pipeline
//! errors are logged rather than escalated, so a failed run leaves at worst
//! an empty output file.

use clap::Parser;
use jobdrop::{
    models::{AdzunaCredentials, Config},
    pipeline::run_pipeline,
};

/// jobdrop - Job posting aggregator
#[derive(Parser, Debug)]
#[command(name = "jobdrop", version, about = "Aggregates job postings into a filtered CSV")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: String,

    /// Override the output CSV path
    #[arg(short, long)]
    output: Option<String>,

    /// Override the recency window in hours
    #[arg(long)]
    window_hours: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

/// Initialize logging based on verbosity flags.
fn init_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        "warn"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point. The process exits 0 regardless of fetch outcomes.
#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let mut config = Config::load_or_default(&cli.config);
    if let Some(path) = cli.output {
        config.output.path = path;
    }
    if let Some(hours) = cli.window_hours {
        config.search.post_within_hours = hours;
    }

    if let Err(e) = config.validate() {
        log::error!("Invalid configuration: {}", e);
        return;
    }

    // Credential presence toggles the API source
    let credentials = AdzunaCredentials::from_env();

    match run_pipeline(&config, credentials).await {
        Ok(summary) => {
            println!(
                "Found {} jobs. Saved to {}",
                summary.written, summary.output_path
            );
        }
        Err(e) => {
            log::error!("Run failed: {}", e);
        }
    }
}
