//! CLI entry point for the inventory pipeline.

use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use inventory_pipeline::quotes::{AlphaVantageProvider, DEFAULT_API_KEY};
use inventory_pipeline::{loader, Pipeline, PipelineConfig, PipelineResult};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Product inventory cleaning and market-price enrichment pipeline",
    long_about = "Cleans a product inventory CSV, attaches the latest market price per\n\
                  product from Alpha Vantage, and writes a cleaned dataset plus a\n\
                  markdown summary report next to the executable.\n\n\
                  ENVIRONMENT VARIABLES:\n  \
                  ALPHAVANTAGE_API_KEY    overrides the built-in API key\n\n\
                  EXAMPLES:\n  \
                  # Process an inventory file\n  \
                  inventory-pipeline products.csv\n\n  \
                  # Redirect output and raise verbosity\n  \
                  inventory-pipeline products.csv --output-dir ./out --log-level debug"
)]
struct Args {
    /// Path to the product inventory CSV to process
    input: PathBuf,

    /// Output directory for the cleaned dataset and report
    ///
    /// Defaults to the directory containing the executable.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings and errors)
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
fn init_logging(level: &str, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    // An invalid invocation prints the usage text and returns normally:
    // the success and usage-error paths share the same exit code.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            e.print()?;
            return Ok(());
        }
    };

    init_logging(&args.log_level, args.quiet);

    // Load environment variables from .env file
    dotenv().ok();

    let output_dir = args.output_dir.clone().unwrap_or_else(default_output_dir);
    let config = PipelineConfig::builder().output_dir(output_dir).build()?;

    info!("Loading dataset from: {}", args.input.display());
    let data = loader::load_products(&args.input)?;

    if data.height() == 0 {
        println!("No data to process.");
        return Ok(());
    }
    info!("Dataset loaded successfully: {:?}", data.shape());

    let api_key = env::var("ALPHAVANTAGE_API_KEY").unwrap_or_else(|_| {
        debug!("ALPHAVANTAGE_API_KEY not set, using built-in key");
        DEFAULT_API_KEY.to_string()
    });
    let provider = Arc::new(AlphaVantageProvider::new(api_key)?);

    let result = Pipeline::builder()
        .config(config)
        .quote_provider(provider)
        .build()?
        .process(data)?;

    print_run_summary(&result);

    Ok(())
}

/// Output files live next to the executable, falling back to the current
/// directory when the executable path cannot be resolved.
fn default_output_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Print a human-readable summary of the run.
///
/// This uses `println!` intentionally: it is the primary user-facing output
/// and should be visible regardless of log level settings.
fn print_run_summary(result: &PipelineResult) {
    println!();
    println!("{}", "=".repeat(60));
    println!("PIPELINE COMPLETE");
    println!("{}", "=".repeat(60));
    println!("Records processed: {}", result.rows_processed);
    println!(
        "Market prices: {} products, {} resolved, {} unresolved",
        result.enrichment.products, result.enrichment.resolved, result.enrichment.unresolved
    );
    if let Some(summary) = &result.summary {
        match summary.average_market_price {
            Some(average) => println!("Average market price: ${:.2}", average),
            None => println!("Average market price: unavailable"),
        }
    }
    if let Some(path) = &result.cleaned_path {
        println!("Cleaned dataset: {}", path.display());
    }
    if let Some(path) = &result.report_path {
        println!("Report: {}", path.display());
    }
    println!("Duration: {}ms", result.duration_ms);
    println!("{}", "=".repeat(60));
}
