//! stair-estimate - CLI for the masonry staircase estimator.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use stair_estimate::{estimate_staircase, report, validate_spec, StairSpecification, TaskCatalogue};

/// Estimate materials and labor for a masonry staircase clad in slabs.
#[derive(Parser, Debug)]
#[command(name = "stair-estimate")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Staircase specification JSON file
    #[arg(short, long)]
    input: PathBuf,

    /// Duration-template catalogue JSON file
    #[arg(short, long)]
    tasks: Option<PathBuf>,

    /// Output report file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Validate only, don't estimate
    #[arg(long)]
    validate: bool,

    /// Output the full estimate as JSON
    #[arg(long)]
    debug: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Processing: {}", args.input.display());

    let spec_json = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let spec: StairSpecification = serde_json::from_str(&spec_json)
        .with_context(|| format!("Failed to parse {}", args.input.display()))?;

    let validation = validate_spec(&spec);

    for warning in &validation.warnings {
        warn!("{}", warning);
    }

    for err in &validation.errors {
        error!("{}", err);
    }

    if !validation.passed {
        anyhow::bail!("Validation failed");
    }

    if args.validate {
        info!("Validation passed");
        return Ok(());
    }

    let catalogue = match &args.tasks {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        }
        None => TaskCatalogue::default(),
    };

    let estimate = estimate_staircase(&spec, &catalogue)?;

    if args.debug {
        let json = serde_json::to_string_pretty(&estimate)?;
        println!("{}", json);
        return Ok(());
    }

    let text = report::render(&estimate);

    match &args.output {
        Some(path) => {
            std::fs::write(path, &text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote report: {}", path.display());
        }
        None => print!("{}", text),
    }

    Ok(())
}
