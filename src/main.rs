use anyhow::Context;
use clap::Parser;
use laserfill::{
    init_logging, load_descriptors, run_job, write_document, Config, FillStrategy,
    ToolpathDocument,
};
use std::path::PathBuf;
use tracing::{info, warn};

/// Generate shutter-modulated laser fill toolpaths from planar face descriptors.
#[derive(Parser, Debug)]
#[command(name = "laserfill", version, about)]
struct Cli {
    /// JSON array of plane descriptors
    #[arg(short, long)]
    input: PathBuf,

    /// Output file for the toolpath document (JSON)
    #[arg(short, long)]
    output: PathBuf,

    /// Configuration file (.json or .toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the fill strategy from the configuration
    #[arg(short, long, value_parser = parse_strategy)]
    strategy: Option<FillStrategy>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

fn parse_strategy(value: &str) -> Result<FillStrategy, String> {
    value.parse().map_err(|e: laserfill_settings::ConfigError| e.to_string())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_json)?;

    let mut config = match &cli.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(strategy) = cli.strategy {
        config.fill.strategy = strategy;
    }

    let descriptors = load_descriptors(&cli.input)?;
    let report = run_job(&descriptors, &config).context("Invalid configuration")?;

    for failure in &report.failures {
        warn!(
            batch = %failure.batch,
            loop_index = ?failure.loop_index,
            error = %failure.source,
            "batch skipped"
        );
    }
    for (batch, warning) in report.warnings() {
        warn!(batch, %warning, "fill warning");
    }

    let document = ToolpathDocument::from(&report);
    write_document(&cli.output, &document)?;

    info!(
        toolpaths = document.toolpaths.len(),
        failures = document.failures.len(),
        output = %cli.output.display(),
        "wrote toolpaths"
    );
    Ok(())
}
