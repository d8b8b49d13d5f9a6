//! CLI entry point: analyse a pin header and print the free-pin report.

use clap::Parser;
use pin_audit::report::{self, ReportFormat};
use pin_audit::{Config, PinAnalysis, load_config};
use std::path::PathBuf;

/// Free-pin report for STM32F407 boards
#[derive(Parser, Debug)]
#[command(name = "pin-audit", version, about = "Report free GPIO pins from a Marlin pin header.")]
struct Cli {
    /// Path to the pin definition header (overrides the config value)
    #[arg(long)]
    header: Option<PathBuf>,

    /// Path to a TOML board config file (overrides defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    // Logs go to stderr so the report on stdout stays clean.
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = match cli.config {
        Some(ref path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => Config::default(),
    };

    let header = cli.header.unwrap_or_else(|| PathBuf::from(&config.header));
    let analysis = PinAnalysis::from_file(&header, &config).map_err(|e| {
        tracing::error!("{}", e);
        e
    })?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    report::render(&analysis, &config, cli.format, &mut out)?;
    Ok(())
}
