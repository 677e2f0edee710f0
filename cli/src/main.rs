//! `numinfo` command-line entry point.

use anyhow::Context;
use clap::Parser;
use numinfo_core::AppConfig;
use numinfo_lookup::{persist_with_indent, render, NumberEnricher};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "numinfo")]
#[command(about = "Gather carrier, location and time zone information for a phone number", long_about = None)]
#[command(version)]
struct Cli {
    /// Phone number in international format, e.g. +14155552671
    #[arg(required_unless_present_any = ["list_sources", "save_config"])]
    phone_number: Option<String>,

    /// Write the full result as JSON to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Read settings from this file instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the enabled data sources as JSON and exit
    #[arg(long)]
    list_sources: bool,

    /// Write the config file with every setting filled in and exit
    #[arg(long)]
    save_config: bool,
}

/// Initialize tracing subscriber for logging to stderr
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    if cli.save_config {
        let path = save_config(cli.config.as_deref())?;
        println!("Configuration written to {}", path.display());
        return Ok(ExitCode::SUCCESS);
    }

    let config =
        AppConfig::load_with_env(cli.config.as_deref()).context("failed to load configuration")?;
    let enricher = NumberEnricher::from_config(&config);

    if cli.list_sources {
        let listing = serde_json::to_string_pretty(&enricher.sources())?;
        println!("{listing}");
        return Ok(ExitCode::SUCCESS);
    }

    let Some(raw) = cli.phone_number.as_deref() else {
        anyhow::bail!("a phone number is required");
    };
    debug!(sources = enricher.sources().len(), "starting lookup");

    let result = enricher
        .gather_all(raw)
        .with_context(|| format!("could not parse phone number {raw:?}"))?;

    print!("{}", render(&result));

    if let Some(path) = &cli.output {
        persist_with_indent(&result, path, config.output.indent)
            .with_context(|| format!("failed to save results to {}", path.display()))?;
        println!("\nResults saved to {}", path.display());
    }

    Ok(ExitCode::SUCCESS)
}

/// Rewrite the config file from its current contents plus defaults.
///
/// Environment overrides are not applied, so keys and endpoint overrides
/// stay out of the file.
fn save_config(path: Option<&Path>) -> anyhow::Result<PathBuf> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => AppConfig::config_path()?,
    };
    let config = AppConfig::load_from(&path).context("failed to load configuration")?;
    config
        .save_to(&path)
        .with_context(|| format!("failed to write configuration to {}", path.display()))?;
    Ok(path)
}
