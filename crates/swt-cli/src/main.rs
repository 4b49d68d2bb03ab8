// crates/swt-cli/src/main.rs
//
// CLI entrypoint for the swt tool.
//
// Initializes tracing, parses CLI arguments, loads configuration, and
// dispatches to the fit, predict, and evaluate subcommands.

mod commands;
mod config;
mod error;
mod graph;
mod model_file;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use commands::evaluate::EvaluateCmd;
use commands::fit::FitCmd;
use commands::predict::PredictCmd;
use config::{expand_tilde, SwtConfig};
use error::CliError;
use output::OutputFormat;

/// swt — SW transformation classifier for bipartite graphs.
#[derive(Parser, Debug)]
#[command(
    name = "swt",
    version = "0.1.0",
    about = "Classify bottom nodes of a bipartite graph with the SW transformation"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true, default_value = "~/.swt/config.toml")]
    config: String,

    /// Weight function override: tanh, simple, inverse, or own.
    #[arg(long, global = true)]
    weight_function: Option<String>,

    /// Output format override.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Fit a model from an edge list and labels, and save it.
    Fit(FitCmd),

    /// Score bottom nodes with a saved model.
    Predict(PredictCmd),

    /// Compare weight functions on a hold-out split by ROC AUC.
    Evaluate(EvaluateCmd),
}

/// Fall back to defaults when the configuration could not be loaded.
///
/// Called after tracing is initialized so the outcome is logged.
fn resolve_config(path: &str, loaded: Result<SwtConfig, CliError>) -> SwtConfig {
    match loaded {
        Ok(cfg) => {
            tracing::info!("Loaded configuration from {}", path);
            cfg
        }
        Err(CliError::Io { .. }) => {
            tracing::debug!("No configuration at {}; using defaults", path);
            SwtConfig::default()
        }
        Err(e) => {
            tracing::warn!("Could not load config from {}: {}. Using defaults.", path, e);
            SwtConfig::default()
        }
    }
}

fn run(cli: &Cli, config: &SwtConfig) -> Result<(), CliError> {
    let format = cli.format.unwrap_or(config.format);
    match &cli.command {
        Commands::Fit(cmd) => commands::fit::run(cmd, config),
        Commands::Predict(cmd) => commands::predict::run(cmd, format),
        Commands::Evaluate(cmd) => commands::evaluate::run(cmd, config, format),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // The config's log level is the fallback filter; RUST_LOG wins when set.
    let config_path = expand_tilde(&cli.config);
    let loaded = SwtConfig::load(&config_path);
    let log_level = loaded
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = resolve_config(&config_path, loaded);
    if let Some(ref name) = cli.weight_function {
        config.weight_function = name.clone();
    }

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
