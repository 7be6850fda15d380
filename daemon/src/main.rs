//! surety — initialise a governance core from config and drive it from a script.

mod config;
mod script;

use anyhow::Context;
use clap::Parser;
use config::SuretyConfig;
use std::path::PathBuf;
use surety_governance::GovernanceEngine;
use surety_utils::LogFormat;

#[derive(Parser)]
#[command(name = "surety", about = "Airline registry governance core")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, env = "SURETY_CONFIG")]
    config: PathBuf,

    /// Log level: "trace", "debug", "info", "warn", "error". Overrides the config file.
    #[arg(long, env = "SURETY_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json". Overrides the config file.
    #[arg(long, env = "SURETY_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Replay a JSON operation script and print one JSON report per operation.
    Replay {
        /// Path to the script file.
        script: PathBuf,
    },
    /// Print the effective configuration as TOML.
    ShowConfig,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = SuretyConfig::from_toml_file(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }

    surety_utils::init_logging(config.log_format, &config.log_level)
        .context("initialising logging")?;
    tracing::info!("loaded config from {}", cli.config.display());

    match cli.command {
        Command::ShowConfig => {
            print!("{}", config.to_toml_string()?);
        }
        Command::Replay { script } => {
            let source = std::fs::read_to_string(&script)
                .with_context(|| format!("reading script {}", script.display()))?;
            let ops = script::parse(&source)
                .with_context(|| format!("parsing script {}", script.display()))?;

            let mut engine = GovernanceEngine::new(
                config.administrator,
                config.first_airline,
                config.first_airline_name.clone(),
                config.params.clone(),
            )?;

            let reports = script::replay(&mut engine, &ops);
            let rejected = reports.iter().filter(|r| !r.ok).count();
            for report in &reports {
                println!("{}", serde_json::to_string(report)?);
            }

            tracing::info!(
                operations = reports.len(),
                rejected,
                registered = engine.registered_count(),
                pending = engine.pending_airlines().len(),
                operational = engine.is_operational(),
                "replay finished"
            );
        }
    }

    Ok(())
}
