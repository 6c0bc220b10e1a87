//! Devstats CLI entrypoint for contributor statistics.

mod cli;

use std::io::{self, Write};
use std::process::ExitCode;

use devstats::{DevstatsConfig, StatsError};
use ortho_config::OrthoConfig;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_ENV: &str = "DEVSTATS_LOG";

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let _ignored = writeln!(io::stderr().lock(), "{error}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StatsError> {
    let config = load_config()?;
    cli::contributor_stats::run(&config).await
}

/// Installs a stderr subscriber filtered by `DEVSTATS_LOG`, defaulting to
/// warnings only.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`StatsError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<DevstatsConfig, StatsError> {
    DevstatsConfig::load().map_err(|error| StatsError::Configuration {
        message: error.to_string(),
    })
}
