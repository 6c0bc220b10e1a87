//! Per-author contributor statistics operation.

use std::io::{self, Write};
use std::sync::Arc;

use devstats::github::{PullRequestGateway, SearchGateway};
use devstats::telemetry::{NoopTelemetrySink, StderrJsonlTelemetrySink, TelemetrySink};
use devstats::{
    DevstatsConfig, OctocrabGateway, PersonalAccessToken, PullRequestPipeline, RepositoryLocator,
    StatsAggregator, StatsError,
};

use super::output::{write_progress, write_stats_table};

/// Gathers statistics for the configured authors and prints them as a table.
///
/// # Errors
///
/// Returns a configuration error before any request is made when the
/// repository, authors, date, tuning or token are invalid, and the first
/// fatal GitHub error otherwise. Rows for authors completed before a failure
/// are still printed.
pub async fn run(config: &DevstatsConfig) -> Result<(), StatsError> {
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    run_with_gateway_builder(config, OctocrabGateway::for_token, &mut stdout, &mut stderr).await
}

/// Gathers statistics using a custom gateway builder.
///
/// This function is exposed for testing with stub gateways.
pub async fn run_with_gateway_builder<G, F, W, P>(
    config: &DevstatsConfig,
    build_gateway: F,
    output: &mut W,
    progress: &mut P,
) -> Result<(), StatsError>
where
    G: SearchGateway + PullRequestGateway + 'static,
    F: FnOnce(&PersonalAccessToken, &RepositoryLocator) -> Result<G, StatsError>,
    W: Write,
    P: Write,
{
    let options = config.search_options()?;
    let pipeline_config = config.pipeline_config()?;
    let token = config.resolve_token()?;

    let gateway = build_gateway(&token, &options.repository)?;
    let aggregator = StatsAggregator::new(PullRequestPipeline::new(
        Arc::new(gateway),
        pipeline_config,
    ))
    .with_telemetry(telemetry_sink(config));

    let from_date = options
        .from_date
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default();
    write_progress(progress, &options.authors, &from_date)?;

    match aggregator.aggregate(&options).await {
        Ok(stats) => write_stats_table(output, &stats),
        Err(error) => {
            if !error.completed.is_empty() {
                write_stats_table(output, &error.completed)?;
            }
            Err(error.source)
        }
    }
}

fn telemetry_sink(config: &DevstatsConfig) -> Arc<dyn TelemetrySink> {
    if config.telemetry {
        Arc::new(StderrJsonlTelemetrySink)
    } else {
        Arc::new(NoopTelemetrySink)
    }
}
