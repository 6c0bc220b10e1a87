//! Per-author statistics over the pipeline's enriched pull requests.

use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{info, warn};

use crate::github::{
    PullRequestDetail, PullRequestGateway, RepositoryLocator, SearchGateway, StatsError,
};
use crate::pipeline::PullRequestPipeline;
use crate::telemetry::{NoopTelemetrySink, TelemetryEvent, TelemetrySink};

use super::statistics::{Statistics, calc_stats};

const MILLISECONDS_PER_HOUR: f64 = 3_600_000.0;

/// What to gather statistics for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Only pull requests created after this date are considered.
    pub from_date: Option<NaiveDate>,
    /// Authors to report on, in output order.
    pub authors: Vec<String>,
    /// Repository to search.
    pub repository: RepositoryLocator,
}

/// Statistics for one author.
#[derive(Debug, Clone, PartialEq)]
pub struct ContributorStats {
    /// Author login.
    pub author: String,
    /// Number of pull requests the statistics were computed from.
    pub pull_requests: usize,
    /// Hours from creation to merge.
    ///
    /// Only merged pull requests contribute, so this may be computed from
    /// fewer samples than `pull_requests`.
    pub merge_time: Statistics,
    /// Commits per pull request.
    pub commits: Statistics,
    /// Issue comments per pull request.
    pub comments: Statistics,
    /// Lines added plus lines deleted per pull request.
    pub change_size: Statistics,
}

/// An author's pipeline failed; the run stopped at that author.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("failed to gather pull request stats for {author}: {source}")]
pub struct AggregationError {
    /// Author whose pipeline failed.
    pub author: String,
    /// Statistics for the authors processed before the failure.
    pub completed: Vec<ContributorStats>,
    /// The pipeline error.
    #[source]
    pub source: StatsError,
}

/// Summarises one author's pull requests.
///
/// Merge time is measured in fractional hours. A pull request without a merge
/// timestamp contributes no merge time sample, but its other metrics count.
///
/// # Example
///
/// ```
/// use devstats::github::models::test_support::merged_after_hours;
/// use devstats::stats::summarise;
///
/// let stats = summarise("alice", &[merged_after_hours(1, 24), merged_after_hours(2, 48)]);
/// assert_eq!(stats.pull_requests, 2);
/// assert_eq!(stats.merge_time.mean, 36.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "merge latency is reported in fractional hours"
)]
pub fn summarise(author: &str, pull_requests: &[PullRequestDetail]) -> ContributorStats {
    let merge_hours: Vec<f64> = pull_requests
        .iter()
        .filter_map(PullRequestDetail::merge_latency)
        .map(|latency| latency.num_milliseconds() as f64 / MILLISECONDS_PER_HOUR)
        .collect();
    let commits = sample_of(pull_requests, |detail| detail.commits);
    let comments = sample_of(pull_requests, |detail| detail.comments);
    let change_size = sample_of(pull_requests, PullRequestDetail::change_size);

    ContributorStats {
        author: author.to_owned(),
        pull_requests: pull_requests.len(),
        merge_time: calc_stats(&merge_hours),
        commits: calc_stats(&commits),
        comments: calc_stats(&comments),
        change_size: calc_stats(&change_size),
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "per pull request counts are far below 2^52"
)]
fn sample_of(
    pull_requests: &[PullRequestDetail],
    metric: impl Fn(&PullRequestDetail) -> u64,
) -> Vec<f64> {
    pull_requests
        .iter()
        .map(|detail| metric(detail) as f64)
        .collect()
}

/// Runs one pipeline per author, in order, and summarises each.
pub struct StatsAggregator<G> {
    pipeline: PullRequestPipeline<G>,
    telemetry: Arc<dyn TelemetrySink>,
}

impl<G> StatsAggregator<G>
where
    G: SearchGateway + PullRequestGateway + 'static,
{
    /// Creates an aggregator that discards telemetry.
    #[must_use]
    pub fn new(pipeline: PullRequestPipeline<G>) -> Self {
        Self {
            pipeline,
            telemetry: Arc::new(NoopTelemetrySink),
        }
    }

    /// Sends per-author telemetry events to `telemetry`.
    #[must_use]
    pub fn with_telemetry(mut self, telemetry: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Gathers statistics for every author in `options`, in order.
    ///
    /// Authors are processed one after another. An author with no pull
    /// requests yields all-zero statistics.
    ///
    /// # Errors
    ///
    /// Stops at the first author whose pipeline fails and returns
    /// [`AggregationError`] carrying the statistics already computed.
    pub async fn aggregate(
        &self,
        options: &SearchOptions,
    ) -> Result<Vec<ContributorStats>, AggregationError> {
        let mut completed = Vec::with_capacity(options.authors.len());

        for author in &options.authors {
            let outcome = self
                .pipeline
                .run(&options.repository, author, options.from_date)
                .await;
            let report = outcome.report;

            let pull_requests = match outcome.into_result() {
                Ok(pull_requests) => pull_requests,
                Err(source) => {
                    warn!(author = %author, error = %source, "pipeline failed");
                    self.telemetry.record(TelemetryEvent::AuthorFailed {
                        author: author.clone(),
                        message: source.to_string(),
                    });
                    return Err(AggregationError {
                        author: author.clone(),
                        completed,
                        source,
                    });
                }
            };

            info!(
                author = %author,
                matched = report.matched,
                enriched = pull_requests.len(),
                skipped = report.skipped,
                "author summarised"
            );
            self.telemetry.record(TelemetryEvent::AuthorSummarised {
                author: author.clone(),
                matched: report.matched,
                enriched: pull_requests.len(),
                skipped: report.skipped,
                non_pull_requests: report.non_pull_requests,
            });

            completed.push(summarise(author, &pull_requests));
        }

        Ok(completed)
    }
}
