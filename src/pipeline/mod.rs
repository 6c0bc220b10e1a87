//! Concurrent search-and-enrich pipeline for one author.
//!
//! ```text
//! search ──▶ [matches] ──▶ enrich × W ──▶ [records] ──▶ reduce
//! ```
//!
//! Both queues are bounded, so a slow enrichment pool holds back the search
//! stage. All stages share one cancellation token: the first fatal error
//! cancels it, becomes the pipeline's error, and later errors are dropped.
//! Records enriched before the failure are still returned in
//! [`PipelineOutcome`].

mod enrich;
mod reduce;
mod search;

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::github::{
    PageRequest, PullRequestDetail, PullRequestGateway, RepositoryLocator, SearchGateway,
    SearchQuery, StatsError,
};

use enrich::{EnrichedSender, EnrichmentWorker, WorkerTally};

/// Default number of enrichment workers.
pub const DEFAULT_WORKERS: usize = 4;
/// Default capacity of each pipeline queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;
/// Default search page size.
pub const DEFAULT_PER_PAGE: u8 = 100;

/// Tuning for one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Number of concurrent enrichment workers; values below 1 run one.
    pub workers: usize,
    /// Capacity of the match and record queues; values below 1 use 1.
    pub queue_capacity: usize,
    /// Search page size (`1..=100`).
    pub per_page: u8,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// Counts describing what happened to an author's search matches.
///
/// Counts cover stages that finished without error; a failing worker's own
/// tally is lost with its error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentReport {
    /// Matches produced by the search stage.
    pub matched: usize,
    /// Records delivered to the reduce stage.
    pub enriched: usize,
    /// Pull requests skipped because their record could not be fetched.
    pub skipped: usize,
    /// Matches dropped because they were plain issues.
    pub non_pull_requests: usize,
}

impl EnrichmentReport {
    const fn record(&mut self, stage: StageReport) {
        match stage {
            StageReport::Search { matched } => self.matched += matched,
            StageReport::Enrich(tally) => {
                self.enriched += tally.enriched;
                self.skipped += tally.skipped;
                self.non_pull_requests += tally.non_pull_requests;
            }
        }
    }
}

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutcome {
    /// Records collected, in completion order. Partial when `error` is set.
    pub pull_requests: Vec<PullRequestDetail>,
    /// Per-stage counts.
    pub report: EnrichmentReport,
    /// First fatal error raised by any stage.
    pub error: Option<StatsError>,
}

impl PipelineOutcome {
    fn failed(error: StatsError) -> Self {
        Self {
            pull_requests: Vec::new(),
            report: EnrichmentReport::default(),
            error: Some(error),
        }
    }

    /// Returns the collected records, discarding them if the run failed.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error raised during the run.
    pub fn into_result(self) -> Result<Vec<PullRequestDetail>, StatsError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        Ok(self.pull_requests)
    }
}

enum StageReport {
    Search { matched: usize },
    Enrich(WorkerTally),
}

type StageResult = Result<StageReport, StatsError>;

/// Runs the search, enrichment and reduce stages for one author at a time.
pub struct PullRequestPipeline<G> {
    gateway: Arc<G>,
    config: PipelineConfig,
}

impl<G> PullRequestPipeline<G>
where
    G: SearchGateway + PullRequestGateway + 'static,
{
    /// Creates a pipeline sharing `gateway` across its stages.
    #[must_use]
    pub const fn new(gateway: Arc<G>, config: PipelineConfig) -> Self {
        Self { gateway, config }
    }

    /// Collects `author`'s merged pull requests in `repository`, optionally
    /// restricted to those created after `from_date`.
    ///
    /// Matches that are plain issues are dropped, and pull requests whose
    /// record cannot be fetched are skipped and counted in the report.
    pub async fn run(
        &self,
        repository: &RepositoryLocator,
        author: &str,
        from_date: Option<NaiveDate>,
    ) -> PipelineOutcome {
        let first_page = match PageRequest::first(self.config.per_page) {
            Ok(page) => page,
            Err(error) => return PipelineOutcome::failed(error),
        };
        let workers = self.config.workers.max(1);
        let capacity = self.config.queue_capacity.max(1);
        let query = SearchQuery::new(repository, author, from_date);
        let cancel = CancellationToken::new();

        let (match_tx, match_rx) = async_channel::bounded(capacity);
        let (record_tx, record_rx) = async_channel::bounded(capacity);

        debug!(%repository, author, workers, capacity, "starting pipeline");

        let mut stages: JoinSet<StageResult> = JoinSet::new();
        let search = search::run_search(
            Arc::clone(&self.gateway),
            query,
            first_page,
            match_tx,
            cancel.clone(),
        );
        stages.spawn(async move { search.await.map(|matched| StageReport::Search { matched }) });

        let shared_repository = Arc::new(repository.clone());
        for (id, output) in EnrichedSender::for_workers(&record_tx, workers)
            .into_iter()
            .enumerate()
        {
            let worker = EnrichmentWorker {
                id,
                gateway: Arc::clone(&self.gateway),
                repository: Arc::clone(&shared_repository),
                input: match_rx.clone(),
                output,
                cancel: cancel.clone(),
            };
            stages.spawn(async move { worker.run().await.map(StageReport::Enrich) });
        }
        drop(match_rx);
        drop(record_tx);

        let (pull_requests, (report, error)) =
            tokio::join!(reduce::collect(record_rx), supervise(stages, cancel));

        debug!(
            author,
            collected = pull_requests.len(),
            failed = error.is_some(),
            "pipeline finished"
        );

        PipelineOutcome {
            pull_requests,
            report,
            error,
        }
    }
}

/// Joins every stage, cancelling the rest on the first failure.
async fn supervise(
    mut stages: JoinSet<StageResult>,
    cancel: CancellationToken,
) -> (EnrichmentReport, Option<StatsError>) {
    let mut report = EnrichmentReport::default();
    let mut first_error: Option<StatsError> = None;

    while let Some(joined) = stages.join_next().await {
        let outcome = joined
            .map_err(|error| StatsError::Worker {
                message: error.to_string(),
            })
            .and_then(|result| result);

        match outcome {
            Ok(stage) => report.record(stage),
            Err(error) => {
                cancel.cancel();
                if first_error.is_none() {
                    first_error = Some(error);
                } else {
                    debug!(%error, "discarding later pipeline error");
                }
            }
        }
    }

    (report, first_error)
}

#[cfg(test)]
mod tests;
