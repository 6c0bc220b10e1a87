//! Enrichment workers: turn search matches into full pull request records.
//!
//! Workers share one input queue and one output queue. The output queue is
//! closed by whichever worker exits last, tracked by an atomic countdown held
//! in [`EnrichedSender`]. The countdown is decremented on drop, so a worker
//! that errors, is cancelled or panics still counts as exited.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_channel::{Receiver, SendError, Sender};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::github::{
    DetailFetch, PullRequestDetail, PullRequestGateway, RepositoryLocator, SearchMatch,
    StatsError,
};

/// Per-worker counts returned when a worker exits cleanly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) struct WorkerTally {
    pub(super) enriched: usize,
    pub(super) skipped: usize,
    pub(super) non_pull_requests: usize,
}

/// A worker's handle on the output queue.
///
/// Dropping the last handle closes the queue.
pub(super) struct EnrichedSender {
    sender: Sender<PullRequestDetail>,
    remaining: Arc<AtomicUsize>,
}

impl EnrichedSender {
    /// Creates `workers` handles sharing one countdown.
    pub(super) fn for_workers(sender: &Sender<PullRequestDetail>, workers: usize) -> Vec<Self> {
        let remaining = Arc::new(AtomicUsize::new(workers));
        (0..workers)
            .map(|_| Self {
                sender: sender.clone(),
                remaining: Arc::clone(&remaining),
            })
            .collect()
    }

    async fn send(&self, detail: PullRequestDetail) -> Result<(), SendError<PullRequestDetail>> {
        self.sender.send(detail).await
    }
}

impl Drop for EnrichedSender {
    fn drop(&mut self) {
        if self.remaining.fetch_sub(1, Ordering::AcqRel) == 1 && self.sender.close() {
            debug!("last enrichment worker exited; enriched queue closed");
        }
    }
}

/// What a worker should do after handling one match.
enum Step {
    Continue,
    Stop,
}

/// One enrichment worker.
pub(super) struct EnrichmentWorker<G: ?Sized> {
    pub(super) id: usize,
    pub(super) gateway: Arc<G>,
    pub(super) repository: Arc<RepositoryLocator>,
    pub(super) input: Receiver<SearchMatch>,
    pub(super) output: EnrichedSender,
    pub(super) cancel: CancellationToken,
}

impl<G> EnrichmentWorker<G>
where
    G: PullRequestGateway + ?Sized,
{
    /// Consumes matches until the input queue is closed and drained or the
    /// run is cancelled.
    ///
    /// A fatal detail error cancels the shared token before it is returned,
    /// so sibling workers stop before issuing another request.
    pub(super) async fn run(self) -> Result<WorkerTally, StatsError> {
        let mut tally = WorkerTally::default();

        loop {
            let received = tokio::select! {
                biased;
                () = self.cancel.cancelled() => break,
                received = self.input.recv() => received,
            };
            let Ok(search_match) = received else {
                break;
            };

            match self.enrich(search_match, &mut tally).await {
                Ok(Step::Continue) => {}
                Ok(Step::Stop) => break,
                Err(error) => {
                    self.cancel.cancel();
                    return Err(error);
                }
            }
        }

        debug!(
            worker = self.id,
            enriched = tally.enriched,
            skipped = tally.skipped,
            non_pull_requests = tally.non_pull_requests,
            "enrichment worker finished"
        );
        Ok(tally)
    }

    async fn enrich(
        &self,
        search_match: SearchMatch,
        tally: &mut WorkerTally,
    ) -> Result<Step, StatsError> {
        if !search_match.is_pull_request {
            tally.non_pull_requests += 1;
            return Ok(Step::Continue);
        }

        if self.cancel.is_cancelled() {
            return Ok(Step::Stop);
        }

        let fetched = tokio::select! {
            biased;
            () = self.cancel.cancelled() => return Ok(Step::Stop),
            fetched = self.gateway.pull_request(&self.repository, search_match.number) => fetched?,
        };

        match fetched {
            DetailFetch::Found(detail) => {
                let sent = tokio::select! {
                    biased;
                    () = self.cancel.cancelled() => return Ok(Step::Stop),
                    sent = self.output.send(detail) => sent,
                };
                if sent.is_err() {
                    return Ok(Step::Stop);
                }
                tally.enriched += 1;
            }
            DetailFetch::Unavailable { status, reason } => {
                warn!(
                    worker = self.id,
                    number = search_match.number,
                    status,
                    %reason,
                    "skipping pull request that could not be fetched"
                );
                tally.skipped += 1;
            }
        }

        Ok(Step::Continue)
    }
}
