//! Reduce stage: drains enriched records into a collection.

use async_channel::Receiver;

use crate::github::PullRequestDetail;

/// Collects every record from `input` until the queue is closed and empty.
///
/// The queue is always closed by the last enrichment worker, so this
/// returns on both the success and the error path.
pub(super) async fn collect(input: Receiver<PullRequestDetail>) -> Vec<PullRequestDetail> {
    let mut collected = Vec::new();
    while let Ok(detail) = input.recv().await {
        collected.push(detail);
    }
    collected
}
