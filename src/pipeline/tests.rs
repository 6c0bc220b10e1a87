//! Tests for the search-and-enrich pipeline.

use std::collections::HashSet;
use std::sync::Arc;

use rstest::{fixture, rstest};

use super::{EnrichmentReport, PipelineConfig, PullRequestPipeline};
use crate::github::models::test_support::merged_after_hours;
use crate::github::{RepositoryLocator, SearchMatch, StatsError, StubGateway};

const AUTHOR: &str = "alice";

#[fixture]
fn repository() -> RepositoryLocator {
    RepositoryLocator::parse_slug("cockroachdb/cockroach").expect("slug should parse")
}

fn stub_with_pull_requests(count: u64) -> StubGateway {
    (1..=count).fold(StubGateway::new(), |stub, number| {
        stub.with_pull_request(AUTHOR, merged_after_hours(number, 1))
    })
}

fn pipeline(stub: &Arc<StubGateway>, workers: usize) -> PullRequestPipeline<StubGateway> {
    PullRequestPipeline::new(
        Arc::clone(stub),
        PipelineConfig {
            workers,
            ..PipelineConfig::default()
        },
    )
}

#[rstest]
#[tokio::test]
async fn collects_every_match_across_three_pages(repository: RepositoryLocator) {
    let stub = Arc::new(stub_with_pull_requests(207));

    let outcome = pipeline(&stub, 4).run(&repository, AUTHOR, None).await;

    assert_eq!(outcome.error, None);
    assert_eq!(outcome.pull_requests.len(), 207);
    assert_eq!(stub.search_calls(), 3, "pages of 100, 100 and 7");
    let distinct: HashSet<u64> = outcome
        .pull_requests
        .iter()
        .map(|detail| detail.number)
        .collect();
    assert_eq!(distinct.len(), 207, "every record is delivered once");
    assert_eq!(outcome.report.matched, 207);
}

#[rstest]
#[tokio::test]
async fn skips_pull_requests_that_are_not_found(repository: RepositoryLocator) {
    let stub = Arc::new(
        (46..=50).fold(stub_with_pull_requests(45), |stub, number| {
            stub.with_search_results(
                AUTHOR,
                [SearchMatch {
                    number,
                    is_pull_request: true,
                }],
            )
            .with_missing(number)
        }),
    );

    let outcome = pipeline(&stub, 4).run(&repository, AUTHOR, None).await;

    assert_eq!(outcome.error, None);
    assert_eq!(outcome.pull_requests.len(), 45);
    assert_eq!(
        outcome.report,
        EnrichmentReport {
            matched: 50,
            enriched: 45,
            skipped: 5,
            non_pull_requests: 0,
        }
    );
    assert_eq!(stub.detail_calls(), 50);
}

#[rstest]
#[tokio::test]
async fn fatal_detail_error_cancels_remaining_work(repository: RepositoryLocator) {
    let stub = Arc::new(stub_with_pull_requests(50).with_fatal_detail(1, 500, "Server Error"));

    let outcome = pipeline(&stub, 4).run(&repository, AUTHOR, None).await;

    assert_eq!(
        outcome.error,
        Some(StatsError::DetailFetch {
            number: 1,
            status: 500,
            message: "Server Error".to_owned(),
        })
    );
    assert_eq!(
        stub.calls_after_failure(),
        0,
        "no remote call may start once the run is cancelled"
    );
    assert!(
        stub.detail_calls() < 50,
        "cancellation should leave matches unfetched, got {} calls",
        stub.detail_calls()
    );
    assert!(outcome.pull_requests.len() < 50);
}

#[rstest]
#[tokio::test]
async fn drops_plain_issues_without_fetching_them(repository: RepositoryLocator) {
    let stub = Arc::new(stub_with_pull_requests(3).with_search_results(
        AUTHOR,
        [
            SearchMatch {
                number: 100,
                is_pull_request: false,
            },
            SearchMatch {
                number: 101,
                is_pull_request: false,
            },
        ],
    ));

    let outcome = pipeline(&stub, 2).run(&repository, AUTHOR, None).await;

    assert_eq!(outcome.error, None);
    assert_eq!(outcome.pull_requests.len(), 3);
    assert_eq!(outcome.report.non_pull_requests, 2);
    assert_eq!(stub.detail_calls(), 3);
}

#[rstest]
#[tokio::test]
async fn search_failure_fails_the_run(repository: RepositoryLocator) {
    let stub = Arc::new(StubGateway::new().with_search_failure(
        AUTHOR,
        StatsError::Authentication {
            message: "Bad credentials".to_owned(),
        },
    ));

    let outcome = pipeline(&stub, 4).run(&repository, AUTHOR, None).await;

    assert!(
        matches!(outcome.error, Some(StatsError::Authentication { .. })),
        "expected Authentication error, got {:?}",
        outcome.error
    );
    assert!(outcome.pull_requests.is_empty());
    assert_eq!(stub.detail_calls(), 0);
}

#[rstest]
#[tokio::test]
async fn author_without_matches_yields_empty_collection(repository: RepositoryLocator) {
    let stub = Arc::new(StubGateway::new());

    let outcome = pipeline(&stub, 4).run(&repository, "bob", None).await;

    let pull_requests = outcome.into_result().expect("run should succeed");
    assert!(pull_requests.is_empty());
    assert_eq!(stub.search_calls(), 1);
}

#[rstest]
#[tokio::test]
async fn invalid_page_size_fails_before_any_request(repository: RepositoryLocator) {
    let stub = Arc::new(stub_with_pull_requests(1));
    let pipeline = PullRequestPipeline::new(
        Arc::clone(&stub),
        PipelineConfig {
            per_page: 0,
            ..PipelineConfig::default()
        },
    );

    let result = pipeline.run(&repository, AUTHOR, None).await.into_result();

    assert!(
        matches!(result, Err(StatsError::InvalidPagination { .. })),
        "expected InvalidPagination, got {result:?}"
    );
    assert_eq!(stub.search_calls(), 0);
}

#[rstest]
#[case::single_worker(1)]
#[case::more_workers_than_matches(16)]
#[case::zero_workers_runs_one(0)]
#[tokio::test]
async fn worker_count_does_not_change_the_result(
    repository: RepositoryLocator,
    #[case] workers: usize,
) {
    let stub = Arc::new(stub_with_pull_requests(10));

    let outcome = pipeline(&stub, workers).run(&repository, AUTHOR, None).await;

    assert_eq!(outcome.error, None);
    assert_eq!(outcome.pull_requests.len(), 10);
}

#[rstest]
#[tokio::test]
async fn small_queues_apply_backpressure_without_losing_records(repository: RepositoryLocator) {
    let stub = Arc::new(stub_with_pull_requests(120));
    let pipeline = PullRequestPipeline::new(
        Arc::clone(&stub),
        PipelineConfig {
            workers: 3,
            queue_capacity: 2,
            per_page: 25,
        },
    );

    let outcome = pipeline.run(&repository, AUTHOR, None).await;

    assert_eq!(outcome.error, None);
    assert_eq!(outcome.pull_requests.len(), 120);
    assert_eq!(stub.search_calls(), 5);
}
