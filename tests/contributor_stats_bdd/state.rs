//! Scenario state for the contributor statistics BDD tests.
//!
//! Each scenario owns one current-thread runtime and one mock GitHub server.
//! The Octocrab client spawns its service on the ambient runtime, so the
//! gateway is built inside the same `block_on` that drives the run.

use std::rc::Rc;
use std::sync::Arc;

use devstats::{
    AggregationError, ContributorStats, OctocrabGateway, PersonalAccessToken, PipelineConfig,
    PullRequestPipeline, RepositoryLocator, SearchOptions, StatsAggregator,
};
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use tokio::runtime::{Builder, Runtime};
use wiremock::MockServer;

#[derive(ScenarioState, Default)]
pub(crate) struct StatsState {
    pub(crate) runtime: Slot<Rc<Runtime>>,
    pub(crate) server: Slot<Rc<MockServer>>,
    pub(crate) result: Slot<Vec<ContributorStats>>,
    pub(crate) error: Slot<AggregationError>,
}

/// Returns the scenario runtime and mock server, starting both on first use.
pub(crate) fn ensure_runtime(stats_state: &StatsState) -> (Rc<Runtime>, Rc<MockServer>) {
    let runtime = stats_state.runtime.get().unwrap_or_else(|| {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map(Rc::new)
            .unwrap_or_else(|error| panic!("failed to create Tokio runtime: {error}"));
        stats_state.runtime.set(Rc::clone(&runtime));
        runtime
    });

    let server = stats_state.server.get().unwrap_or_else(|| {
        let server = Rc::new(runtime.block_on(MockServer::start()));
        stats_state.server.set(Rc::clone(&server));
        server
    });

    (runtime, server)
}

/// Runs the aggregator against the mock server for the given authors.
pub(crate) fn gather_statistics(
    stats_state: &StatsState,
    authors: Vec<String>,
) -> Result<Vec<ContributorStats>, AggregationError> {
    let (runtime, server) = ensure_runtime(stats_state);

    let repository = RepositoryLocator::parse_slug_on_host("owner/repo", &server.uri())
        .unwrap_or_else(|error| panic!("invalid repository: {error}"));
    let token = PersonalAccessToken::new("valid-token")
        .unwrap_or_else(|error| panic!("invalid token: {error}"));

    runtime.block_on(async {
        let gateway = OctocrabGateway::for_token(&token, &repository)
            .unwrap_or_else(|error| panic!("failed to build gateway: {error}"));
        let aggregator = StatsAggregator::new(PullRequestPipeline::new(
            Arc::new(gateway),
            PipelineConfig::default(),
        ));
        let options = SearchOptions {
            from_date: None,
            authors,
            repository,
        };

        aggregator.aggregate(&options).await
    })
}
