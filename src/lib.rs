//! Devstats library crate providing GitHub contributor statistics.
//!
//! The library searches a repository's pull requests by author, loads each
//! pull request record concurrently through Octocrab, and summarises merge
//! latency, commits, comments and change size per author. Errors are surfaced
//! as friendly [`StatsError`] values that can be displayed in the CLI.

pub mod config;
pub mod github;
pub mod pipeline;
pub mod stats;
pub mod telemetry;

pub use config::DevstatsConfig;
pub use github::{
    OctocrabGateway, PersonalAccessToken, PullRequestDetail, RepositoryLocator, SearchMatch,
    StatsError,
};
pub use pipeline::{PipelineConfig, PullRequestPipeline};
pub use stats::{AggregationError, ContributorStats, SearchOptions, StatsAggregator, Statistics};
