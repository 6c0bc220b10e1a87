//! GitHub search and pull request retrieval.
//!
//! This module wraps Octocrab to run issue searches for a repository and
//! author, and to load the full pull request records needed for contributor
//! statistics. Errors are mapped into [`StatsError`] variants so callers can
//! distinguish fatal failures from pull requests that should simply be
//! skipped.

pub mod error;
pub mod gateway;
pub mod locator;
pub mod models;
pub mod pagination;
pub mod query;
pub mod rate_limit;

pub use error::StatsError;
pub use gateway::{DetailFetch, OctocrabGateway, PullRequestGateway, SearchGateway, SearchPage};
pub use locator::{PersonalAccessToken, RepositoryLocator, RepositoryName, RepositoryOwner};
pub use models::{PullRequestDetail, SearchMatch};
pub use pagination::{PageInfo, PageRequest};
pub use query::SearchQuery;
pub use rate_limit::{RateLimitInfo, RateLimitResource};

#[cfg(any(test, feature = "test-support"))]
pub use gateway::StubGateway;
#[cfg(test)]
pub use gateway::{MockPullRequestGateway, MockSearchGateway};
