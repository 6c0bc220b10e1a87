//! Gateways for searching and fetching pull requests through Octocrab.
//!
//! The pipeline only talks to GitHub through the [`SearchGateway`] and
//! [`PullRequestGateway`] traits so tests can substitute mocks, while
//! [`OctocrabGateway`] handles real HTTP requests.

mod client;
mod error_mapping;
mod http_utils;
mod pull_request;
mod search;
#[cfg(any(test, feature = "test-support"))]
mod stub;

pub use pull_request::OctocrabGateway;
#[cfg(any(test, feature = "test-support"))]
pub use stub::StubGateway;

use async_trait::async_trait;

use crate::github::error::StatsError;
use crate::github::locator::RepositoryLocator;
use crate::github::models::{PullRequestDetail, SearchMatch};
use crate::github::pagination::{PageInfo, PageRequest};
use crate::github::query::SearchQuery;

/// One page of issue search results.
#[derive(Debug, Clone)]
pub struct SearchPage {
    /// Matches on this page, in API order.
    pub items: Vec<SearchMatch>,
    /// Pagination state; `has_next` is the continuation signal.
    pub page_info: PageInfo,
}

/// Outcome of a pull request detail request that did not abort the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailFetch {
    /// The full record was retrieved.
    Found(PullRequestDetail),
    /// The record could not be retrieved and the item should be skipped.
    Unavailable {
        /// HTTP status when a response was received.
        status: Option<u16>,
        /// Human readable cause.
        reason: String,
    },
}

/// Gateway that can run paginated issue searches.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchGateway: Send + Sync {
    /// Fetch one page of issues matching `query`.
    async fn search_issues(
        &self,
        query: &SearchQuery,
        page: PageRequest,
    ) -> Result<SearchPage, StatsError>;
}

/// Gateway that can load full pull request records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PullRequestGateway: Send + Sync {
    /// Fetch the full record for pull request `number`.
    ///
    /// Item-level failures are reported as [`DetailFetch::Unavailable`];
    /// an `Err` aborts the pipeline.
    async fn pull_request(
        &self,
        repository: &RepositoryLocator,
        number: u64,
    ) -> Result<DetailFetch, StatsError>;
}
