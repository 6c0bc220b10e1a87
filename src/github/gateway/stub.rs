//! In-memory gateway for exercising the pipeline without HTTP.
//!
//! Search results are registered per author and paginated with the page
//! size of each request. Detail requests resolve against registered records;
//! unknown numbers behave like a 404. The stub counts every remote call and,
//! once it has served a fatal detail error, counts the calls that arrive
//! afterwards so tests can check that cancellation stops further traffic.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::github::error::StatsError;
use crate::github::locator::RepositoryLocator;
use crate::github::models::{PullRequestDetail, SearchMatch};
use crate::github::pagination::{PageInfo, PageRequest};
use crate::github::query::SearchQuery;

use super::{DetailFetch, PullRequestGateway, SearchGateway, SearchPage};

#[derive(Debug, Clone)]
enum StubDetail {
    Found(PullRequestDetail),
    Missing,
    Fatal { status: u16, message: String },
}

/// Gateway answering from registered search results and detail records.
#[derive(Debug, Default)]
pub struct StubGateway {
    search_results: HashMap<String, Vec<SearchMatch>>,
    search_failures: HashMap<String, StatsError>,
    details: HashMap<u64, StubDetail>,
    search_calls: AtomicUsize,
    detail_calls: AtomicUsize,
    failed: AtomicBool,
    calls_after_failure: AtomicUsize,
}

impl StubGateway {
    /// Creates a stub with no registered data.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the search matches returned for `author`, in API order.
    #[must_use]
    pub fn with_search_results(
        mut self,
        author: &str,
        matches: impl IntoIterator<Item = SearchMatch>,
    ) -> Self {
        self.search_results
            .entry(author.to_owned())
            .or_default()
            .extend(matches);
        self
    }

    /// Registers a pull request that is matched by `author`'s search and
    /// resolves to `detail`.
    #[must_use]
    pub fn with_pull_request(self, author: &str, detail: PullRequestDetail) -> Self {
        let number = detail.number;
        let mut stub = self.with_search_results(
            author,
            [SearchMatch {
                number,
                is_pull_request: true,
            }],
        );
        stub.details.insert(number, StubDetail::Found(detail));
        stub
    }

    /// Makes the search for `author` fail with `error`.
    #[must_use]
    pub fn with_search_failure(mut self, author: &str, error: StatsError) -> Self {
        self.search_failures.insert(author.to_owned(), error);
        self
    }

    /// Makes the detail request for `number` answer 404.
    #[must_use]
    pub fn with_missing(mut self, number: u64) -> Self {
        self.details.insert(number, StubDetail::Missing);
        self
    }

    /// Makes the detail request for `number` fail fatally with `status`.
    #[must_use]
    pub fn with_fatal_detail(mut self, number: u64, status: u16, message: &str) -> Self {
        self.details.insert(
            number,
            StubDetail::Fatal {
                status,
                message: message.to_owned(),
            },
        );
        self
    }

    /// Number of search requests served.
    #[must_use]
    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    /// Number of detail requests served.
    #[must_use]
    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    /// Number of remote calls received after a fatal detail error was served.
    #[must_use]
    pub fn calls_after_failure(&self) -> usize {
        self.calls_after_failure.load(Ordering::SeqCst)
    }

    fn note_call(&self) {
        if self.failed.load(Ordering::SeqCst) {
            self.calls_after_failure.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[async_trait]
impl SearchGateway for StubGateway {
    async fn search_issues(
        &self,
        query: &SearchQuery,
        page: PageRequest,
    ) -> Result<SearchPage, StatsError> {
        self.note_call();
        self.search_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = self.search_failures.get(query.author()) {
            return Err(error.clone());
        }

        let matches = self
            .search_results
            .get(query.author())
            .map_or(&[][..], Vec::as_slice);
        let per_page = usize::from(page.per_page());
        let page_index = usize::try_from(page.page().saturating_sub(1)).unwrap_or(usize::MAX);
        let start = page_index.saturating_mul(per_page);

        let items: Vec<SearchMatch> = matches.iter().skip(start).take(per_page).copied().collect();
        let has_next = start.saturating_add(per_page) < matches.len();

        Ok(SearchPage {
            items,
            page_info: PageInfo::builder(page.page(), page.per_page())
                .has_next(has_next)
                .build(),
        })
    }
}

#[async_trait]
impl PullRequestGateway for StubGateway {
    async fn pull_request(
        &self,
        _repository: &RepositoryLocator,
        number: u64,
    ) -> Result<DetailFetch, StatsError> {
        self.note_call();
        self.detail_calls.fetch_add(1, Ordering::SeqCst);

        match self.details.get(&number) {
            Some(StubDetail::Found(detail)) => Ok(DetailFetch::Found(detail.clone())),
            Some(StubDetail::Fatal { status, message }) => {
                self.failed.store(true, Ordering::SeqCst);
                Err(StatsError::DetailFetch {
                    number,
                    status: *status,
                    message: message.clone(),
                })
            }
            Some(StubDetail::Missing) | None => Ok(DetailFetch::Unavailable {
                status: Some(404),
                reason: format!("pull request #{number} not found"),
            }),
        }
    }
}
