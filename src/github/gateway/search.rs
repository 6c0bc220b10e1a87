//! Octocrab implementation of the issue search gateway.

use async_trait::async_trait;
use octocrab::Page;

use crate::github::error::StatsError;
use crate::github::models::{ApiSearchItem, SearchMatch};
use crate::github::pagination::{PageInfo, PageRequest};
use crate::github::query::SearchQuery;
use crate::github::rate_limit::RateLimitResource;

use super::error_mapping::{is_rate_limit, map_octocrab_error, rate_limit_error};
use super::{OctocrabGateway, SearchGateway, SearchPage};

const SEARCH_PATH: &str = "/search/issues";

#[async_trait]
impl SearchGateway for OctocrabGateway {
    async fn search_issues(
        &self,
        query: &SearchQuery,
        page: PageRequest,
    ) -> Result<SearchPage, StatsError> {
        let query_str = query.to_string();
        let page_str = page.page().to_string();
        let per_page_str = page.per_page().to_string();

        let query_params = [
            ("q", query_str.as_str()),
            ("page", page_str.as_str()),
            ("per_page", per_page_str.as_str()),
        ];

        let page_result: Page<ApiSearchItem> =
            match self.client.get(SEARCH_PATH, Some(&query_params)).await {
                Ok(page_result) => page_result,
                Err(error) => {
                    return Err(self
                        .map_search_error("search issues", &error)
                        .await);
                }
            };

        let has_next = page_result.next.is_some();
        let total_pages = page_result.number_of_pages();

        let items: Vec<SearchMatch> = page_result
            .items
            .into_iter()
            .map(ApiSearchItem::into)
            .collect();

        let page_info = PageInfo::builder(page.page(), page.per_page())
            .total_pages(total_pages)
            .has_next(has_next)
            .build();

        Ok(SearchPage { items, page_info })
    }
}

impl OctocrabGateway {
    async fn map_search_error(&self, operation: &str, error: &octocrab::Error) -> StatsError {
        match error {
            octocrab::Error::GitHub { source, .. }
                if is_rate_limit(
                    source.status_code,
                    &source.message,
                    source.documentation_url.as_deref(),
                ) =>
            {
                let rate_limit = self.fetch_rate_limit_info(RateLimitResource::Search).await;
                rate_limit_error(operation, &source.message, rate_limit)
            }
            _ => map_octocrab_error(operation, error),
        }
    }
}
