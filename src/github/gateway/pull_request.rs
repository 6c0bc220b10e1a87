//! Octocrab implementation of the pull request detail gateway.

use async_trait::async_trait;
use http::{StatusCode, Uri};
use octocrab::Octocrab;
use tracing::debug;

use crate::github::error::StatsError;
use crate::github::locator::{PersonalAccessToken, RepositoryLocator};
use crate::github::models::ApiPullRequestDetail;
use crate::github::rate_limit::{RateLimitInfo, RateLimitResource};

use super::client::build_octocrab_client;
use super::error_mapping::{
    classify_detail_response, error_summary, is_rate_limit, rate_limit_error,
};
use super::http_utils::extract_github_message;
use super::{DetailFetch, PullRequestGateway};

/// Octocrab-backed gateway serving both issue search and pull request
/// detail requests.
pub struct OctocrabGateway {
    pub(super) client: Octocrab,
}

impl OctocrabGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds an Octocrab client for the given token and repository.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::InvalidUrl` when the base URI cannot be parsed or
    /// `StatsError::Api` when Octocrab fails to construct a client.
    pub fn for_token(
        token: &PersonalAccessToken,
        repository: &RepositoryLocator,
    ) -> Result<Self, StatsError> {
        let octocrab = build_octocrab_client(token, repository)?;
        Ok(Self::new(octocrab))
    }

    /// Looks up the current state of one rate limit bucket.
    ///
    /// Lookup failures are swallowed; the caller reports the original error
    /// without reset details.
    pub(super) async fn fetch_rate_limit_info(
        &self,
        resource: RateLimitResource,
    ) -> Option<RateLimitInfo> {
        let resources = self.client.ratelimit().get().await.ok()?.resources;
        let rate = match resource {
            RateLimitResource::Core => resources.core,
            RateLimitResource::Search => resources.search,
        };
        let Ok(limit) = u32::try_from(rate.limit) else {
            return None;
        };
        let Ok(remaining) = u32::try_from(rate.remaining) else {
            return None;
        };
        Some(RateLimitInfo::new(resource, limit, remaining, rate.reset))
    }
}

#[async_trait]
impl PullRequestGateway for OctocrabGateway {
    async fn pull_request(
        &self,
        repository: &RepositoryLocator,
        number: u64,
    ) -> Result<DetailFetch, StatsError> {
        let uri: Uri = repository
            .pull_request_path(number)
            .parse::<Uri>()
            .map_err(|error| StatsError::InvalidUrl(error.to_string()))?;

        let response = match self.client._get_with_headers(uri, None).await {
            Ok(response) => response,
            Err(error) => {
                let reason = error_summary(&error);
                debug!(number, %reason, "pull request request failed in transport");
                return Ok(DetailFetch::Unavailable {
                    status: None,
                    reason,
                });
            }
        };

        let status = response.status();
        let body = match self.client.body_to_string(response).await {
            Ok(body) => body,
            Err(error) => {
                return Ok(DetailFetch::Unavailable {
                    status: Some(status.as_u16()),
                    reason: format!(
                        "response body could not be read: {}",
                        error_summary(&error)
                    ),
                });
            }
        };

        if status == StatusCode::OK {
            let api: ApiPullRequestDetail =
                serde_json::from_str(&body).map_err(|error| StatsError::Api {
                    message: format!("pull request #{number} deserialisation failed: {error}"),
                })?;
            return Ok(DetailFetch::Found(api.into()));
        }

        let message = extract_github_message(&body).unwrap_or_default();
        if is_rate_limit(status, &message, None) {
            let rate_limit = self.fetch_rate_limit_info(RateLimitResource::Core).await;
            return Err(rate_limit_error(
                &format!("pull request #{number}"),
                &message,
                rate_limit,
            ));
        }

        classify_detail_response(number, status, &body)
    }
}
