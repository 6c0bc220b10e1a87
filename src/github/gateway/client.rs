//! Octocrab client construction for the gateway implementation.

use http::Uri;
use http::header::USER_AGENT;
use octocrab::Octocrab;

use crate::github::error::StatsError;
use crate::github::locator::{PersonalAccessToken, RepositoryLocator};

use super::error_mapping::{error_summary, map_octocrab_error};

const CLIENT_USER_AGENT: &str = concat!("devstats/", env!("CARGO_PKG_VERSION"));

/// Builds an authenticated Octocrab client targeting the repository's API
/// base.
///
/// # Errors
///
/// Returns `StatsError::InvalidUrl` when the base URI cannot be parsed or
/// `StatsError::Api` when Octocrab fails to construct a client.
pub(super) fn build_octocrab_client(
    token: &PersonalAccessToken,
    repository: &RepositoryLocator,
) -> Result<Octocrab, StatsError> {
    let base_uri: Uri = repository
        .api_base()
        .as_str()
        .parse::<Uri>()
        .map_err(|error| StatsError::InvalidUrl(error.to_string()))?;

    Octocrab::builder()
        .personal_token(token.as_ref())
        .add_header(USER_AGENT, CLIENT_USER_AGENT.to_owned())
        .base_uri(base_uri)
        .map_err(|error| StatsError::Api {
            message: format!("build client failed: {}", error_summary(&error)),
        })?
        .build()
        .map_err(|error| map_octocrab_error("build client", &error))
}
