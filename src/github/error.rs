//! Error types exposed by the GitHub and statistics layers.

use thiserror::Error;

use super::rate_limit::RateLimitInfo;

/// Errors surfaced while reading configuration, talking to GitHub, or
/// running the enrichment pipeline.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StatsError {
    /// The repository identifier is not of the form `owner/name`.
    #[error("repository must be given as owner/name (for example jtsiros/devstats), got `{value}`")]
    InvalidRepository {
        /// The identifier as supplied.
        value: String,
    },

    /// The `from` date is not a calendar date in `YYYY-MM-DD` form.
    #[error("from date must be formatted as YYYY-MM-DD, got `{value}`")]
    InvalidDate {
        /// The date string as supplied.
        value: String,
    },

    /// No authors were requested.
    #[error("at least one author is required (use --authors or -a)")]
    MissingAuthors,

    /// The provided URL could not be parsed.
    #[error("GitHub URL is invalid: {0}")]
    InvalidUrl(String),

    /// The authentication token was missing.
    #[error("personal access token is required")]
    MissingToken,

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// The authentication token was rejected by GitHub.
    #[error("GitHub rejected the token: {message}")]
    Authentication {
        /// GitHub error message returned with the 401/403 response.
        message: String,
    },

    /// GitHub returned a non-authentication API error.
    #[error("GitHub API error: {message}")]
    Api {
        /// Response body from GitHub describing the failure.
        message: String,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// Rate limit exceeded - the API returned 403/429 with a rate limit message.
    #[error("GitHub API rate limit exceeded: {message}")]
    RateLimitExceeded {
        /// Rate limit info if available from the rate limit endpoint.
        rate_limit: Option<RateLimitInfo>,
        /// Error message from GitHub.
        message: String,
    },

    /// Invalid pagination parameters.
    #[error("invalid pagination: {message}")]
    InvalidPagination {
        /// Description of the invalid parameter.
        message: String,
    },

    /// A pull request detail request returned an unexpected status with a
    /// response body. This aborts the whole pipeline.
    #[error("PR GET ({status}): [{number}] - {message}")]
    DetailFetch {
        /// Pull request number that was requested.
        number: u64,
        /// HTTP status code returned by GitHub.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },

    /// A pipeline task panicked or was aborted unexpectedly.
    #[error("pipeline worker failed: {message}")]
    Worker {
        /// Join failure detail.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}

impl StatsError {
    /// Returns true for errors raised while validating configuration, before
    /// any network activity takes place.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidRepository { .. }
                | Self::InvalidDate { .. }
                | Self::MissingAuthors
                | Self::InvalidUrl(_)
                | Self::MissingToken
                | Self::Configuration { .. }
        )
    }
}
