//! Error mapping helpers for the Octocrab gateway.
//!
//! Search failures are always fatal. Detail failures are split into
//! item-level skips ([`DetailFetch::Unavailable`]) and fatal errors by
//! [`classify_detail_response`].

use http::StatusCode;

use crate::github::error::StatsError;
use crate::github::rate_limit::RateLimitInfo;

use super::DetailFetch;
use super::http_utils::response_message;

/// Checks if a GitHub error status indicates an authentication failure.
pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Checks if an octocrab error represents a network/transport issue.
pub(super) const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

/// First line of an Octocrab error's display text.
///
/// Octocrab appends a captured backtrace after a blank line; only the cause
/// is kept.
pub(super) fn error_summary(error: &octocrab::Error) -> String {
    error
        .to_string()
        .lines()
        .next()
        .unwrap_or_default()
        .trim()
        .to_owned()
}

/// Checks whether a status and message describe a rate limit rejection.
pub(super) fn is_rate_limit(
    status: StatusCode,
    message: &str,
    documentation_url: Option<&str>,
) -> bool {
    let is_rate_limit_status = matches!(
        status,
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
    );

    let message_indicates_rate_limit = message.to_lowercase().contains("rate limit")
        || documentation_url.is_some_and(|url| url.contains("rate-limit"));

    is_rate_limit_status && message_indicates_rate_limit
}

pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> StatsError {
    if let octocrab::Error::GitHub { source, .. } = error {
        return if is_auth_failure(source.status_code) {
            StatsError::Authentication {
                message: format!(
                    "{operation} failed: GitHub returned {status} {message}",
                    status = source.status_code,
                    message = source.message
                ),
            }
        } else {
            StatsError::Api {
                message: format!(
                    "{operation} failed with status {status}: {message}",
                    status = source.status_code,
                    message = source.message
                ),
            }
        };
    }

    let summary = error_summary(error);
    if is_network_error(error) {
        return StatsError::Network {
            message: format!("{operation} failed: {summary}"),
        };
    }

    StatsError::Api {
        message: format!("{operation} failed: {summary}"),
    }
}

/// Builds the rate limit error, appending the reset time when known.
pub(super) fn rate_limit_error(
    operation: &str,
    message: &str,
    rate_limit: Option<RateLimitInfo>,
) -> StatsError {
    let base_message = format!("{operation} failed: {message}");
    let full_message = match &rate_limit {
        Some(info) => format!(
            "{base_message} ({bucket} resets at {reset})",
            bucket = info.resource().as_str(),
            reset = info.reset_at()
        ),
        None => base_message,
    };

    StatsError::RateLimitExceeded {
        rate_limit,
        message: full_message,
    }
}

/// Decides what a non-200 detail response means for the pipeline.
///
/// * 404 and 410 are item-level skips.
/// * Any status with an empty body is an item-level skip.
/// * Any other status with a body is fatal.
pub(super) fn classify_detail_response(
    number: u64,
    status: StatusCode,
    body: &str,
) -> Result<DetailFetch, StatsError> {
    if matches!(status, StatusCode::NOT_FOUND | StatusCode::GONE) {
        return Ok(DetailFetch::Unavailable {
            status: Some(status.as_u16()),
            reason: format!("pull request #{number} not found"),
        });
    }

    if body.trim().is_empty() {
        return Ok(DetailFetch::Unavailable {
            status: Some(status.as_u16()),
            reason: format!("GitHub returned {status} with an empty body"),
        });
    }

    Err(StatsError::DetailFetch {
        number,
        status: status.as_u16(),
        message: response_message(body),
    })
}
