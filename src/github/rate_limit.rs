//! Rate limit information for the GitHub API buckets used by devstats.
//!
//! The search endpoint has its own, much smaller, quota than the core REST
//! API. A run fans out many detail requests for each search page, so a
//! rate limit failure can come from either bucket; [`RateLimitInfo`] records
//! which one was exhausted.

use std::time::{SystemTime, UNIX_EPOCH};

/// GitHub rate limit bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitResource {
    /// Core REST API (pull request detail requests).
    Core,
    /// Search API (`/search/issues`).
    Search,
}

impl RateLimitResource {
    /// Returns the bucket name used by GitHub's `/rate_limit` endpoint.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Search => "search",
        }
    }
}

/// Rate limit state for one bucket.
///
/// # Example
///
/// ```
/// use devstats::github::rate_limit::{RateLimitInfo, RateLimitResource};
///
/// let info = RateLimitInfo::new(RateLimitResource::Search, 30, 0, 1_700_000_000);
/// assert!(info.is_exhausted());
/// assert_eq!(info.resource().as_str(), "search");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitInfo {
    resource: RateLimitResource,
    limit: u32,
    remaining: u32,
    /// Unix timestamp when the bucket resets.
    reset_at: u64,
}

impl RateLimitInfo {
    /// Creates a new rate limit info instance.
    #[must_use]
    pub const fn new(
        resource: RateLimitResource,
        limit: u32,
        remaining: u32,
        reset_at: u64,
    ) -> Self {
        Self {
            resource,
            limit,
            remaining,
            reset_at,
        }
    }

    /// Bucket this information describes.
    #[must_use]
    pub const fn resource(&self) -> RateLimitResource {
        self.resource
    }

    /// Maximum requests allowed in the current window.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Remaining requests in the current window.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Unix timestamp when the bucket resets.
    #[must_use]
    pub const fn reset_at(&self) -> u64 {
        self.reset_at
    }

    /// Returns true if the bucket has been exhausted.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Seconds until the bucket resets, or 0 when the reset time has passed.
    #[must_use]
    pub fn seconds_until_reset(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|duration| duration.as_secs())
            .unwrap_or(0);

        self.reset_at.saturating_sub(now)
    }
}
