//! Data models for search matches and enriched pull request records.
//!
//! Types prefixed with `Api` are deserialisation targets for GitHub
//! responses and convert into the public domain types.

use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;
use serde::de::IgnoredAny;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// One item of an issue search result.
///
/// The search endpoint returns issues and pull requests alike; only the
/// latter carry a `pull_request` object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    /// Issue or pull request number.
    pub number: u64,
    /// Whether the match is a pull request.
    pub is_pull_request: bool,
}

/// Full pull request record used to compute contributor statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestDetail {
    /// Pull request number.
    pub number: u64,
    /// When the pull request was opened.
    pub created_at: DateTime<Utc>,
    /// When the pull request was merged, if it was.
    pub merged_at: Option<DateTime<Utc>>,
    /// Number of commits.
    pub commits: u64,
    /// Number of issue comments.
    pub comments: u64,
    /// Lines added.
    pub additions: u64,
    /// Lines deleted.
    pub deletions: u64,
}

impl PullRequestDetail {
    /// Time from creation to merge, or `None` for an unmerged pull request.
    #[must_use]
    pub fn merge_latency(&self) -> Option<TimeDelta> {
        self.merged_at.map(|merged_at| merged_at - self.created_at)
    }

    /// Total changed lines (`additions + deletions`).
    #[must_use]
    pub const fn change_size(&self) -> u64 {
        self.additions.saturating_add(self.deletions)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiSearchItem {
    pub(crate) number: u64,
    pub(crate) pull_request: Option<IgnoredAny>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiPullRequestDetail {
    pub(crate) number: u64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) merged_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub(crate) commits: u64,
    #[serde(default)]
    pub(crate) comments: u64,
    #[serde(default)]
    pub(crate) additions: u64,
    #[serde(default)]
    pub(crate) deletions: u64,
}

impl From<ApiSearchItem> for SearchMatch {
    fn from(value: ApiSearchItem) -> Self {
        Self {
            number: value.number,
            is_pull_request: value.pull_request.is_some(),
        }
    }
}

impl From<ApiPullRequestDetail> for PullRequestDetail {
    fn from(value: ApiPullRequestDetail) -> Self {
        Self {
            number: value.number,
            created_at: value.created_at,
            merged_at: value.merged_at,
            commits: value.commits,
            comments: value.comments,
            additions: value.additions,
            deletions: value.deletions,
        }
    }
}
