//! Test helpers for constructing `PullRequestDetail` fixtures.
//!
//! # Examples
//!
//! ```
//! use devstats::github::models::test_support::merged_after_hours;
//!
//! let detail = merged_after_hours(1, 24);
//! assert_eq!(detail.merge_latency().map(|delta| delta.num_hours()), Some(24));
//! ```

use chrono::{DateTime, TimeDelta, TimeZone, Utc};

use super::PullRequestDetail;

/// Creation timestamp shared by every fixture.
#[must_use]
pub fn fixture_created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// A pull request merged `hours` after it was opened, with zero counts.
#[must_use]
pub fn merged_after_hours(number: u64, hours: i64) -> PullRequestDetail {
    let created_at = fixture_created_at();
    PullRequestDetail {
        number,
        created_at,
        merged_at: Some(created_at + TimeDelta::hours(hours)),
        commits: 0,
        comments: 0,
        additions: 0,
        deletions: 0,
    }
}

/// A merged pull request carrying the given commit, comment, and line counts.
#[must_use]
pub fn with_counts(
    number: u64,
    commits: u64,
    comments: u64,
    additions: u64,
    deletions: u64,
) -> PullRequestDetail {
    PullRequestDetail {
        commits,
        comments,
        additions,
        deletions,
        ..merged_after_hours(number, 1)
    }
}

/// A pull request with no merge timestamp.
#[must_use]
pub fn unmerged(number: u64) -> PullRequestDetail {
    PullRequestDetail {
        merged_at: None,
        ..merged_after_hours(number, 0)
    }
}
