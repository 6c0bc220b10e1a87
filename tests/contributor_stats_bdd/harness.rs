//! Shared data helpers for the contributor statistics BDD tests.

use chrono::{DateTime, Duration, Utc};
use serde_json::{Value, json};
use wiremock::Mock;

use super::state::{StatsState, ensure_runtime};

const CREATED_AT: &str = "2024-03-01T00:00:00Z";

/// Search query the pipeline sends for `author` in `owner/repo`.
pub(crate) fn search_query(author: &str) -> String {
    format!("is:pull-request is:closed is:merged repo:owner/repo author:{author}")
}

/// Parses a comma separated list of pull request numbers.
pub(crate) fn parse_numbers(numbers: &str) -> Vec<u64> {
    numbers
        .trim_matches('"')
        .split(',')
        .map(|number| {
            number
                .trim()
                .parse()
                .unwrap_or_else(|error| panic!("invalid pull request number `{number}`: {error}"))
        })
        .collect()
}

/// Search response listing `numbers` as pull requests on a single page.
pub(crate) fn search_body(numbers: &[u64]) -> Value {
    let items: Vec<Value> = numbers
        .iter()
        .map(|number| {
            json!({
                "number": number,
                "pull_request": { "url": format!("https://example.invalid/pulls/{number}") }
            })
        })
        .collect();

    json!({
        "total_count": items.len(),
        "incomplete_results": false,
        "items": items
    })
}

/// Pull request record merged `hours` after creation.
pub(crate) fn detail_body(number: u64, hours: i64) -> Value {
    let created_at: DateTime<Utc> = CREATED_AT
        .parse()
        .unwrap_or_else(|error| panic!("invalid fixture timestamp: {error}"));
    let merged_at = created_at + Duration::hours(hours);

    json!({
        "number": number,
        "created_at": CREATED_AT,
        "merged_at": merged_at.to_rfc3339(),
        "commits": 1,
        "comments": 0,
        "additions": 10,
        "deletions": 2
    })
}

/// Mounts `mock` on the scenario's server, starting it on first use.
pub(crate) fn mount(stats_state: &StatsState, mock: Mock) {
    let (runtime, server) = ensure_runtime(stats_state);
    runtime.block_on(mock.mount(&server));
}
