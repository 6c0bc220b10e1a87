//! Shared HTTP helpers for the gateway implementation.

/// Pulls GitHub's `message` field out of a JSON error body.
pub(super) fn extract_github_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return None;
    };
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
}

/// Message to report for an error response: GitHub's `message` when the
/// body is JSON, otherwise the trimmed body text.
pub(super) fn response_message(body: &str) -> String {
    extract_github_message(body).unwrap_or_else(|| body.trim().to_owned())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::response_message;

    #[rstest]
    #[case::json_message(r#"{"message": "Server Error"}"#, "Server Error")]
    #[case::plain_text("  upstream timeout \n", "upstream timeout")]
    #[case::json_without_message(r#"{"errors": []}"#, r#"{"errors": []}"#)]
    fn response_message_prefers_github_message(#[case] body: &str, #[case] expected: &str) {
        assert_eq!(response_message(body), expected);
    }
}
