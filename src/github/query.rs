//! Search query construction for merged pull requests by author.

use std::fmt;

use chrono::NaiveDate;

use super::locator::RepositoryLocator;

/// Issue search query selecting one author's merged pull requests in a
/// repository, optionally restricted to those created after a date.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use devstats::RepositoryLocator;
/// use devstats::github::SearchQuery;
///
/// let repository = RepositoryLocator::parse_slug("cockroachdb/cockroach")
///     .expect("slug should parse");
/// let query = SearchQuery::new(&repository, "alice", NaiveDate::from_ymd_opt(2024, 1, 31));
/// assert_eq!(
///     query.to_string(),
///     "is:pull-request is:closed is:merged repo:cockroachdb/cockroach \
///      created:>2024-01-31 author:alice"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    repository: String,
    author: String,
    created_after: Option<NaiveDate>,
}

impl SearchQuery {
    /// Builds the query for `author` in `repository`.
    #[must_use]
    pub fn new(
        repository: &RepositoryLocator,
        author: &str,
        created_after: Option<NaiveDate>,
    ) -> Self {
        Self {
            repository: repository.to_string(),
            author: author.to_owned(),
            created_after,
        }
    }

    /// Author login the query filters on.
    #[must_use]
    pub const fn author(&self) -> &str {
        self.author.as_str()
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "is:pull-request is:closed is:merged repo:{}",
            self.repository
        )?;
        if let Some(date) = self.created_after {
            write!(f, " created:>{}", date.format("%Y-%m-%d"))?;
        }
        write!(f, " author:{}", self.author)
    }
}
