//! Repository identifiers, API base derivation, and token wrappers.

use std::fmt;

use url::Url;

use super::error::StatsError;

const GITHUB_API_BASE: &str = "https://api.github.com";

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, StatsError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(StatsError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

/// Derives the GitHub API base URL from a web host.
///
/// `github.com` maps to the public API; any other host is treated as GitHub
/// Enterprise and served from `/api/v3`.
fn derive_api_base(host_url: &str) -> Result<Url, StatsError> {
    let parsed =
        Url::parse(host_url).map_err(|error| StatsError::InvalidUrl(error.to_string()))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| StatsError::InvalidUrl("URL must include a host".to_owned()))?;

    if host.eq_ignore_ascii_case("github.com") {
        return Url::parse(GITHUB_API_BASE)
            .map_err(|error| StatsError::InvalidUrl(error.to_string()));
    }

    let authority = if host.contains(':') {
        format!("[{host}]")
    } else {
        host.to_owned()
    };
    let mut api_url = Url::parse(&format!("{}://{authority}", parsed.scheme()))
        .map_err(|error| StatsError::InvalidUrl(error.to_string()))?;
    api_url
        .set_port(parsed.port())
        .map_err(|()| StatsError::InvalidUrl("invalid port".to_owned()))?;
    api_url.set_path("api/v3");
    Ok(api_url)
}

/// A repository identified by an `owner/name` slug, plus the API base used
/// to reach it.
///
/// # Example
///
/// ```
/// use devstats::RepositoryLocator;
///
/// let locator = RepositoryLocator::parse_slug("jtsiros/devstats")
///     .expect("slug should parse");
/// assert_eq!(locator.owner().as_str(), "jtsiros");
/// assert_eq!(locator.to_string(), "jtsiros/devstats");
/// assert!(RepositoryLocator::parse_slug("cockroachdb").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    api_base: Url,
    owner: RepositoryOwner,
    repository: RepositoryName,
}

impl RepositoryLocator {
    /// Parses an `owner/name` slug for a repository hosted on github.com.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::InvalidRepository` unless the slug splits into
    /// exactly two non-empty tokens on `/`.
    pub fn parse_slug(slug: &str) -> Result<Self, StatsError> {
        Self::parse_slug_on_host(slug, "https://github.com")
    }

    /// Parses an `owner/name` slug for a repository on the given GitHub host.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::InvalidRepository` for a malformed slug and
    /// `StatsError::InvalidUrl` when the host URL cannot be parsed.
    pub fn parse_slug_on_host(slug: &str, host_url: &str) -> Result<Self, StatsError> {
        let (owner, repository) = split_slug(slug)?;
        let api_base = derive_api_base(host_url)?;

        Ok(Self {
            api_base,
            owner,
            repository,
        })
    }

    /// API base URL derived from the repository host.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// API path of a single pull request in this repository.
    pub(crate) fn pull_request_path(&self, number: u64) -> String {
        format!(
            "/repos/{}/{}/pulls/{number}",
            self.owner.as_str(),
            self.repository.as_str()
        )
    }
}

impl fmt::Display for RepositoryLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner.as_str(), self.repository.as_str())
    }
}

fn split_slug(slug: &str) -> Result<(RepositoryOwner, RepositoryName), StatsError> {
    let invalid = || StatsError::InvalidRepository {
        value: slug.to_owned(),
    };
    let (owner, name) = slug.trim().split_once('/').ok_or_else(invalid)?;
    if owner.is_empty() || name.is_empty() || name.contains('/') {
        return Err(invalid());
    }

    Ok((
        RepositoryOwner(owner.to_owned()),
        RepositoryName(name.to_owned()),
    ))
}
