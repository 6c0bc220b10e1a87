//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.devstats.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `DEVSTATS_REPO`, `DEVSTATS_TOKEN`, or
//!    `GITHUB_TOKEN` for the token
//! 4. **Command-line arguments** – `--repo`/`-r`, `--authors`/`-a`, and so on
//!
//! # Configuration File
//!
//! ```toml
//! repo = "cockroachdb/cockroach"
//! authors = "alice,bob"
//! from = "2024-01-01"
//! workers = 8
//! ```

use std::env;

use chrono::{Months, NaiveDate, Utc};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::github::error::StatsError;
use crate::github::locator::{PersonalAccessToken, RepositoryLocator};
use crate::github::pagination::MAX_PER_PAGE;
use crate::pipeline::{DEFAULT_PER_PAGE, DEFAULT_QUEUE_CAPACITY, DEFAULT_WORKERS, PipelineConfig};
use crate::stats::SearchOptions;

const DEFAULT_GITHUB_URL: &str = "https://github.com";
const FROM_DATE_FORMAT: &str = "%Y-%m-%d";

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `DEVSTATS_TOKEN`, `GITHUB_TOKEN`, or `--token`: Authentication token
/// - `DEVSTATS_REPO` or `--repo`: Repository as `owner/name`
/// - `DEVSTATS_AUTHORS` or `--authors`: Comma separated author logins
/// - `DEVSTATS_FROM` or `--from`: Earliest creation date (`YYYY-MM-DD`)
///
/// # Example
///
/// ```no_run
/// use devstats::DevstatsConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = DevstatsConfig::load().expect("failed to load configuration");
/// let options = config.search_options().expect("repository and authors required");
/// let token = config.resolve_token().expect("token required");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "DEVSTATS",
    discovery(
        dotfile_name = ".devstats.toml",
        config_file_name = "devstats.toml",
        app_name = "devstats"
    )
)]
pub struct DevstatsConfig {
    /// Personal access token for GitHub API authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `DEVSTATS_TOKEN` or `GITHUB_TOKEN`
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Repository to report on, as `owner/name`.
    ///
    /// Can be provided via:
    /// - CLI: `--repo <OWNER/NAME>` or `-r <OWNER/NAME>`
    /// - Environment: `DEVSTATS_REPO`
    /// - Config file: `repo = "..."`
    #[ortho_config(cli_short = 'r')]
    pub repo: Option<String>,

    /// Comma separated author logins, reported in the given order.
    ///
    /// Can be provided via:
    /// - CLI: `--authors <LOGINS>` or `-a <LOGINS>`
    /// - Environment: `DEVSTATS_AUTHORS`
    /// - Config file: `authors = "alice,bob"`
    #[ortho_config(cli_short = 'a')]
    pub authors: Option<String>,

    /// Only pull requests created after this date (`YYYY-MM-DD`) are counted.
    ///
    /// Defaults to one month before today.
    #[ortho_config(cli_short = 'f')]
    pub from: Option<String>,

    /// Web URL of the GitHub host. Hosts other than github.com are treated as
    /// GitHub Enterprise and reached through `<url>/api/v3`.
    #[ortho_config()]
    pub github_url: Option<String>,

    /// Number of concurrent pull request fetches per author.
    #[ortho_config()]
    pub workers: usize,

    /// Capacity of each pipeline queue.
    #[ortho_config()]
    pub queue_capacity: usize,

    /// Search page size (1 to 100).
    #[ortho_config()]
    pub per_page: u8,

    /// Writes per-author telemetry events to stderr as JSON lines.
    ///
    /// Note: `DEVSTATS_TELEMETRY` is not supported because `ortho_config`
    /// does not load boolean values from the environment.
    #[ortho_config()]
    pub telemetry: bool,
}

impl Default for DevstatsConfig {
    fn default() -> Self {
        Self {
            token: None,
            repo: None,
            authors: None,
            from: None,
            github_url: None,
            workers: DEFAULT_WORKERS,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            per_page: DEFAULT_PER_PAGE,
            telemetry: false,
        }
    }
}

impl DevstatsConfig {
    /// Resolves the token from configuration or the `GITHUB_TOKEN`
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::MissingToken`] when no token source provides a
    /// non-blank value.
    pub fn resolve_token(&self) -> Result<PersonalAccessToken, StatsError> {
        let value = self
            .token
            .clone()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
            .ok_or(StatsError::MissingToken)?;
        PersonalAccessToken::new(value)
    }

    /// GitHub web URL, defaulting to `https://github.com`.
    #[must_use]
    pub fn github_url(&self) -> &str {
        self.github_url.as_deref().unwrap_or(DEFAULT_GITHUB_URL)
    }

    /// Parses the configured repository.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::Configuration`] when no repository is set,
    /// [`StatsError::InvalidRepository`] when it is not `owner/name`, and
    /// [`StatsError::InvalidUrl`] for an unparseable GitHub URL.
    pub fn require_repository(&self) -> Result<RepositoryLocator, StatsError> {
        let repo = self
            .repo
            .as_deref()
            .ok_or_else(|| StatsError::Configuration {
                message: "repository is required (use --repo or -r)".to_owned(),
            })?;
        RepositoryLocator::parse_slug_on_host(repo, self.github_url())
    }

    /// Splits the configured authors on commas, dropping blanks.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::MissingAuthors`] when no author remains.
    pub fn require_authors(&self) -> Result<Vec<String>, StatsError> {
        let authors: Vec<String> = self
            .authors
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|author| !author.is_empty())
            .map(ToOwned::to_owned)
            .collect();

        if authors.is_empty() {
            return Err(StatsError::MissingAuthors);
        }
        Ok(authors)
    }

    /// Earliest creation date, defaulting to one month before `today`.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::InvalidDate`] when `from` is not `YYYY-MM-DD`.
    pub fn from_date_relative_to(&self, today: NaiveDate) -> Result<NaiveDate, StatsError> {
        match self.from.as_deref() {
            Some(value) => NaiveDate::parse_from_str(value.trim(), FROM_DATE_FORMAT).map_err(
                |_| StatsError::InvalidDate {
                    value: value.to_owned(),
                },
            ),
            None => Ok(today.checked_sub_months(Months::new(1)).unwrap_or(today)),
        }
    }

    /// Earliest creation date, defaulting to one month before today (UTC).
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::InvalidDate`] when `from` is not `YYYY-MM-DD`.
    pub fn from_date(&self) -> Result<NaiveDate, StatsError> {
        self.from_date_relative_to(Utc::now().date_naive())
    }

    /// Pipeline tuning derived from `workers`, `queue_capacity` and
    /// `per_page`.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::Configuration`] when a value is out of range.
    pub fn pipeline_config(&self) -> Result<PipelineConfig, StatsError> {
        if self.workers == 0 {
            return Err(StatsError::Configuration {
                message: "workers must be at least 1".to_owned(),
            });
        }
        if self.queue_capacity == 0 {
            return Err(StatsError::Configuration {
                message: "queue_capacity must be at least 1".to_owned(),
            });
        }
        if self.per_page == 0 || self.per_page > MAX_PER_PAGE {
            return Err(StatsError::Configuration {
                message: format!("per_page must be between 1 and {MAX_PER_PAGE}"),
            });
        }

        Ok(PipelineConfig {
            workers: self.workers,
            queue_capacity: self.queue_capacity,
            per_page: self.per_page,
        })
    }

    /// Builds the search options for a run.
    ///
    /// # Errors
    ///
    /// Returns the first configuration error from
    /// [`Self::require_repository`], [`Self::require_authors`] or
    /// [`Self::from_date`].
    pub fn search_options(&self) -> Result<SearchOptions, StatsError> {
        Ok(SearchOptions {
            repository: self.require_repository()?,
            authors: self.require_authors()?,
            from_date: Some(self.from_date()?),
        })
    }
}

#[cfg(test)]
mod tests;
