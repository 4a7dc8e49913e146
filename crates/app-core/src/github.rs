//! A thin client for listing a GitHub user's public repositories.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode, header};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Number of repositories returned per lookup.
pub const REPOSITORY_LIMIT: usize = 5;

const MAX_USERNAME_LEN: usize = 39;

#[derive(Debug, Error)]
pub enum GithubError {
    #[error("Invalid GitHub username: {0}")]
    InvalidUsername(String),

    #[error("Invalid GitHub base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("GitHub responded with status {0}")]
    Status(StatusCode),
}

/// The `github` configuration section.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub token: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://api.github.com".to_string()
}

fn default_user_agent() -> String {
    "devconnector".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub id: i64,
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub watchers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    pub created_at: DateTime<Utc>,
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait RepositoryDirectory: Send + Sync {
    /// Returns the most recently created public repositories of `username`,
    /// at most [`REPOSITORY_LIMIT`], ordered oldest first.
    async fn latest_repositories(&self, username: &str) -> Result<Vec<Repository>, GithubError>;
}

pub struct GithubClient {
    http: Client,
    base_url: Url,
    token: String,
    user_agent: String,
}

impl GithubClient {
    pub fn new(settings: GithubSettings) -> Result<Self, GithubError> {
        let base_url = Url::parse(&settings.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(GithubError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }

        Ok(Self {
            http: Client::new(),
            base_url,
            token: settings.token,
            user_agent: settings.user_agent,
        })
    }

    fn repositories_url(&self, username: &str) -> Result<Url, GithubError> {
        let mut endpoint = self.base_url.clone();
        endpoint
            .path_segments_mut()
            .map_err(|_| GithubError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(["users", username, "repos"]);
        endpoint
            .query_pairs_mut()
            .append_pair("per_page", &REPOSITORY_LIMIT.to_string())
            .append_pair("sort", "created")
            .append_pair("direction", "desc");

        Ok(endpoint)
    }
}

/// GitHub logins are 1-39 ASCII alphanumerics or single hyphens, never
/// leading or trailing with a hyphen.
pub fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username.len() <= MAX_USERNAME_LEN
        && !username.starts_with('-')
        && !username.ends_with('-')
        && !username.contains("--")
        && username.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Keeps the newest [`REPOSITORY_LIMIT`] entries and orders them by creation time ascending.
fn oldest_first(mut repositories: Vec<Repository>) -> Vec<Repository> {
    repositories.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    repositories.truncate(REPOSITORY_LIMIT);
    repositories.reverse();
    repositories
}

#[async_trait]
impl RepositoryDirectory for GithubClient {
    async fn latest_repositories(&self, username: &str) -> Result<Vec<Repository>, GithubError> {
        if !is_valid_username(username) {
            return Err(GithubError::InvalidUsername(username.to_string()));
        }

        let response = self
            .http
            .get(self.repositories_url(username)?)
            .header(header::USER_AGENT, &self.user_agent)
            .header(header::ACCEPT, "application/vnd.github+json")
            .header(header::AUTHORIZATION, format!("token {}", self.token))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GithubError::Status(response.status()));
        }

        let repositories: Vec<Repository> = response.json().await?;

        Ok(oldest_first(repositories))
    }
}
