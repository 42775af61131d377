use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use crate::config::GithubConfig;

const GITHUB_API_URL: &str = "https://api.github.com";

#[derive(Debug, Error)]
pub enum GithubError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("github returned status {0}")]
    Status(u16),
}

/// Thin client over the GitHub REST API; all outbound calls share one
/// connection pool.
#[derive(Clone)]
pub struct GithubClient {
    client: Client,
    config: GithubConfig,
}

impl GithubClient {
    pub fn new(config: GithubConfig) -> anyhow::Result<Self> {
        let client = Client::builder().user_agent("devconnect").build()?;
        Ok(Self { client, config })
    }

    /// The five oldest-created public repositories for a username, relayed
    /// as raw JSON. Any non-success upstream status becomes `Status`.
    pub async fn repos_for(&self, username: &str) -> Result<serde_json::Value, GithubError> {
        let url = format!("{GITHUB_API_URL}/users/{username}/repos");
        let mut query: Vec<(&str, &str)> = vec![("per_page", "5"), ("sort", "created:asc")];
        if !self.config.client_id.is_empty() {
            query.push(("client_id", &self.config.client_id));
            query.push(("client_secret", &self.config.client_secret));
        }

        debug!(%username, "github repos lookup");
        let response = self.client.get(&url).query(&query).send().await?;
        if !response.status().is_success() {
            return Err(GithubError::Status(response.status().as_u16()));
        }
        Ok(response.json().await?)
    }
}
