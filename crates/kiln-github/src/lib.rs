//! GitHub content fetching.
//!
//! Pages in the model may point their `sourceUrl` at a file hosted on
//! GitHub. [`GithubRef`] parses such URLs and [`GithubClient`] retrieves the
//! raw file content, with an optional token for private repositories.

use std::time::Duration;

use ureq::Agent;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Host serving raw file content.
const RAW_HOST: &str = "https://raw.githubusercontent.com";

/// Error raised when fetching a document fails.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// URL is not a recognizable GitHub file reference.
    #[error("not a GitHub file URL: {0}")]
    InvalidUrl(String),
    /// Transport-level failure (DNS, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(String),
    /// Server answered with an error status.
    #[error("HTTP {status} for {url}: {body}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },
}

/// A parsed GitHub file reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GithubRef {
    pub owner: String,
    pub repo: String,
    /// Branch, tag or commit.
    pub git_ref: String,
    /// Path of the file inside the repository.
    pub path: String,
}

impl GithubRef {
    /// Parse a `https://github.com/{owner}/{repo}/(blob|tree)/{ref}/{path}`
    /// URL.
    pub fn parse(url: &str) -> Result<Self, FetchError> {
        let invalid = || FetchError::InvalidUrl(url.to_owned());

        let rest = url
            .strip_prefix("https://github.com/")
            .or_else(|| url.strip_prefix("http://github.com/"))
            .ok_or_else(invalid)?;

        let mut segments = rest.split('/');
        let owner = segments.next().filter(|s| !s.is_empty()).ok_or_else(invalid)?;
        let repo = segments.next().filter(|s| !s.is_empty()).ok_or_else(invalid)?;
        let kind = segments.next().ok_or_else(invalid)?;
        if kind != "blob" && kind != "tree" {
            return Err(invalid());
        }
        let git_ref = segments.next().filter(|s| !s.is_empty()).ok_or_else(invalid)?;
        let path = segments.collect::<Vec<_>>().join("/");
        if path.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.to_owned(),
            repo: repo.to_owned(),
            git_ref: git_ref.to_owned(),
            path,
        })
    }

    /// Raw-content URL for this reference.
    #[must_use]
    pub fn raw_url(&self) -> String {
        format!(
            "{RAW_HOST}/{}/{}/{}/{}",
            self.owner, self.repo, self.git_ref, self.path
        )
    }
}

/// Sync HTTP client for fetching raw GitHub content.
pub struct GithubClient {
    agent: Agent,
    token: Option<String>,
}

impl GithubClient {
    /// Create a client. `token` authenticates requests against private
    /// repositories; public content works without one.
    #[must_use]
    pub fn new(token: Option<String>) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false)
            .build()
            .into();

        Self { agent, token }
    }

    /// Fetch the raw content of a GitHub file reference.
    pub fn fetch(&self, reference: &GithubRef) -> Result<String, FetchError> {
        let url = reference.raw_url();
        tracing::debug!(url = %url, "fetching document");

        let mut request = self.agent.get(&url);
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("token {token}"));
        }

        let response = request.call().map_err(|e| FetchError::Http(e.to_string()))?;

        let status = response.status().as_u16();
        let mut body = response.into_body();

        if status >= 400 {
            let error_body = body
                .read_to_string()
                .unwrap_or_else(|_| String::from("(unable to read error body)"));
            return Err(FetchError::Status {
                status,
                url,
                body: error_body,
            });
        }

        body.read_to_string()
            .map_err(|e| FetchError::Http(e.to_string()))
    }
}
