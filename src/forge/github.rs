//! forge::github
//!
//! GitHub forge implementation using the REST contents API.
//!
//! # Design
//!
//! This module implements the `Forge` trait for GitHub. Two endpoints cover
//! everything the service needs:
//!
//! - `GET /repos/{owner}/{repo}/contents/{path}?ref={branch}` — the
//!   collision check
//! - `PUT /repos/{owner}/{repo}/contents/{path}` — the create-file commit
//!
//! The contents API transports file bodies as base64, so `create_file`
//! encodes before sending.
//!
//! # Authentication
//!
//! A static bearer token (personal access token or app installation token)
//! supplied at construction. A forge built without a token returns
//! [`ForgeError::AuthRequired`] from every call; the submission handler
//! rejects tokenless configurations before reaching this layer.
//!
//! # Rate Limiting
//!
//! GitHub has rate limits. This implementation returns
//! `ForgeError::RateLimited` when limits are hit and does not retry
//! (caller's responsibility).

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

use super::traits::{CreatedCommit, Forge, ForgeError, RepoFile};

/// Default GitHub API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = "catalog-intake";

/// GitHub forge implementation.
///
/// Implements the `Forge` trait for GitHub using the REST contents API.
pub struct GitHubForge {
    /// HTTP client for making requests
    client: Client,
    /// Bearer token; `None` means every call fails with `AuthRequired`
    token: Option<String>,
    /// Repository owner (user or organization)
    owner: String,
    /// Repository name
    repo: String,
    /// API base URL (configurable for GitHub Enterprise)
    api_base: String,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for GitHubForge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubForge")
            .field("has_token", &self.token.is_some())
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl GitHubForge {
    /// Create a new GitHub forge.
    ///
    /// # Arguments
    ///
    /// * `token` - Bearer token, if configured
    /// * `owner` - Repository owner
    /// * `repo` - Repository name
    ///
    /// # Example
    ///
    /// ```
    /// use catalog_intake::forge::github::GitHubForge;
    ///
    /// let forge = GitHubForge::new(Some("ghp_xxx".into()), "octocat", "hello-world");
    /// ```
    pub fn new(token: Option<String>, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            token,
            owner: owner.into(),
            repo: repo.into(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Create a GitHub forge with a custom API base URL.
    ///
    /// Use this for GitHub Enterprise installations.
    pub fn with_api_base(
        token: Option<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            token,
            owner: owner.into(),
            repo: repo.into(),
            api_base: api_base.into(),
        }
    }

    /// Get the repository owner.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Get the repository name.
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Build common headers for API requests.
    ///
    /// # Errors
    ///
    /// Returns `ForgeError::AuthRequired` if no token is configured, and
    /// `ForgeError::AuthFailed` if the token is not a valid header value.
    fn headers(&self) -> Result<HeaderMap, ForgeError> {
        let token = self.token.as_deref().ok_or(ForgeError::AuthRequired)?;
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ForgeError::AuthFailed("token is not a valid header value".into()))?,
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        Ok(headers)
    }

    /// Build URL for a contents endpoint.
    fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base, self.owner, self.repo, path
        )
    }

    /// Handle API response, mapping errors appropriately.
    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: Response,
    ) -> Result<T, ForgeError> {
        let status = response.status();

        if status.is_success() {
            response.json().await.map_err(|e| ForgeError::ApiError {
                status: status.as_u16(),
                message: format!("Failed to parse response: {}", e),
            })
        } else {
            self.handle_error_response(response, status).await
        }
    }

    /// Handle an error response from the API.
    async fn handle_error_response<T>(
        &self,
        response: Response,
        status: StatusCode,
    ) -> Result<T, ForgeError> {
        // Try to get error message from body
        let message = match response.json::<GitHubErrorResponse>().await {
            Ok(err) => err.message,
            Err(_) => "Unknown error".to_string(),
        };

        Err(match status {
            StatusCode::UNAUTHORIZED => ForgeError::AuthFailed("Invalid or expired token".into()),
            StatusCode::FORBIDDEN => ForgeError::AuthFailed(format!("Permission denied: {}", message)),
            StatusCode::NOT_FOUND => ForgeError::NotFound(message),
            StatusCode::TOO_MANY_REQUESTS => ForgeError::RateLimited,
            _ if status.is_server_error() => ForgeError::ApiError {
                status: status.as_u16(),
                message: format!("GitHub server error: {}", message),
            },
            _ => ForgeError::ApiError {
                status: status.as_u16(),
                message,
            },
        })
    }
}

#[async_trait]
impl Forge for GitHubForge {
    fn name(&self) -> &'static str {
        "github"
    }

    async fn read_file(&self, path: &str, branch: &str) -> Result<RepoFile, ForgeError> {
        let url = format!("{}?ref={}", self.contents_url(path), branch);

        let response = self
            .client
            .get(&url)
            .headers(self.headers()?)
            .send()
            .await
            .map_err(|e| ForgeError::NetworkError(e.to_string()))?;

        let file: GitHubContentsEntry = self.handle_response(response).await?;
        Ok(file.into())
    }

    async fn create_file(
        &self,
        path: &str,
        message: &str,
        content: &str,
        branch: &str,
    ) -> Result<CreatedCommit, ForgeError> {
        let url = self.contents_url(path);

        let body = CreateFileBody {
            message,
            content: &STANDARD.encode(content),
            branch,
        };

        let response = self
            .client
            .put(&url)
            .headers(self.headers()?)
            .json(&body)
            .send()
            .await
            .map_err(|e| ForgeError::NetworkError(e.to_string()))?;

        let created: GitHubContentsWriteResponse = self.handle_response(response).await?;
        Ok(CreatedCommit {
            sha: created.commit.sha,
        })
    }
}

// --------------------------------------------------------------------------
// API Request/Response Types
// --------------------------------------------------------------------------

/// Request body for creating a file via the contents API.
#[derive(Serialize)]
struct CreateFileBody<'a> {
    message: &'a str,
    /// Base64-encoded file content (contents API requirement).
    content: &'a str,
    branch: &'a str,
}

/// GitHub error response format.
#[derive(Deserialize)]
struct GitHubErrorResponse {
    message: String,
}

/// GitHub contents entry (subset; the read side only needs occupancy info).
#[derive(Deserialize)]
struct GitHubContentsEntry {
    path: String,
    sha: String,
    size: u64,
}

/// GitHub response to a contents-API write.
#[derive(Deserialize)]
struct GitHubContentsWriteResponse {
    commit: GitHubCommit,
}

/// Commit info embedded in a contents-API write response.
#[derive(Deserialize)]
struct GitHubCommit {
    sha: String,
}

impl From<GitHubContentsEntry> for RepoFile {
    fn from(entry: GitHubContentsEntry) -> Self {
        RepoFile {
            path: entry.path,
            sha: entry.sha,
            size: entry.size,
        }
    }
}
