//! Code-review tools: pull-request diff retrieval and inline comments
//!
//! Thin HTTPS calls against the GitHub REST API, authenticated with a bearer
//! token supplied through environment configuration. The API base is
//! configurable so tests can point the tools at a mock server.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;

use crate::error::{Result, ToolgateError};
use crate::tools::{ToolExecutor, ToolResult};

/// Default GitHub REST API base URL
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

const HTTP_TIMEOUT_SECS: u64 = 30;
const MISSING_TOKEN: &str = "GITHUB_TOKEN or GH_TOKEN environment variable is required";

/// The execution-error form of a non-success GitHub status
fn github_api_error(status: reqwest::StatusCode) -> ToolgateError {
    ToolgateError::ApiStatus {
        service: "GitHub".to_string(),
        status: status.as_u16(),
    }
}

/// Shared connection context for the GitHub tools
#[derive(Debug, Clone)]
pub struct GithubContext {
    api_base: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl GithubContext {
    /// Creates a context against the given API base
    ///
    /// # Arguments
    ///
    /// * `api_base` - API root, e.g. `https://api.github.com`; a trailing
    ///   slash is trimmed
    /// * `token` - Bearer token, if available
    pub fn new(api_base: &str, token: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .user_agent(concat!("toolgate/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            token,
            client,
        }
    }

    /// Creates a context against the default GitHub API base
    pub fn with_default_base(token: Option<String>) -> Self {
        Self::new(DEFAULT_API_BASE, token)
    }

    /// URL of a pull request resource
    fn pull_url(&self, owner: &str, repo: &str, pr_number: u64) -> String {
        format!(
            "{}/repos/{}/{}/pulls/{}",
            self.api_base, owner, repo, pr_number
        )
    }

    /// URL of a pull request's review comments collection
    fn comments_url(&self, owner: &str, repo: &str, pr_number: u64) -> String {
        format!("{}/comments", self.pull_url(owner, repo, pr_number))
    }
}

// ---------------------------------------------------------------------------
// fetch_diff
// ---------------------------------------------------------------------------

/// Parameters for the fetch_diff tool
#[derive(Debug, Clone, Deserialize)]
struct FetchDiffParams {
    /// Repository owner
    owner: String,
    /// Repository name
    repo: String,
    /// Pull request number
    pr_number: u64,
}

/// Tool that fetches the unified diff for a pull request
pub struct FetchDiffTool {
    context: GithubContext,
}

impl FetchDiffTool {
    /// Creates the tool over the given GitHub context
    pub fn new(context: GithubContext) -> Self {
        Self { context }
    }
}

#[async_trait::async_trait]
impl ToolExecutor for FetchDiffTool {
    fn tool_definition(&self) -> serde_json::Value {
        json!({
            "name": "fetch_diff",
            "description": "Fetch the unified diff for a pull request",
            "parameters": {
                "type": "object",
                "properties": {
                    "owner": {"type": "string", "description": "Repository owner"},
                    "repo": {"type": "string", "description": "Repository name"},
                    "pr_number": {"type": "integer", "description": "Pull request number"}
                },
                "required": ["owner", "repo", "pr_number"]
            }
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<ToolResult> {
        let params: FetchDiffParams = match serde_json::from_value(args) {
            Ok(params) => params,
            Err(err) => return Ok(ToolResult::error(format!("Invalid arguments: {}", err))),
        };

        let url = self
            .context
            .pull_url(&params.owner, &params.repo, params.pr_number);
        let mut request = self
            .context
            .client
            .get(&url)
            .header("Accept", "application/vnd.github.v3.diff");
        if let Some(token) = &self.context.token {
            request = request.bearer_auth(token);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => return Ok(ToolResult::error(err.to_string())),
        };

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            tracing::warn!("Diff fetch failed for {}: {}", url, status);
            return Ok(ToolResult::error(github_api_error(status).to_string()));
        }

        match response.text().await {
            Ok(diff) => Ok(ToolResult::success(diff)),
            Err(err) => Ok(ToolResult::error(err.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// post_review_comment
// ---------------------------------------------------------------------------

/// Parameters for the post_review_comment tool
#[derive(Debug, Clone, Deserialize)]
struct PostCommentParams {
    owner: String,
    repo: String,
    pr_number: u64,
    /// Latest commit SHA on the PR
    commit_id: String,
    /// File path relative to repo root
    path: String,
    /// Line number in the diff
    line: u64,
    /// Comment text (supports Markdown)
    body: String,
}

/// Tool that posts an inline review comment on a specific line of a PR
///
/// Posting requires a token; a missing token is reported as a rejection
/// naming the environment variables, before any request is made.
pub struct PostReviewCommentTool {
    context: GithubContext,
}

impl PostReviewCommentTool {
    /// Creates the tool over the given GitHub context
    pub fn new(context: GithubContext) -> Self {
        Self { context }
    }
}

#[async_trait::async_trait]
impl ToolExecutor for PostReviewCommentTool {
    fn tool_definition(&self) -> serde_json::Value {
        json!({
            "name": "post_review_comment",
            "description": "Post an inline review comment on a specific line of a PR",
            "parameters": {
                "type": "object",
                "properties": {
                    "owner": {"type": "string"},
                    "repo": {"type": "string"},
                    "pr_number": {"type": "integer"},
                    "commit_id": {"type": "string", "description": "Latest commit SHA on the PR"},
                    "path": {"type": "string", "description": "File path relative to repo root"},
                    "line": {"type": "integer", "description": "Line number in the diff"},
                    "body": {"type": "string", "description": "Comment text (supports Markdown)"}
                },
                "required": ["owner", "repo", "pr_number", "commit_id", "path", "line", "body"]
            }
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<ToolResult> {
        let params: PostCommentParams = match serde_json::from_value(args) {
            Ok(params) => params,
            Err(err) => return Ok(ToolResult::error(format!("Invalid arguments: {}", err))),
        };

        let Some(token) = &self.context.token else {
            return Ok(ToolResult::error(MISSING_TOKEN.to_string()));
        };

        let url = self
            .context
            .comments_url(&params.owner, &params.repo, params.pr_number);
        let payload = json!({
            "body": params.body,
            "commit_id": params.commit_id,
            "path": params.path,
            "line": params.line,
            "side": "RIGHT",
        });

        let response = match self
            .context
            .client
            .post(&url)
            .header("Accept", "application/vnd.github.v3+json")
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => return Ok(ToolResult::error(err.to_string())),
        };

        let status = response.status();
        if status != reqwest::StatusCode::OK && status != reqwest::StatusCode::CREATED {
            tracing::warn!("Comment post failed for {}: {}", url, status);
            return Ok(ToolResult::error(github_api_error(status).to_string()));
        }

        let data: serde_json::Value = match response.json().await {
            Ok(data) => data,
            Err(err) => return Ok(ToolResult::error(err.to_string())),
        };
        let body = serde_json::to_string_pretty(&json!({
            "comment_id": data["id"],
            "url": data["html_url"],
        }))?;
        Ok(ToolResult::success(body))
    }
}
