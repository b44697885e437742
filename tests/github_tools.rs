//! Integration tests for the GitHub tools against a mock server
//!
//! The GitHub context takes a configurable API base, so these tests point the
//! tools at a wiremock server and assert on the requests the tools make and
//! the results they surface.

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use toolgate::tools::github::{FetchDiffTool, GithubContext, PostReviewCommentTool};
use toolgate::tools::ToolExecutor;

const DIFF_BODY: &str = "diff --git a/src/lib.rs b/src/lib.rs\n@@ -1 +1 @@\n-old\n+new\n";

#[tokio::test]
async fn fetch_diff_returns_diff_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octocat/hello-world/pulls/42"))
        .and(header("Accept", "application/vnd.github.v3.diff"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DIFF_BODY))
        .expect(1)
        .mount(&server)
        .await;

    let tool = FetchDiffTool::new(GithubContext::new(&server.uri(), None));
    let result = tool
        .execute(json!({"owner": "octocat", "repo": "hello-world", "pr_number": 42}))
        .await
        .unwrap();

    assert!(result.success);
    assert_eq!(result.output, DIFF_BODY);
}

#[tokio::test]
async fn fetch_diff_sends_bearer_token_when_available() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/o/r/pulls/1"))
        .and(header("Authorization", "Bearer tok-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DIFF_BODY))
        .expect(1)
        .mount(&server)
        .await;

    let tool = FetchDiffTool::new(GithubContext::new(&server.uri(), Some("tok-abc".to_string())));
    let result = tool
        .execute(json!({"owner": "o", "repo": "r", "pr_number": 1}))
        .await
        .unwrap();
    assert!(result.success);
}

#[tokio::test]
async fn fetch_diff_surfaces_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/o/r/pulls/7"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let tool = FetchDiffTool::new(GithubContext::new(&server.uri(), None));
    let result = tool
        .execute(json!({"owner": "o", "repo": "r", "pr_number": 7}))
        .await
        .unwrap();

    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("GitHub API error: 404"));
}

#[tokio::test]
async fn post_comment_creates_and_returns_location() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/repos/o/r/pulls/3/comments"))
        .and(header("Accept", "application/vnd.github.v3+json"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 9001,
            "html_url": "https://github.com/o/r/pull/3#discussion_r9001"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tool =
        PostReviewCommentTool::new(GithubContext::new(&server.uri(), Some("tok".to_string())));
    let result = tool
        .execute(json!({
            "owner": "o", "repo": "r", "pr_number": 3,
            "commit_id": "abc123", "path": "src/lib.rs", "line": 5,
            "body": "Consider handling the error case here."
        }))
        .await
        .unwrap();

    assert!(result.success);
    let body: serde_json::Value = serde_json::from_str(&result.output).unwrap();
    assert_eq!(body["comment_id"], 9001);
    assert_eq!(
        body["url"],
        "https://github.com/o/r/pull/3#discussion_r9001"
    );
}

#[tokio::test]
async fn post_comment_surfaces_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/repos/o/r/pulls/3/comments"))
        .respond_with(ResponseTemplate::new(422))
        .mount(&server)
        .await;

    let tool =
        PostReviewCommentTool::new(GithubContext::new(&server.uri(), Some("tok".to_string())));
    let result = tool
        .execute(json!({
            "owner": "o", "repo": "r", "pr_number": 3,
            "commit_id": "abc123", "path": "src/lib.rs", "line": 5,
            "body": "nit"
        }))
        .await
        .unwrap();

    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("GitHub API error: 422"));
}

#[tokio::test]
async fn post_comment_without_token_never_hits_the_server() {
    let server = MockServer::start().await;
    // No mock mounted: any request would 404 and fail the expect below
    let tool = PostReviewCommentTool::new(GithubContext::new(&server.uri(), None));
    let result = tool
        .execute(json!({
            "owner": "o", "repo": "r", "pr_number": 3,
            "commit_id": "abc123", "path": "src/lib.rs", "line": 5,
            "body": "nit"
        }))
        .await
        .unwrap();

    assert!(!result.success);
    assert_eq!(
        result.error.as_deref(),
        Some("GITHUB_TOKEN or GH_TOKEN environment variable is required")
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}
