//! DevOps tools: read-only kubectl execution, log fetching, deployment listing
//!
//! All cluster access goes through the `kubectl` binary as a subprocess with
//! a bounded timeout. Inputs are gated first: the raw command line through the
//! read-only subcommand allow-list, and every name or duration flag value
//! through the field validators, so nothing unvalidated is ever interpolated
//! into an argument list.

use std::process::Output;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{Result, ToolgateError};
use crate::tools::{ToolExecutor, ToolResult};
use crate::validate::{duration, resource_name, CommandAllowList};

/// Default timeout for kubectl invocations
pub const DEFAULT_KUBECTL_TIMEOUT_SECS: u64 = 30;

/// Maximum number of log lines a single fetch may request
const MAX_LOG_LINES: i64 = 1000;

/// Runs `<binary> <args>` with a deadline, capturing stdout and stderr
///
/// # Errors
///
/// Returns [`ToolgateError::CommandLaunch`] when the binary cannot be
/// spawned and [`ToolgateError::CommandTimeout`] when the deadline elapses.
async fn run_subprocess(
    binary: &str,
    args: &[String],
    timeout: Duration,
) -> std::result::Result<Output, ToolgateError> {
    tracing::debug!("Running {} {:?}", binary, args);
    let future = tokio::process::Command::new(binary)
        .args(args)
        .kill_on_drop(true)
        .output();
    match tokio::time::timeout(timeout, future).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(err)) if err.kind() == std::io::ErrorKind::NotFound => {
            Err(ToolgateError::CommandLaunch(format!(
                "{} not found. Install {} and ensure it is in your PATH.",
                binary, binary
            )))
        }
        Ok(Err(err)) => Err(ToolgateError::Io(err)),
        Err(_) => Err(ToolgateError::CommandTimeout {
            seconds: timeout.as_secs(),
        }),
    }
}

// ---------------------------------------------------------------------------
// run_kubectl
// ---------------------------------------------------------------------------

/// Parameters for the run_kubectl tool
#[derive(Debug, Clone, Deserialize)]
struct RunKubectlParams {
    /// kubectl arguments, e.g. "get pods -n production"
    command: String,
}

/// Tool that executes a read-only kubectl command
///
/// The command line is tokenized and the subcommand checked against the
/// read-only allow-set before anything is executed.
///
/// # Examples
///
/// ```no_run
/// use toolgate::tools::kubectl::RunKubectlTool;
/// use toolgate::tools::ToolExecutor;
/// use serde_json::json;
///
/// # tokio_test::block_on(async {
/// let tool = RunKubectlTool::with_default_timeout();
/// let result = tool.execute(json!({"command": "get pods -n production"})).await;
/// # });
/// ```
pub struct RunKubectlTool {
    allow_list: CommandAllowList,
    binary: String,
    timeout: Duration,
}

impl RunKubectlTool {
    /// Creates the tool with the given execution timeout
    pub fn new(timeout: Duration) -> Self {
        Self {
            allow_list: CommandAllowList::kubectl_read_only(),
            binary: "kubectl".to_string(),
            timeout,
        }
    }

    /// Creates the tool with the default 30 second timeout
    pub fn with_default_timeout() -> Self {
        Self::new(Duration::from_secs(DEFAULT_KUBECTL_TIMEOUT_SECS))
    }

    /// Creates the tool with a different binary name (useful for tests)
    pub fn new_with_binary(binary: &str, timeout: Duration) -> Self {
        Self {
            allow_list: CommandAllowList::kubectl_read_only(),
            binary: binary.to_string(),
            timeout,
        }
    }
}

#[async_trait::async_trait]
impl ToolExecutor for RunKubectlTool {
    fn tool_definition(&self) -> serde_json::Value {
        json!({
            "name": "run_kubectl",
            "description": "Execute a read-only kubectl command to inspect cluster state",
            "parameters": {
                "type": "object",
                "properties": {
                    "command": {
                        "type": "string",
                        "description": "kubectl arguments, e.g. 'get pods -n production'"
                    }
                },
                "required": ["command"]
            }
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<ToolResult> {
        let params: RunKubectlParams = match serde_json::from_value(args) {
            Ok(params) => params,
            Err(err) => return Ok(ToolResult::error(format!("Invalid arguments: {}", err))),
        };

        let argv = match self.allow_list.validate(&params.command) {
            Ok(argv) => argv,
            Err(rejection) => return Ok(ToolResult::rejected(rejection)),
        };

        match run_subprocess(&self.binary, &argv, self.timeout).await {
            Ok(output) => {
                let stdout = String::from_utf8_lossy(&output.stdout).to_string();
                let stderr = String::from_utf8_lossy(&output.stderr).to_string();
                Ok(ToolResult::success(stdout).with_metadata("stderr", stderr))
            }
            Err(err) => Ok(ToolResult::error(err.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// fetch_logs
// ---------------------------------------------------------------------------

fn default_namespace() -> String {
    "production".to_string()
}

fn default_lines() -> i64 {
    100
}

fn default_since() -> String {
    "1h".to_string()
}

/// Parameters for the fetch_logs tool
#[derive(Debug, Clone, Deserialize)]
struct FetchLogsParams {
    /// App label selector value
    service: String,
    #[serde(default = "default_namespace")]
    namespace: String,
    #[serde(default = "default_lines")]
    lines: i64,
    /// Duration, e.g. 1h, 30m
    #[serde(default = "default_since")]
    since: String,
}

/// Clamps a requested line count to the supported window
fn clamp_lines(lines: i64) -> i64 {
    lines.clamp(1, MAX_LOG_LINES)
}

/// Tool that fetches recent logs for a service
///
/// Validates the service and namespace as Kubernetes names and the window as
/// a simple duration before the values reach the kubectl argument list.
pub struct FetchLogsTool {
    binary: String,
    timeout: Duration,
}

impl FetchLogsTool {
    /// Creates the tool with the given execution timeout
    pub fn new(timeout: Duration) -> Self {
        Self {
            binary: "kubectl".to_string(),
            timeout,
        }
    }

    /// Creates the tool with a different binary name (useful for tests)
    pub fn new_with_binary(binary: &str, timeout: Duration) -> Self {
        Self {
            binary: binary.to_string(),
            timeout,
        }
    }
}

#[async_trait::async_trait]
impl ToolExecutor for FetchLogsTool {
    fn tool_definition(&self) -> serde_json::Value {
        json!({
            "name": "fetch_logs",
            "description": "Fetch recent logs for a service",
            "parameters": {
                "type": "object",
                "properties": {
                    "service": {
                        "type": "string",
                        "description": "App label selector value"
                    },
                    "namespace": {
                        "type": "string",
                        "description": "Kubernetes namespace (default: production)"
                    },
                    "lines": {
                        "type": "integer",
                        "description": "Number of log lines to return (default: 100, max: 1000)"
                    },
                    "since": {
                        "type": "string",
                        "description": "Duration window, e.g. 1h, 30m (default: 1h)"
                    }
                },
                "required": ["service"]
            }
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<ToolResult> {
        let params: FetchLogsParams = match serde_json::from_value(args) {
            Ok(params) => params,
            Err(err) => return Ok(ToolResult::error(format!("Invalid arguments: {}", err))),
        };

        if let Err(rejection) = resource_name(&params.service, "service name") {
            return Ok(ToolResult::rejected(rejection));
        }
        if let Err(rejection) = resource_name(&params.namespace, "namespace") {
            return Ok(ToolResult::rejected(rejection));
        }
        if let Err(rejection) = duration(&params.since) {
            return Ok(ToolResult::rejected(rejection));
        }

        let argv = vec![
            "logs".to_string(),
            "-l".to_string(),
            format!("app={}", params.service),
            "-n".to_string(),
            params.namespace.clone(),
            format!("--tail={}", clamp_lines(params.lines)),
            format!("--since={}", params.since),
        ];

        match run_subprocess(&self.binary, &argv, self.timeout).await {
            Ok(output) => {
                let stdout = String::from_utf8_lossy(&output.stdout).to_string();
                let stderr = String::from_utf8_lossy(&output.stderr).to_string();
                Ok(ToolResult::success(stdout).with_metadata("stderr", stderr))
            }
            Err(err) => Ok(ToolResult::error(err.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// list_recent_deployments
// ---------------------------------------------------------------------------

/// Parameters for the list_recent_deployments tool
#[derive(Debug, Clone, Deserialize)]
struct ListDeploymentsParams {
    #[serde(default = "default_namespace")]
    namespace: String,
}

/// Per-deployment summary extracted from `kubectl get deployments -o json`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DeploymentSummary {
    /// Deployment name
    pub name: String,
    /// Image of the first container, or "unknown"
    pub image: String,
    /// Creation timestamp as reported by the API server
    pub timestamp: String,
    /// Ready replicas as "ready/total"
    pub ready: String,
}

/// Extracts deployment summaries from kubectl JSON output
///
/// # Errors
///
/// Returns a serialization error when the output is not valid JSON.
pub fn parse_deployments(raw: &str) -> std::result::Result<Vec<DeploymentSummary>, serde_json::Error> {
    let data: serde_json::Value = serde_json::from_str(raw)?;
    let items = data["items"].as_array().cloned().unwrap_or_default();
    let summaries = items
        .iter()
        .map(|item| {
            let image = item["spec"]["template"]["spec"]["containers"]
                .as_array()
                .and_then(|containers| containers.first())
                .and_then(|container| container["image"].as_str())
                .unwrap_or("unknown")
                .to_string();
            DeploymentSummary {
                name: item["metadata"]["name"].as_str().unwrap_or("").to_string(),
                image,
                timestamp: item["metadata"]["creationTimestamp"]
                    .as_str()
                    .unwrap_or("")
                    .to_string(),
                ready: format!(
                    "{}/{}",
                    item["status"]["readyReplicas"].as_i64().unwrap_or(0),
                    item["status"]["replicas"].as_i64().unwrap_or(0)
                ),
            }
        })
        .collect();
    Ok(summaries)
}

/// Tool that lists recent deployments in a namespace
pub struct ListDeploymentsTool {
    binary: String,
    timeout: Duration,
}

impl ListDeploymentsTool {
    /// Creates the tool with the given execution timeout
    pub fn new(timeout: Duration) -> Self {
        Self {
            binary: "kubectl".to_string(),
            timeout,
        }
    }

    /// Creates the tool with a different binary name (useful for tests)
    pub fn new_with_binary(binary: &str, timeout: Duration) -> Self {
        Self {
            binary: binary.to_string(),
            timeout,
        }
    }
}

#[async_trait::async_trait]
impl ToolExecutor for ListDeploymentsTool {
    fn tool_definition(&self) -> serde_json::Value {
        json!({
            "name": "list_recent_deployments",
            "description": "List recent deployment events in a namespace",
            "parameters": {
                "type": "object",
                "properties": {
                    "namespace": {
                        "type": "string",
                        "description": "Kubernetes namespace (default: production)"
                    }
                }
            }
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<ToolResult> {
        let params: ListDeploymentsParams = match serde_json::from_value(args) {
            Ok(params) => params,
            Err(err) => return Ok(ToolResult::error(format!("Invalid arguments: {}", err))),
        };

        if let Err(rejection) = resource_name(&params.namespace, "namespace") {
            return Ok(ToolResult::rejected(rejection));
        }

        let argv = vec![
            "get".to_string(),
            "deployments".to_string(),
            "-n".to_string(),
            params.namespace.clone(),
            "-o".to_string(),
            "json".to_string(),
        ];

        let output = match run_subprocess(&self.binary, &argv, self.timeout).await {
            Ok(output) => output,
            Err(err) => return Ok(ToolResult::error(err.to_string())),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            let message = if stderr.is_empty() {
                "kubectl returned non-zero exit code".to_string()
            } else {
                stderr
            };
            return Ok(ToolResult::error(message));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        match parse_deployments(&stdout) {
            Ok(deployments) => {
                let body = serde_json::to_string_pretty(&json!({ "deployments": deployments }))?;
                Ok(ToolResult::success(body))
            }
            Err(err) => Ok(ToolResult::error(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MISSING_BINARY: &str = "definitely-not-a-kubectl-binary";

    #[test]
    fn test_tool_definitions_have_expected_names() {
        assert_eq!(
            RunKubectlTool::with_default_timeout().tool_definition()["name"],
            "run_kubectl"
        );
        assert_eq!(
            FetchLogsTool::new(Duration::from_secs(30)).tool_definition()["name"],
            "fetch_logs"
        );
        assert_eq!(
            ListDeploymentsTool::new(Duration::from_secs(30)).tool_definition()["name"],
            "list_recent_deployments"
        );
    }

    #[tokio::test]
    async fn test_run_kubectl_rejects_disallowed_subcommand() {
        let tool = RunKubectlTool::with_default_timeout();
        let result = tool
            .execute(serde_json::json!({"command": "delete pod mypod"}))
            .await
            .unwrap();
        assert!(!result.success);
        let error = result.error.unwrap();
        assert!(error.contains("Only read-only kubectl commands are permitted"));
        assert!(error.contains("describe, get, logs, rollout, top"));
    }

    #[tokio::test]
    async fn test_run_kubectl_rejects_empty_command() {
        let tool = RunKubectlTool::with_default_timeout();
        let result = tool
            .execute(serde_json::json!({"command": "   "}))
            .await
            .unwrap();
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("No command provided"));
    }

    #[tokio::test]
    async fn test_run_kubectl_reports_missing_binary() {
        let tool = RunKubectlTool::new_with_binary(MISSING_BINARY, Duration::from_secs(5));
        let result = tool
            .execute(serde_json::json!({"command": "get pods"}))
            .await
            .unwrap();
        assert!(!result.success);
        assert!(result.error.unwrap().contains("not found"));
    }

    #[tokio::test]
    async fn test_fetch_logs_rejects_invalid_service() {
        let tool = FetchLogsTool::new(Duration::from_secs(30));
        let result = tool
            .execute(serde_json::json!({"service": "My_Service"}))
            .await
            .unwrap();
        assert!(!result.success);
        assert!(result.error.unwrap().contains("Invalid service name"));
    }

    #[tokio::test]
    async fn test_fetch_logs_rejects_invalid_namespace() {
        let tool = FetchLogsTool::new(Duration::from_secs(30));
        let result = tool
            .execute(serde_json::json!({"service": "api", "namespace": "Prod"}))
            .await
            .unwrap();
        assert!(!result.success);
        assert!(result.error.unwrap().contains("Invalid namespace"));
    }

    #[tokio::test]
    async fn test_fetch_logs_rejects_compound_duration() {
        let tool = FetchLogsTool::new(Duration::from_secs(30));
        let result = tool
            .execute(serde_json::json!({"service": "api", "since": "1h30m"}))
            .await
            .unwrap();
        assert!(!result.success);
        assert!(result.error.unwrap().contains("Invalid duration format"));
    }

    #[tokio::test]
    async fn test_list_deployments_rejects_invalid_namespace() {
        let tool = ListDeploymentsTool::new(Duration::from_secs(30));
        let result = tool
            .execute(serde_json::json!({"namespace": "-bad-"}))
            .await
            .unwrap();
        assert!(!result.success);
        assert!(result.error.unwrap().contains("Invalid namespace"));
    }

    #[test]
    fn test_clamp_lines_window() {
        assert_eq!(clamp_lines(0), 1);
        assert_eq!(clamp_lines(-5), 1);
        assert_eq!(clamp_lines(100), 100);
        assert_eq!(clamp_lines(5000), 1000);
    }

    #[test]
    fn test_parse_deployments_extracts_summary() {
        let raw = serde_json::json!({
            "items": [{
                "metadata": {
                    "name": "api-gateway",
                    "creationTimestamp": "2024-05-01T12:00:00Z"
                },
                "spec": {
                    "template": {
                        "spec": {
                            "containers": [{"image": "registry/api:1.2.3"}]
                        }
                    }
                },
                "status": {"readyReplicas": 3, "replicas": 3}
            }]
        })
        .to_string();

        let summaries = parse_deployments(&raw).unwrap();
        assert_eq!(
            summaries,
            vec![DeploymentSummary {
                name: "api-gateway".to_string(),
                image: "registry/api:1.2.3".to_string(),
                timestamp: "2024-05-01T12:00:00Z".to_string(),
                ready: "3/3".to_string(),
            }]
        );
    }

    #[test]
    fn test_parse_deployments_handles_missing_fields() {
        let raw = serde_json::json!({
            "items": [{
                "metadata": {"name": "worker", "creationTimestamp": "2024-05-02T00:00:00Z"},
                "spec": {"template": {"spec": {"containers": []}}},
                "status": {}
            }]
        })
        .to_string();

        let summaries = parse_deployments(&raw).unwrap();
        assert_eq!(summaries[0].image, "unknown");
        assert_eq!(summaries[0].ready, "0/0");
    }

    #[test]
    fn test_parse_deployments_rejects_invalid_json() {
        assert!(parse_deployments("not json").is_err());
    }

    #[test]
    fn test_parse_deployments_empty_items() {
        assert!(parse_deployments("{}").unwrap().is_empty());
    }
}
