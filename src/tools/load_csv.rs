//! Data-analyst tool: sandboxed CSV loading
//!
//! The candidate path is resolved through a [`PathSandbox`] rooted at the
//! configured data directory before the file is opened. The preview is
//! bounded by the requested row count; the full file is still scanned to
//! report the total row count.

use serde::Deserialize;
use serde_json::json;

use crate::error::Result;
use crate::tools::{ToolExecutor, ToolResult};
use crate::validate::{PathSandbox, SandboxError};

fn default_rows() -> usize {
    50
}

/// Parameters for the load_csv tool
#[derive(Debug, Clone, Deserialize)]
struct LoadCsvParams {
    /// Relative path to the CSV file within the data directory
    file_path: String,
    /// Number of rows to return
    #[serde(default = "default_rows")]
    rows: usize,
}

/// Tool that loads a CSV file from the sandboxed data directory
///
/// # Examples
///
/// ```no_run
/// use toolgate::tools::load_csv::LoadCsvTool;
/// use toolgate::tools::ToolExecutor;
/// use toolgate::validate::PathSandbox;
/// use serde_json::json;
///
/// # tokio_test::block_on(async {
/// let tool = LoadCsvTool::new(PathSandbox::new("/data", ".csv"));
/// let result = tool.execute(json!({"file_path": "sales.csv"})).await;
/// # });
/// ```
pub struct LoadCsvTool {
    sandbox: PathSandbox,
}

impl LoadCsvTool {
    /// Creates the tool over the given sandbox
    pub fn new(sandbox: PathSandbox) -> Self {
        Self { sandbox }
    }
}

#[async_trait::async_trait]
impl ToolExecutor for LoadCsvTool {
    fn tool_definition(&self) -> serde_json::Value {
        json!({
            "name": "load_csv",
            "description": "Load a CSV file from the data directory and return its contents for analysis",
            "parameters": {
                "type": "object",
                "properties": {
                    "file_path": {
                        "type": "string",
                        "description": "Relative path to the CSV file within the application's data directory"
                    },
                    "rows": {
                        "type": "integer",
                        "description": "Number of rows to return (default: 50)"
                    }
                },
                "required": ["file_path"]
            }
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<ToolResult> {
        let params: LoadCsvParams = match serde_json::from_value(args) {
            Ok(params) => params,
            Err(err) => return Ok(ToolResult::error(format!("Invalid arguments: {}", err))),
        };

        let resolved = match self.sandbox.resolve(&params.file_path) {
            Ok(path) => path,
            Err(SandboxError::Rejected(rejection)) => {
                return Ok(ToolResult::rejected(rejection))
            }
            Err(SandboxError::Io(err)) => return Ok(ToolResult::error(err.to_string())),
        };

        let mut reader = match csv::Reader::from_path(&resolved) {
            Ok(reader) => reader,
            Err(err) => return Ok(ToolResult::error(err.to_string())),
        };

        let columns: Vec<String> = match reader.headers() {
            Ok(headers) => headers.iter().map(String::from).collect(),
            Err(err) => return Ok(ToolResult::error(err.to_string())),
        };

        let mut preview: Vec<Vec<String>> = Vec::new();
        let mut total_rows: usize = 0;
        for record in reader.records() {
            let record = match record {
                Ok(record) => record,
                Err(err) => return Ok(ToolResult::error(err.to_string())),
            };
            total_rows += 1;
            if total_rows <= params.rows {
                preview.push(record.iter().map(String::from).collect());
            }
        }

        let body = serde_json::to_string_pretty(&json!({
            "columns": columns,
            "preview": preview,
            "total_rows": total_rows,
        }))?;
        Ok(ToolResult::success(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tool_for(temp: &TempDir) -> LoadCsvTool {
        LoadCsvTool::new(PathSandbox::new(temp.path(), ".csv"))
    }

    fn write_sales_csv(temp: &TempDir) {
        std::fs::write(
            temp.path().join("sales.csv"),
            "date,revenue,orders\n2024-01-01,1000,10\n2024-01-02,2000,20\n2024-01-03,1500,15\n",
        )
        .unwrap();
    }

    #[tokio::test]
    async fn test_reads_csv_file() {
        let temp = TempDir::new().unwrap();
        write_sales_csv(&temp);

        let result = tool_for(&temp)
            .execute(serde_json::json!({"file_path": "sales.csv"}))
            .await
            .unwrap();
        assert!(result.success);

        let body: serde_json::Value = serde_json::from_str(&result.output).unwrap();
        assert_eq!(
            body["columns"],
            serde_json::json!(["date", "revenue", "orders"])
        );
        assert_eq!(body["total_rows"], 3);
        assert_eq!(body["preview"][0][1], "1000");
    }

    #[tokio::test]
    async fn test_preview_is_bounded_but_total_is_not() {
        let temp = TempDir::new().unwrap();
        write_sales_csv(&temp);

        let result = tool_for(&temp)
            .execute(serde_json::json!({"file_path": "sales.csv", "rows": 1}))
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_str(&result.output).unwrap();
        assert_eq!(body["preview"].as_array().unwrap().len(), 1);
        assert_eq!(body["total_rows"], 3);
    }

    #[tokio::test]
    async fn test_traversal_rejects() {
        let temp = TempDir::new().unwrap();
        let result = tool_for(&temp)
            .execute(serde_json::json!({"file_path": "../secret.csv"}))
            .await
            .unwrap();
        assert!(!result.success);
        assert!(result.error.unwrap().contains("Invalid file path"));
    }

    #[tokio::test]
    async fn test_absolute_path_rejects() {
        let temp = TempDir::new().unwrap();
        let result = tool_for(&temp)
            .execute(serde_json::json!({"file_path": "/etc/passwd"}))
            .await
            .unwrap();
        assert!(!result.success);
        assert!(result.error.unwrap().contains("Invalid file path"));
    }

    #[tokio::test]
    async fn test_non_csv_rejects() {
        let temp = TempDir::new().unwrap();
        let result = tool_for(&temp)
            .execute(serde_json::json!({"file_path": "data.json"}))
            .await
            .unwrap();
        assert!(!result.success);
        assert_eq!(
            result.error.as_deref(),
            Some("Only .csv files are supported.")
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_execution_error_not_rejection() {
        let temp = TempDir::new().unwrap();
        let result = tool_for(&temp)
            .execute(serde_json::json!({"file_path": "absent.csv"}))
            .await
            .unwrap();
        assert!(!result.success);
        // The path itself was safe; opening it failed
        assert!(!result.error.unwrap().contains("Invalid file path"));
    }
}
