//! Data-analyst tool: read-only SQL query execution
//!
//! The query text is gated through the read-only validator before anything
//! else happens. The SQL backend itself is an external collaborator: with no
//! database configured the tool returns a clearly-labeled simulated result
//! set, and with one configured it reports that a real client must be wired
//! in at the call site.

use serde::Deserialize;
use serde_json::json;

use crate::error::Result;
use crate::tools::{ToolExecutor, ToolResult};
use crate::validate::sql_read_only;

fn default_limit() -> u32 {
    100
}

/// Parameters for the run_sql_query tool
#[derive(Debug, Clone, Deserialize)]
struct RunSqlParams {
    /// SELECT query to execute
    sql: String,
    /// Maximum rows to return
    #[serde(default = "default_limit")]
    limit: u32,
}

/// Tool that executes a read-only SQL query
///
/// # Examples
///
/// ```
/// use toolgate::tools::sql_query::RunSqlQueryTool;
/// use toolgate::tools::ToolExecutor;
/// use serde_json::json;
///
/// # tokio_test::block_on(async {
/// let tool = RunSqlQueryTool::new(None);
/// let result = tool.execute(json!({"sql": "SELECT 1"})).await.unwrap();
/// assert!(result.success);
/// # });
/// ```
pub struct RunSqlQueryTool {
    database_url: Option<String>,
}

impl RunSqlQueryTool {
    /// Creates the tool
    ///
    /// # Arguments
    ///
    /// * `database_url` - Connection string for the SQL backend; when `None`
    ///   the tool serves simulated data
    pub fn new(database_url: Option<String>) -> Self {
        Self { database_url }
    }
}

#[async_trait::async_trait]
impl ToolExecutor for RunSqlQueryTool {
    fn tool_definition(&self) -> serde_json::Value {
        json!({
            "name": "run_sql_query",
            "description": "Execute a read-only SQL query and return results",
            "parameters": {
                "type": "object",
                "properties": {
                    "sql": {
                        "type": "string",
                        "description": "SELECT query to execute"
                    },
                    "limit": {
                        "type": "integer",
                        "description": "Maximum rows to return (default: 100)"
                    }
                },
                "required": ["sql"]
            }
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<ToolResult> {
        let params: RunSqlParams = match serde_json::from_value(args) {
            Ok(params) => params,
            Err(err) => return Ok(ToolResult::error(format!("Invalid arguments: {}", err))),
        };

        if let Err(rejection) = sql_read_only(&params.sql) {
            return Ok(ToolResult::rejected(rejection));
        }

        if self.database_url.is_none() {
            tracing::debug!("No database configured, serving simulated rows");
            let body = serde_json::to_string_pretty(&json!({
                "columns": ["date", "product", "revenue", "orders"],
                "rows": [
                    ["2024-01-01", "Widget Pro", 12500.00, 245],
                    ["2024-01-02", "Widget Lite", 8200.50, 167],
                ],
                "row_count": 2,
                "limit": params.limit,
                "note": "Simulated data - configure a database URL to use a real backend",
            }))?;
            return Ok(ToolResult::success(body));
        }

        // The SQL engine is an external system; the validator only gates the
        // query text.
        Ok(ToolResult::error(
            "SQL backend not wired: connect a database client at the call site".to_string(),
        ))
    }
}
