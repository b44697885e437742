//! Tool layer for Toolgate
//!
//! This module contains the tool abstractions (definition, result, executor,
//! registry) and the concrete tool implementations. Every tool validates its
//! inputs through `crate::validate` before anything reaches a real backend;
//! a validation rejection becomes an error `ToolResult` whose message is the
//! rejection reason, suitable for relaying back through a conversational
//! agent.

pub mod github;
pub mod kubectl;
pub mod load_csv;
pub mod sql_query;
pub mod stats;
pub mod support;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::validate::Rejection;

/// Tool result structure
///
/// Represents the result of a tool execution with metadata and truncation
/// support. Both validation rejections and recoverable execution failures
/// surface as error results; neither aborts the process.
#[derive(Debug, Clone)]
pub struct ToolResult {
    /// Whether the tool execution succeeded
    pub success: bool,
    /// Output from the tool
    pub output: String,
    /// Error message if execution failed
    pub error: Option<String>,
    /// Whether the output was truncated
    pub truncated: bool,
    /// Additional metadata about the execution
    pub metadata: HashMap<String, String>,
}

impl ToolResult {
    /// Create a successful tool result
    pub fn success(output: String) -> Self {
        Self {
            success: true,
            output,
            error: None,
            truncated: false,
            metadata: HashMap::new(),
        }
    }

    /// Create a failed tool result
    pub fn error(error: String) -> Self {
        Self {
            success: false,
            output: String::new(),
            error: Some(error),
            truncated: false,
            metadata: HashMap::new(),
        }
    }

    /// Create a failed tool result from a validation rejection
    pub fn rejected(rejection: Rejection) -> Self {
        Self::error(rejection.to_string())
    }

    /// Add metadata to the result
    ///
    /// Returns self for chaining.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Truncate output if it exceeds the maximum size
    pub fn truncate_if_needed(mut self, max_size: usize) -> Self {
        if self.output.len() > max_size {
            self.output.truncate(max_size);
            self.output.push_str("\n... (truncated)");
            self.truncated = true;
        }
        self
    }

    /// Convert to a message string for the conversation
    pub fn to_message(&self) -> String {
        if self.success {
            self.output.clone()
        } else {
            format!(
                "Error: {}",
                self.error.as_deref().unwrap_or("Unknown error")
            )
        }
    }
}

impl From<Rejection> for ToolResult {
    fn from(rejection: Rejection) -> Self {
        ToolResult::rejected(rejection)
    }
}

/// Tool executor trait for implementing tool execution logic
///
/// Each tool implements this trait to expose an OpenAI function-calling
/// style definition and an execution entry point the host runtime dispatches
/// to with the model's JSON arguments.
///
/// # Examples
///
/// ```no_run
/// use toolgate::tools::{ToolExecutor, ToolResult};
/// use toolgate::error::Result;
/// use async_trait::async_trait;
/// use serde_json::Value;
///
/// struct EchoTool;
///
/// #[async_trait]
/// impl ToolExecutor for EchoTool {
///     fn tool_definition(&self) -> Value {
///         serde_json::json!({
///             "name": "echo",
///             "description": "Echo the input back",
///             "parameters": {
///                 "type": "object",
///                 "properties": { "text": {"type": "string"} },
///                 "required": ["text"]
///             }
///         })
///     }
///
///     async fn execute(&self, args: Value) -> Result<ToolResult> {
///         Ok(ToolResult::success(args.to_string()))
///     }
/// }
/// ```
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Returns the tool definition as a JSON value
    ///
    /// The definition follows the OpenAI function calling format: a `name`,
    /// a `description`, and a JSON schema under `parameters`.
    fn tool_definition(&self) -> serde_json::Value;

    /// Executes the tool with the given arguments
    ///
    /// # Errors
    ///
    /// Returns an error only for failures the caller cannot report back to
    /// the conversation; recoverable problems (validation rejections, backend
    /// failures) are returned as error `ToolResult`s.
    async fn execute(&self, args: serde_json::Value) -> Result<ToolResult>;
}

/// Tool registry for managing available tools
///
/// The registry maintains the collection of tools a host runtime can expose
/// to an agent session.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn ToolExecutor>>,
}

impl ToolRegistry {
    /// Create a new empty tool registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool executor in the registry
    pub fn register(&mut self, name: impl Into<String>, executor: Arc<dyn ToolExecutor>) {
        self.tools.insert(name.into(), executor);
    }

    /// Get a tool executor by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn ToolExecutor>> {
        self.tools.get(name).cloned()
    }

    /// Get all tool definitions as JSON values, sorted by tool name
    pub fn all_definitions(&self) -> Vec<serde_json::Value> {
        let mut names: Vec<&String> = self.tools.keys().collect();
        names.sort();
        names
            .into_iter()
            .map(|name| self.tools[name].tool_definition())
            .collect()
    }

    /// Get the registered tool names in sorted order
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Returns true if no tools are registered
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
