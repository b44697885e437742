//! Customer-support tools: knowledge base, account lookup, tickets, escalation
//!
//! The knowledge-base search calls out over HTTP when a KB endpoint is
//! configured and serves a canned result otherwise. Account lookup, ticket
//! creation, and escalation stand in for CRM/ticketing backends; the shapes
//! match what a real integration would return.

use std::time::Duration;

use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::error::Result;
use crate::tools::{ToolExecutor, ToolResult};

const HTTP_TIMEOUT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// search_knowledge_base
// ---------------------------------------------------------------------------

/// Parameters for the search_knowledge_base tool
#[derive(Debug, Clone, Deserialize)]
struct SearchKbParams {
    /// Natural language search query
    query: String,
}

/// Tool that searches the product knowledge base
pub struct SearchKnowledgeBaseTool {
    kb_api_url: Option<String>,
    client: reqwest::Client,
}

impl SearchKnowledgeBaseTool {
    /// Creates the tool
    ///
    /// # Arguments
    ///
    /// * `kb_api_url` - Knowledge-base API root; when `None` a canned result
    ///   is served
    pub fn new(kb_api_url: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { kb_api_url, client }
    }
}

#[async_trait::async_trait]
impl ToolExecutor for SearchKnowledgeBaseTool {
    fn tool_definition(&self) -> serde_json::Value {
        json!({
            "name": "search_knowledge_base",
            "description": "Search the product knowledge base for answers to customer questions",
            "parameters": {
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Natural language search query"
                    }
                },
                "required": ["query"]
            }
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<ToolResult> {
        let params: SearchKbParams = match serde_json::from_value(args) {
            Ok(params) => params,
            Err(err) => return Ok(ToolResult::error(format!("Invalid arguments: {}", err))),
        };

        if let Some(kb_url) = &self.kb_api_url {
            let url = format!("{}/search", kb_url.trim_end_matches('/'));
            let response = match self
                .client
                .get(&url)
                .query(&[("q", params.query.as_str())])
                .send()
                .await
            {
                Ok(response) => response,
                Err(err) => return Ok(ToolResult::error(err.to_string())),
            };
            return match response.json::<serde_json::Value>().await {
                Ok(body) => Ok(ToolResult::success(serde_json::to_string_pretty(&body)?)),
                Err(err) => Ok(ToolResult::error(err.to_string())),
            };
        }

        // Canned result for demonstration when no KB endpoint is configured
        let body = serde_json::to_string_pretty(&json!({
            "results": [{
                "title": "Password Reset Guide",
                "content": "Go to Settings > Security > Reset Password to change your password.",
                "url": "https://docs.example.com/password-reset",
            }],
            "total": 1,
        }))?;
        Ok(ToolResult::success(body))
    }
}

// ---------------------------------------------------------------------------
// lookup_account
// ---------------------------------------------------------------------------

/// Parameters for the lookup_account tool
#[derive(Debug, Clone, Deserialize)]
struct LookupAccountParams {
    /// Customer email address
    email: String,
}

/// Tool that looks up customer account information by email address
///
/// Stands in for a CRM/database query; the record shape matches a real
/// integration.
pub struct LookupAccountTool;

#[async_trait::async_trait]
impl ToolExecutor for LookupAccountTool {
    fn tool_definition(&self) -> serde_json::Value {
        json!({
            "name": "lookup_account",
            "description": "Look up customer account information by email address",
            "parameters": {
                "type": "object",
                "properties": {
                    "email": {
                        "type": "string",
                        "description": "Customer email address"
                    }
                },
                "required": ["email"]
            }
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<ToolResult> {
        let params: LookupAccountParams = match serde_json::from_value(args) {
            Ok(params) => params,
            Err(err) => return Ok(ToolResult::error(format!("Invalid arguments: {}", err))),
        };

        let body = serde_json::to_string_pretty(&json!({
            "found": true,
            "customer_id": "cust_12345",
            "name": "Jane Smith",
            "email": params.email,
            "plan": "Pro",
            "account_status": "active",
            "open_tickets": 0,
            "created_at": "2023-01-15",
        }))?;
        Ok(ToolResult::success(body))
    }
}

// ---------------------------------------------------------------------------
// create_ticket
// ---------------------------------------------------------------------------

/// Parameters for the create_ticket tool
#[derive(Debug, Clone, Deserialize)]
struct CreateTicketParams {
    title: String,
    #[allow(dead_code)]
    description: String,
    /// low, medium, or high
    priority: String,
    customer_email: String,
    #[serde(default)]
    #[allow(dead_code)]
    category: Option<String>,
}

/// Builds a ticket identifier of the form `TKT-<uuid>`
pub fn make_ticket_id() -> String {
    format!("TKT-{}", Uuid::new_v4())
}

/// Estimated first-response window for a ticket priority
pub fn estimated_response(priority: &str) -> &'static str {
    if priority == "high" {
        "2 hours"
    } else {
        "24 hours"
    }
}

/// Tool that creates a support ticket for issues requiring follow-up
pub struct CreateTicketTool;

#[async_trait::async_trait]
impl ToolExecutor for CreateTicketTool {
    fn tool_definition(&self) -> serde_json::Value {
        json!({
            "name": "create_ticket",
            "description": "Create a support ticket for issues requiring follow-up",
            "parameters": {
                "type": "object",
                "properties": {
                    "title": {"type": "string"},
                    "description": {"type": "string"},
                    "priority": {"type": "string", "description": "low, medium, or high"},
                    "customer_email": {"type": "string"},
                    "category": {"type": "string"}
                },
                "required": ["title", "description", "priority", "customer_email"]
            }
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<ToolResult> {
        let params: CreateTicketParams = match serde_json::from_value(args) {
            Ok(params) => params,
            Err(err) => return Ok(ToolResult::error(format!("Invalid arguments: {}", err))),
        };

        let ticket_id = make_ticket_id();
        tracing::info!(
            "Ticket created: {} \"{}\" ({}) for {}",
            ticket_id,
            params.title,
            params.priority,
            params.customer_email
        );

        let body = serde_json::to_string_pretty(&json!({
            "ticket_id": ticket_id,
            "status": "open",
            "created_at": Utc::now().to_rfc3339(),
            "estimated_response": estimated_response(&params.priority),
        }))?;
        Ok(ToolResult::success(body))
    }
}

// ---------------------------------------------------------------------------
// escalate_to_human
// ---------------------------------------------------------------------------

fn default_priority() -> String {
    "normal".to_string()
}

/// Parameters for the escalate_to_human tool
#[derive(Debug, Clone, Deserialize)]
struct EscalateParams {
    reason: String,
    #[serde(default)]
    ticket_id: Option<String>,
    #[serde(default = "default_priority")]
    priority: String,
}

/// Queue position for an escalation priority
pub fn queue_position(priority: &str) -> u32 {
    if priority == "urgent" {
        1
    } else {
        5
    }
}

/// Estimated wait for an escalation priority
pub fn estimated_wait(priority: &str) -> &'static str {
    if priority == "urgent" {
        "5 minutes"
    } else {
        "30 minutes"
    }
}

/// Tool that escalates an unresolved issue to a human support agent
pub struct EscalateTool;

#[async_trait::async_trait]
impl ToolExecutor for EscalateTool {
    fn tool_definition(&self) -> serde_json::Value {
        json!({
            "name": "escalate_to_human",
            "description": "Escalate an unresolved issue to a human support agent",
            "parameters": {
                "type": "object",
                "properties": {
                    "reason": {"type": "string"},
                    "ticket_id": {"type": "string"},
                    "priority": {"type": "string", "description": "normal or urgent"}
                },
                "required": ["reason"]
            }
        })
    }

    async fn execute(&self, args: serde_json::Value) -> Result<ToolResult> {
        let params: EscalateParams = match serde_json::from_value(args) {
            Ok(params) => params,
            Err(err) => return Ok(ToolResult::error(format!("Invalid arguments: {}", err))),
        };

        tracing::info!(
            "Escalation {}: {} ({})",
            params.priority.to_uppercase(),
            params.reason,
            params.ticket_id.as_deref().unwrap_or("no ticket")
        );

        let body = serde_json::to_string_pretty(&json!({
            "escalated": true,
            "queue_position": queue_position(&params.priority),
            "estimated_wait": estimated_wait(&params.priority),
        }))?;
        Ok(ToolResult::success(body))
    }
}
