//! Agent presets
//!
//! Each preset names one of the tool-consuming agent surfaces and carries its
//! system prompt and registry builder. The conversational session that would
//! drive a preset lives in the host client library; this module only decides
//! which validated tools that session gets.

pub mod registry;

use std::fmt;
use std::str::FromStr;

pub use registry::ToolRegistryBuilder;

/// The agent surfaces Toolgate ships tool presets for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentKind {
    /// Pull-request review: diff retrieval and inline comments
    CodeReview,
    /// Customer support: knowledge base, accounts, tickets, escalation
    CustomerSupport,
    /// Data analysis: read-only SQL, CSV loading, statistics
    DataAnalyst,
    /// Infrastructure inspection: read-only kubectl, logs, deployments
    Devops,
}

impl AgentKind {
    /// All presets, in stable order
    pub fn all() -> [AgentKind; 4] {
        [
            AgentKind::CodeReview,
            AgentKind::CustomerSupport,
            AgentKind::DataAnalyst,
            AgentKind::Devops,
        ]
    }

    /// The identifier used on the CLI and in logs
    pub fn name(&self) -> &'static str {
        match self {
            AgentKind::CodeReview => "code_review",
            AgentKind::CustomerSupport => "customer_support",
            AgentKind::DataAnalyst => "data_analyst",
            AgentKind::Devops => "devops",
        }
    }

    /// The system prompt a host session should run this preset with
    pub fn system_prompt(&self) -> &'static str {
        match self {
            AgentKind::CodeReview => {
                "You are a senior software engineer conducting a thorough code review. \
                 Identify security vulnerabilities, logic errors, and performance anti-patterns. \
                 Be constructive and specific. Reference file paths and line numbers. \
                 Return your findings as JSON: \
                 { summary, approved, findings: [{ severity, file, line, message, suggestion }] }"
            }
            AgentKind::CustomerSupport => {
                "You are a friendly and knowledgeable customer support agent for Acme Corp. \
                 Use your tools to look up information and resolve customer issues accurately. \
                 Never guess or make up information - always use a tool first. \
                 Keep responses concise and warm. After resolving an issue, ask if there is \
                 anything else you can help with."
            }
            AgentKind::DataAnalyst => {
                "You are a senior data analyst assistant. \
                 Execute SQL queries and analyze data to answer business questions. \
                 Show SQL before executing. Round numbers to 2 decimal places. \
                 Always highlight key insights, trends, and anomalies. \
                 Suggest follow-up questions to deepen the analysis."
            }
            AgentKind::Devops => {
                "You are a senior SRE assistant. \
                 Help with incident response, infrastructure health checks, and deployment analysis. \
                 Only run read-only kubectl commands. Always confirm the environment before acting. \
                 Summarize all findings clearly and suggest next investigation steps."
            }
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AgentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "code_review" => Ok(AgentKind::CodeReview),
            "customer_support" => Ok(AgentKind::CustomerSupport),
            "data_analyst" => Ok(AgentKind::DataAnalyst),
            "devops" => Ok(AgentKind::Devops),
            other => Err(format!(
                "unknown agent '{}' (expected one of: code_review, customer_support, data_analyst, devops)",
                other
            )),
        }
    }
}
