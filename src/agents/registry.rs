//! Per-agent tool registry builder
//!
//! Assembles the `ToolRegistry` for an agent preset from the loaded
//! configuration. Each tool is constructed with its validator capability
//! already bound (sandbox base directory, subcommand allow-set, API base), so
//! a host runtime cannot accidentally expose an ungated tool.

use std::sync::Arc;
use std::time::Duration;

use crate::agents::AgentKind;
use crate::config::Config;
use crate::error::Result;
use crate::tools::github::{FetchDiffTool, GithubContext, PostReviewCommentTool};
use crate::tools::kubectl::{FetchLogsTool, ListDeploymentsTool, RunKubectlTool};
use crate::tools::load_csv::LoadCsvTool;
use crate::tools::sql_query::RunSqlQueryTool;
use crate::tools::stats::ComputeStatsTool;
use crate::tools::support::{
    CreateTicketTool, EscalateTool, LookupAccountTool, SearchKnowledgeBaseTool,
};
use crate::tools::ToolRegistry;
use crate::validate::PathSandbox;

/// Builder for per-agent tool registries
///
/// # Examples
///
/// ```
/// use toolgate::agents::{AgentKind, ToolRegistryBuilder};
/// use toolgate::config::Config;
///
/// let registry = ToolRegistryBuilder::new(AgentKind::Devops, Config::default())
///     .build()
///     .expect("registry");
/// assert_eq!(registry.len(), 3);
/// ```
pub struct ToolRegistryBuilder {
    kind: AgentKind,
    config: Config,
}

impl ToolRegistryBuilder {
    /// Creates a builder for the given preset and configuration
    pub fn new(kind: AgentKind, config: Config) -> Self {
        Self { kind, config }
    }

    /// Builds the registry for the preset
    ///
    /// # Errors
    ///
    /// Currently infallible in practice; the `Result` leaves room for
    /// presets whose construction can fail (e.g. client setup).
    pub fn build(self) -> Result<ToolRegistry> {
        let mut registry = ToolRegistry::new();
        match self.kind {
            AgentKind::CodeReview => self.register_code_review(&mut registry),
            AgentKind::CustomerSupport => self.register_customer_support(&mut registry),
            AgentKind::DataAnalyst => self.register_data_analyst(&mut registry),
            AgentKind::Devops => self.register_devops(&mut registry),
        }
        tracing::debug!(
            "Built {} registry with {} tools",
            self.kind,
            registry.len()
        );
        Ok(registry)
    }

    fn register_code_review(&self, registry: &mut ToolRegistry) {
        let context = GithubContext::new(
            &self.config.code_review.api_base,
            self.config.code_review.token.clone(),
        );
        registry.register("fetch_diff", Arc::new(FetchDiffTool::new(context.clone())));
        registry.register(
            "post_review_comment",
            Arc::new(PostReviewCommentTool::new(context)),
        );
    }

    fn register_customer_support(&self, registry: &mut ToolRegistry) {
        registry.register(
            "search_knowledge_base",
            Arc::new(SearchKnowledgeBaseTool::new(
                self.config.support.kb_api_url.clone(),
            )),
        );
        registry.register("lookup_account", Arc::new(LookupAccountTool));
        registry.register("create_ticket", Arc::new(CreateTicketTool));
        registry.register("escalate_to_human", Arc::new(EscalateTool));
    }

    fn register_data_analyst(&self, registry: &mut ToolRegistry) {
        let sandbox = PathSandbox::new(self.config.data_analyst.data_dir.clone(), ".csv");
        registry.register(
            "run_sql_query",
            Arc::new(RunSqlQueryTool::new(
                self.config.data_analyst.database_url.clone(),
            )),
        );
        registry.register("load_csv", Arc::new(LoadCsvTool::new(sandbox)));
        registry.register("compute_stats", Arc::new(ComputeStatsTool));
    }

    fn register_devops(&self, registry: &mut ToolRegistry) {
        let timeout = Duration::from_secs(self.config.devops.kubectl_timeout_secs);
        registry.register("run_kubectl", Arc::new(RunKubectlTool::new(timeout)));
        registry.register("fetch_logs", Arc::new(FetchLogsTool::new(timeout)));
        registry.register(
            "list_recent_deployments",
            Arc::new(ListDeploymentsTool::new(timeout)),
        );
    }
}
