//! GAqP Action Plan MCP Server Library
//!
//! This library provides a Model Context Protocol (MCP) server for the
//! "dynamic action plan" of an aquaculture biosecurity coaching dashboard.
//! A plan is a flat list of remediation tasks; the engine groups them into
//! GAqP certification modules and delivery phases, tracks progress, sorts
//! tasks into overdue / today / upcoming / completed buckets, and toggles
//! task completion.
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **MCP Layer**: `PlanServerHandler` - Handles MCP protocol communication
//! - **Domain Layer**: `plan` and `catalog` modules - Task store, categorizer,
//!   module/phase aggregation and the plan engine
//! - **Input Layer**: `storage` module - Seed plan (JSON) and catalog (TOML) files
//!
//! # Example
//!
//! ```no_run
//! use gaqp_plan::PlanServerHandler;
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let handler = PlanServerHandler::new(Some("plan.json"), None)?;
//!     // Use handler with MCP server...
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod error;
pub mod formatting;
pub mod plan;
pub mod storage;

use anyhow::Result;
use mcp_attr::server::{McpServer, mcp_server};
use mcp_attr::{Result as McpResult, bail};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

// Re-export commonly used types
pub use catalog::{Catalog, Module, Phase, Selection};
pub use error::{PlanError, PlanResult};
pub use plan::{PlanEngine, PlanSummary, Priority, Progress, Task, TaskBuckets, TaskStatus};
pub use storage::Storage;

/// MCP Server handler for one action plan session
///
/// Owns a single [`PlanEngine`]. The mutex exists only because the MCP runtime
/// needs a `Sync` handler; every tool call is a short synchronous engine
/// operation.
pub struct PlanServerHandler {
    pub(crate) engine: Mutex<PlanEngine>,
}

impl PlanServerHandler {
    /// Create a new plan server handler
    ///
    /// # Arguments
    /// * `plan_path` - JSON seed plan; `None` or a missing file uses the default plan
    /// * `catalog_path` - TOML module/phase catalog; `None` uses the GAqP catalog
    ///
    /// # Example
    /// ```no_run
    /// # use gaqp_plan::PlanServerHandler;
    /// # use anyhow::Result;
    /// # fn main() -> Result<()> {
    /// let handler = PlanServerHandler::new(None, None)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(plan_path: Option<&str>, catalog_path: Option<&str>) -> Result<Self> {
        let catalog = storage::load_catalog(catalog_path.map(Path::new))?;
        let tasks = match plan_path {
            Some(path) => Storage::new(path).load()?,
            None => plan::default_tasks(),
        };
        let engine = PlanEngine::with_tasks(catalog, tasks)?;
        Ok(Self::from_engine(engine))
    }

    /// Wrap an already constructed engine
    pub fn from_engine(engine: PlanEngine) -> Self {
        Self {
            engine: Mutex::new(engine),
        }
    }

    /// Lock the engine
    ///
    /// Engine operations leave the store consistent at every step, so a
    /// poisoned lock is still safe to reuse.
    fn engine(&self) -> MutexGuard<'_, PlanEngine> {
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Normalize task ID by trimming surrounding whitespace
    fn normalize_task_id(task_id: &str) -> String {
        task_id.trim().to_string()
    }
}

/// GAqP action plan server for aquaculture biosecurity coaching.
///
/// The plan is a list of biosecurity steps (tasks). Each step has a priority
/// (critical/high/medium/low), a status (pending/in-progress/completed), a
/// category such as "Water Management", and a free-text timeframe.
///
/// Key concepts:
/// - **module**: a GAqP competency grouping categories (e.g. "pond-water")
/// - **phase**: an ordered delivery stage (phase-1 .. phase-4)
/// - **buckets**: overdue / due today / upcoming / completed, derived from timeframe text
/// - **selection**: a module id, a phase id, or "all"; unknown values mean "all"
///
/// Workflow: 1) summary to see where the farmer is → 2) list_steps or action_view
/// for a module → 3) toggle_complete as work gets done.
#[mcp_server]
impl McpServer for PlanServerHandler {
    /// **Load plan**: Replace the whole plan with a generated task list.
    /// **Format**: JSON array of {id?, title, description?, priority, status?, category, estimatedCost, timeframe, adaptationReason?}.
    /// Missing ids become "ai-task-<index>", missing status becomes "pending". Duplicate ids are rejected and the current plan is kept.
    #[tool]
    async fn load_plan(
        &self,
        /// JSON array of tasks
        tasks_json: String,
    ) -> McpResult<String> {
        let mut engine = self.engine();
        match engine.load_json(&tasks_json) {
            Ok(count) => Ok(format!("Loaded plan with {} step(s)", count)),
            Err(e) => {
                drop(engine);
                bail!("Failed to load plan: {}", e);
            }
        }
    }

    /// **Reset plan**: Discard the current plan and restore the built-in eight-step starter plan.
    #[tool]
    async fn reset_plan(&self) -> McpResult<String> {
        let mut engine = self.engine();
        match engine.load(plan::default_tasks()) {
            Ok(count) => Ok(format!("Plan reset to default ({} steps)", count)),
            Err(e) => {
                drop(engine);
                bail!("Failed to reset plan: {}", e);
            }
        }
    }

    /// **Action view**: Steps grouped into overdue / due today / upcoming / completed.
    /// Open buckets list critical steps first; completed lists least urgent first.
    #[tool]
    async fn action_view(
        &self,
        /// Module id, phase id (e.g. "phase-2") or "all". Empty=all.
        module: Option<String>,
        /// Return JSON instead of text (optional)
        json: Option<bool>,
    ) -> McpResult<String> {
        let engine = self.engine();
        let selection = engine.select(module.as_deref());
        let buckets = engine.buckets_for(&selection);

        if json.unwrap_or(false) {
            return match serde_json::to_string_pretty(&buckets) {
                Ok(s) => Ok(s),
                Err(e) => bail!("Failed to serialize view: {}", e),
            };
        }
        Ok(formatting::format_buckets(selection.name(), &buckets))
    }

    /// **List steps**: Steps of a module/phase in plan order, six per page, with the next step to do.
    /// Once the selection is finished, the next step comes from the whole plan.
    #[tool]
    async fn list_steps(
        &self,
        /// Module id, phase id (e.g. "phase-2") or "all". Empty=all.
        module: Option<String>,
        /// Page number starting at 1 (optional)
        page: Option<u32>,
    ) -> McpResult<String> {
        let engine = self.engine();
        let selection = engine.select(module.as_deref());
        let tasks = engine.tasks_for(&selection);
        // a finished selection points at the next step of the whole plan
        let current = engine
            .current_step_for(&selection)
            .or_else(|| engine.current_step_for(&Selection::All));
        let page = page.unwrap_or(1) as usize;

        Ok(formatting::format_steps(
            selection.name(),
            &tasks,
            page,
            current,
        ))
    }

    /// **Summary**: Overall, per-module and per-phase progress, the current phase and the one step to do next.
    #[tool]
    async fn summary(
        &self,
        /// Return JSON instead of text (optional)
        json: Option<bool>,
    ) -> McpResult<String> {
        let engine = self.engine();
        let summary = engine.summary();

        if json.unwrap_or(false) {
            return match serde_json::to_string_pretty(&summary) {
                Ok(s) => Ok(s),
                Err(e) => bail!("Failed to serialize summary: {}", e),
            };
        }
        Ok(formatting::format_summary(&summary))
    }

    /// **Toggle complete**: Mark a step completed, or reopen a completed step as pending.
    /// In-progress steps become completed; reopening never restores in-progress.
    #[tool]
    async fn toggle_complete(
        &self,
        /// Step ID
        id: String,
    ) -> McpResult<String> {
        let id = Self::normalize_task_id(&id);
        let mut engine = self.engine();

        let Some(before) = engine.task(&id).map(|t| t.status) else {
            drop(engine);
            bail!("Step '{}' not found", id);
        };

        let toggled = engine
            .toggle_complete(&id)
            .map(|task| (task.title.clone(), task.status));
        let (title, after) = match toggled {
            Ok(pair) => pair,
            Err(e) => {
                drop(engine);
                bail!("Failed to update step: {}", e);
            }
        };

        let overall = engine.summary().overall;
        Ok(format!(
            "Step {} ({}): {} → {}\nOverall progress: {}% ({}/{} steps)",
            id, title, before, after, overall.percentage, overall.completed, overall.total
        ))
    }

    /// **Catalog**: The modules and phases that can be used as a selection.
    #[tool]
    async fn catalog(&self) -> McpResult<String> {
        let engine = self.engine();
        Ok(formatting::format_catalog(engine.catalog()))
    }
}
