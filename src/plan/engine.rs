use serde::Serialize;

use super::aggregate::{self, ModuleProgress, PhaseProgress, Progress};
use super::categorize::{self, TaskBuckets};
use super::store::TaskStore;
use super::task::{Task, TaskStatus, parse_task_list};
use crate::catalog::{Catalog, Grouping, Phase, Selection};
use crate::error::{PlanError, PlanResult};

/// Overall progress view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary<'a> {
    pub overall: Progress,
    /// Phases counted as units: `completed` is the number of phases whose
    /// tasks are all done
    pub journey: Progress,
    pub per_module: Vec<ModuleProgress<'a>>,
    pub per_phase: Vec<PhaseProgress<'a>>,
    pub current_phase: Option<&'a Phase>,
    /// The one thing to do next: first unfinished task of the current phase
    pub current_step_in_phase: Option<&'a Task>,
}

impl PlanSummary<'_> {
    pub fn overall_percentage(&self) -> u32 {
        self.overall.percentage
    }
}

/// Action plan for one session
///
/// Owns the task store and the catalog it is grouped by. The engine is
/// synchronous and performs no I/O; callers hand it a fully materialized
/// task list.
#[derive(Debug, Clone, Default)]
pub struct PlanEngine {
    store: TaskStore,
    catalog: Catalog,
}

impl PlanEngine {
    /// Create an engine with an empty store
    pub fn new(catalog: Catalog) -> Self {
        Self {
            store: TaskStore::new(),
            catalog,
        }
    }

    /// Create an engine seeded with `tasks`
    pub fn with_tasks(catalog: Catalog, tasks: Vec<Task>) -> PlanResult<Self> {
        let mut engine = Self::new(catalog);
        engine.load(tasks)?;
        Ok(engine)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.all()
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.store.get(id)
    }

    /// Replace every task
    ///
    /// On success, logs tasks the catalog cannot place and catalog categories
    /// that no task uses.
    pub fn load(&mut self, tasks: Vec<Task>) -> PlanResult<usize> {
        self.store.load(tasks)?;

        for task in self.store.all() {
            if !self.catalog.places(&task.category) {
                tracing::warn!(
                    task_id = %task.id,
                    category = %task.category,
                    "task category is not part of any module or phase"
                );
            }
        }
        for warning in self.configuration_warnings() {
            tracing::warn!("{}", warning);
        }

        tracing::info!(tasks = self.store.len(), "action plan loaded");
        Ok(self.store.len())
    }

    /// Parse a JSON task list in the ingestion shape and load it
    pub fn load_json(&mut self, json: &str) -> PlanResult<usize> {
        let tasks = parse_task_list(json)?;
        self.load(tasks)
    }

    /// Module/phase categories that no loaded task uses
    ///
    /// These groupings will report 0% for as long as the plan stays loaded.
    pub fn configuration_warnings(&self) -> Vec<PlanError> {
        let tasks = self.store.all();
        let modules = self.catalog.modules().iter().map(|m| m as &dyn Grouping);
        let phases = self.catalog.phases().iter().map(|p| p as &dyn Grouping);

        modules
            .chain(phases)
            .flat_map(move |grouping| {
                grouping
                    .categories()
                    .iter()
                    .filter(move |category| !tasks.iter().any(|t| &t.category == *category))
                    .map(move |category| PlanError::Configuration {
                        grouping: grouping.label(),
                        category: category.clone(),
                    })
            })
            .collect()
    }

    /// Flip a task between completed and pending
    ///
    /// Completed goes back to pending; pending and in-progress both go to
    /// completed. There is no way back into in-progress from here: that state
    /// only comes from load data.
    pub fn toggle_complete(&mut self, id: &str) -> PlanResult<&Task> {
        let current = self
            .store
            .get(id)
            .ok_or_else(|| PlanError::NotFound(id.to_string()))?
            .status;

        let next = if current.is_completed() {
            TaskStatus::Pending
        } else {
            TaskStatus::Completed
        };

        tracing::debug!(task_id = %id, from = %current, to = %next, "toggle task");
        self.store.set_status(id, next)
    }

    /// Resolve a selection parameter against this engine's catalog
    pub fn select(&self, param: Option<&str>) -> Selection<'_> {
        self.catalog.select(param)
    }

    /// Tasks of a selection in store order
    pub fn tasks_for(&self, selection: &Selection<'_>) -> Vec<&Task> {
        aggregate::tasks_for_selection(selection, self.store.all())
    }

    /// What the user should see right now for `module_id`
    ///
    /// Unknown ids fall back to every task.
    pub fn active_view(&self, module_id: &str) -> TaskBuckets<'_> {
        self.buckets_for(&self.select(Some(module_id)))
    }

    /// Bucketed tasks of an already resolved selection
    pub fn buckets_for(&self, selection: &Selection<'_>) -> TaskBuckets<'_> {
        categorize::categorize(self.tasks_for(selection))
    }

    /// First unfinished task of a selection in store order
    pub fn current_step_for(&self, selection: &Selection<'_>) -> Option<&Task> {
        self.tasks_for(selection)
            .into_iter()
            .find(|t| !t.is_completed())
    }

    /// Progress of one module; zero for unknown ids
    pub fn module_progress(&self, module_id: &str) -> Progress {
        self.catalog
            .module(module_id)
            .map(|m| aggregate::progress(m, self.store.all()))
            .unwrap_or_default()
    }

    /// Progress of one phase; zero for unknown ids
    pub fn phase_progress(&self, phase_id: u32) -> Progress {
        self.catalog
            .phase(phase_id)
            .map(|p| aggregate::progress(p, self.store.all()))
            .unwrap_or_default()
    }

    pub fn current_phase(&self) -> Option<&Phase> {
        aggregate::current_phase(self.catalog.phases(), self.store.all())
    }

    /// Overall progress view
    pub fn summary(&self) -> PlanSummary<'_> {
        let tasks = self.store.all();

        let per_module = self
            .catalog
            .modules()
            .iter()
            .map(|module| ModuleProgress {
                module,
                progress: aggregate::progress(module, tasks),
            })
            .collect();

        let per_phase: Vec<PhaseProgress<'_>> = self
            .catalog
            .phases()
            .iter()
            .map(|phase| PhaseProgress {
                phase,
                progress: aggregate::progress(phase, tasks),
            })
            .collect();
        let phases_completed = per_phase.iter().filter(|p| p.progress.is_complete()).count();

        let current_phase = self.current_phase();
        let current_step_in_phase = current_phase.and_then(|p| aggregate::current_step(p, tasks));

        PlanSummary {
            overall: Progress::of(tasks),
            journey: Progress::from_counts(phases_completed, per_phase.len()),
            per_module,
            per_phase,
            current_phase,
            current_step_in_phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::defaults::default_tasks;

    fn default_engine() -> PlanEngine {
        PlanEngine::with_tasks(Catalog::gaqp(), default_tasks()).unwrap()
    }

    #[test]
    fn test_toggle_complete_pending_and_back() {
        let mut engine = default_engine();

        let task = engine.toggle_complete("3").unwrap();
        assert_eq!(task.status, TaskStatus::Completed);

        let task = engine.toggle_complete("3").unwrap();
        assert_eq!(task.status, TaskStatus::Pending);
    }

    #[test]
    fn test_toggle_complete_in_progress_goes_to_completed() {
        let mut engine = default_engine();

        let task = engine.toggle_complete("1").unwrap();
        assert_eq!(task.status, TaskStatus::Completed);

        // reverting lands on pending, not in-progress
        let task = engine.toggle_complete("1").unwrap();
        assert_eq!(task.status, TaskStatus::Pending);
    }

    #[test]
    fn test_toggle_complete_unknown_id() {
        let mut engine = default_engine();
        assert_eq!(
            engine.toggle_complete("nope").unwrap_err(),
            PlanError::NotFound("nope".to_string())
        );
    }

    #[test]
    fn test_active_view_for_default_plan() {
        let engine = default_engine();
        let view = engine.active_view("all");

        fn ids(tasks: &[&Task]) -> Vec<String> {
            tasks.iter().map(|t| t.id.clone()).collect()
        }
        assert_eq!(ids(&view.overdue), vec!["1"]);
        assert_eq!(ids(&view.today), vec!["4"]);
        assert_eq!(ids(&view.upcoming), vec!["3", "7", "5", "6", "8"]);
        assert_eq!(ids(&view.completed), vec!["2"]);
    }

    #[test]
    fn test_active_view_filters_by_module() {
        let engine = default_engine();
        let view = engine.active_view("farm-setup");
        assert_eq!(view.len(), 2);

        let fallback = engine.active_view("does-not-exist");
        assert_eq!(fallback.len(), engine.tasks().len());
    }

    #[test]
    fn test_module_and_phase_progress_unknown_keys_are_zero() {
        let engine = default_engine();
        assert_eq!(engine.module_progress("nope"), Progress::default());
        assert_eq!(engine.phase_progress(99), Progress::default());
        assert_eq!(engine.module_progress("pond-water").completed, 1);
        assert_eq!(engine.module_progress("pond-water").total, 4);
    }

    #[test]
    fn test_summary_for_default_plan() {
        let engine = default_engine();
        let summary = engine.summary();

        assert_eq!(summary.overall, Progress::from_counts(1, 8));
        assert_eq!(summary.overall_percentage(), 13);
        assert_eq!(summary.journey, Progress::from_counts(0, 4));
        assert_eq!(summary.per_module.len(), 5);
        assert_eq!(summary.per_phase.len(), 4);
        assert_eq!(summary.current_phase.map(|p| p.id), Some(1));
        assert_eq!(
            summary.current_step_in_phase.map(|t| t.id.as_str()),
            Some("4")
        );
    }

    #[test]
    fn test_journey_counts_finished_phases() {
        let mut engine = default_engine();
        engine.toggle_complete("4").unwrap();
        engine.toggle_complete("5").unwrap();

        let journey = engine.summary().journey;
        assert_eq!(journey.completed, 1);
        assert_eq!(journey.total, 4);
        assert_eq!(journey.percentage, 25);
    }

    #[test]
    fn test_configuration_warnings_for_default_plan() {
        let engine = default_engine();
        let warnings = engine.configuration_warnings();

        // the default plan has no Pond Management, Animal Health,
        // Human Resources or Waste Management tasks
        assert!(warnings.iter().all(|w| matches!(w, PlanError::Configuration { .. })));
        assert!(warnings.contains(&PlanError::Configuration {
            grouping: "module 'stock-sourcing'".to_string(),
            category: "Animal Health".to_string(),
        }));
        assert!(!warnings.iter().any(|w| matches!(
            w,
            PlanError::Configuration { category, .. } if category == "Water Management"
        )));
    }

    #[test]
    fn test_current_step_for_selection() {
        let engine = default_engine();
        let all = engine.select(None);
        assert_eq!(
            engine.current_step_for(&all).map(|t| t.id.as_str()),
            Some("1")
        );

        let setup = engine.select(Some("farm-setup"));
        assert_eq!(
            engine.current_step_for(&setup).map(|t| t.id.as_str()),
            Some("4")
        );
    }

    #[test]
    fn test_load_json_failure_keeps_previous_plan() {
        let mut engine = default_engine();
        let json = r#"[
            {"id":"dup","title":"a","priority":"low","category":"Infrastructure","estimatedCost":"","timeframe":""},
            {"id":"dup","title":"b","priority":"low","category":"Infrastructure","estimatedCost":"","timeframe":""}
        ]"#;

        assert!(matches!(
            engine.load_json(json),
            Err(PlanError::InvalidInput(_))
        ));
        assert_eq!(engine.tasks().len(), 8);
    }
}
