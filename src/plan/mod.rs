//! Action plan domain model and engine
//!
//! Split into submodules, leaves first:
//! - `task`: task record, priority/status enums and the ingestion shape
//! - `store`: the ordered task store
//! - `categorize`: temporal buckets (overdue/today/upcoming/completed)
//! - `aggregate`: module/phase progress and current-phase selection
//! - `engine`: orchestration, status toggle and summary
//! - `defaults`: the built-in starter plan

mod aggregate;
mod categorize;
mod defaults;
mod engine;
mod store;
mod task;

pub use aggregate::{
    ModuleProgress, PhaseProgress, Progress, current_phase, current_step, progress,
    tasks_for_selection,
};
pub use categorize::{Bucket, TaskBuckets, bucket_for, categorize};
pub use defaults::default_tasks;
pub use engine::{PlanEngine, PlanSummary};
pub use store::TaskStore;
pub use task::{Priority, Task, TaskInput, TaskStatus, local_date_today, parse_task_list};
