use std::collections::HashMap;

use super::task::{Task, TaskStatus, local_date_today};
use crate::error::{PlanError, PlanResult};

/// Canonical ordered list of tasks for one session
///
/// Insertion order is meaningful: it is the default step ordering used to
/// pick "the next thing to do".
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,

    /// id → position in `tasks`, rebuilt on every load
    ///
    /// Positions stay valid because tasks are never inserted or removed
    /// individually; the only mutation after a load is a status change.
    index: HashMap<String, usize>,
}

impl TaskStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire store
    ///
    /// Fails with [`PlanError::InvalidInput`] if two tasks share an id. The
    /// previous contents are left untouched on failure.
    pub fn load(&mut self, initial: Vec<Task>) -> PlanResult<()> {
        let mut index = HashMap::with_capacity(initial.len());
        for (pos, task) in initial.iter().enumerate() {
            if index.insert(task.id.clone(), pos).is_some() {
                return Err(PlanError::InvalidInput(format!(
                    "duplicate task id '{}'",
                    task.id
                )));
            }
        }

        self.tasks = initial;
        self.index = index;
        Ok(())
    }

    /// All tasks in insertion order
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Find a task by its id
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.index.get(id).map(|&pos| &self.tasks[pos])
    }

    /// Set a task's status and stamp its `updated_at`
    ///
    /// # Returns
    /// The updated task, or [`PlanError::NotFound`] for an unknown id
    pub fn set_status(&mut self, id: &str, status: TaskStatus) -> PlanResult<&Task> {
        let pos = *self
            .index
            .get(id)
            .ok_or_else(|| PlanError::NotFound(id.to_string()))?;

        let task = &mut self.tasks[pos];
        task.status = status;
        task.updated_at = Some(local_date_today());
        Ok(&*task)
    }
}
