//! Module and phase progress
//!
//! All functions here are pure and total: a grouping with no matching tasks
//! reports zero progress rather than failing.

use serde::Serialize;

use super::task::Task;
use crate::catalog::{Grouping, Module, Phase, Selection};

/// Completion counts for a set of tasks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    /// `round(100 * completed / total)`, 0 when `total` is 0
    pub percentage: u32,
}

impl Progress {
    pub fn from_counts(completed: usize, total: usize) -> Self {
        Self {
            completed,
            total,
            percentage: percentage(completed, total),
        }
    }

    /// Count completed tasks among `tasks`
    pub fn of<'a, I>(tasks: I) -> Self
    where
        I: IntoIterator<Item = &'a Task>,
    {
        let (completed, total) = tasks.into_iter().fold((0, 0), |(done, all), task| {
            (done + usize::from(task.is_completed()), all + 1)
        });
        Self::from_counts(completed, total)
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

/// Integer percentage, rounding halves up
fn percentage(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((200 * completed + total) / (2 * total)) as u32
}

/// Progress of one module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleProgress<'a> {
    pub module: &'a Module,
    #[serde(flatten)]
    pub progress: Progress,
}

/// Progress of one phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseProgress<'a> {
    pub phase: &'a Phase,
    #[serde(flatten)]
    pub progress: Progress,
}

/// Tasks belonging to a selection, in store order
pub fn tasks_for_selection<'a>(selection: &Selection<'_>, tasks: &'a [Task]) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| selection.includes(&t.category))
        .collect()
}

/// Completion progress of a grouping
pub fn progress<G: Grouping + ?Sized>(grouping: &G, tasks: &[Task]) -> Progress {
    Progress::of(tasks.iter().filter(|t| grouping.covers(&t.category)))
}

/// First non-completed task of a grouping in store order
pub fn current_step<'a, G: Grouping + ?Sized>(grouping: &G, tasks: &'a [Task]) -> Option<&'a Task> {
    tasks
        .iter()
        .find(|t| grouping.covers(&t.category) && !t.is_completed())
}

/// Where the user is now
///
/// Walks phases in ascending id order and returns the first with an unfinished
/// task. When every phase is done the last phase is returned, so there is
/// always an answer as long as at least one phase is configured.
pub fn current_phase<'p>(phases: &'p [Phase], tasks: &[Task]) -> Option<&'p Phase> {
    phases
        .iter()
        .find(|phase| current_step(*phase, tasks).is_some())
        .or_else(|| phases.last())
}
