//! Common test utilities for integration tests
#![allow(dead_code)]

use gaqp_plan::{Catalog, PlanEngine, Priority, Task, TaskStatus};

/// Create a test task with minimal fields
pub fn create_test_task(
    id: &str,
    priority: Priority,
    status: TaskStatus,
    category: &str,
    timeframe: &str,
) -> Task {
    Task {
        id: id.to_string(),
        title: format!("Step {}", id),
        description: String::new(),
        priority,
        status,
        category: category.to_string(),
        estimated_cost: "₱0".to_string(),
        timeframe: timeframe.to_string(),
        adaptation_reason: None,
        updated_at: None,
    }
}

/// Engine over the GAqP catalog seeded with `tasks`
pub fn engine_with(tasks: Vec<Task>) -> PlanEngine {
    PlanEngine::with_tasks(Catalog::gaqp(), tasks).unwrap()
}

/// A mixed plan touching every phase and a category no module covers
pub fn mixed_plan() -> Vec<Task> {
    use Priority::*;
    use TaskStatus::*;

    vec![
        create_test_task("a", High, Pending, "Infrastructure", "Today"),
        create_test_task("b", Critical, Pending, "Water Management", "2 days overdue"),
        create_test_task("c", Low, Completed, "Animal Health", "Done last week"),
        create_test_task("d", Medium, InProgress, "Feed Management", "Next week"),
        create_test_task("e", Low, Pending, "Waste Management", "Immediately"),
        create_test_task("f", Medium, Completed, "Access Control", "1 day ago"),
        create_test_task("g", High, Pending, "Marketing", "Tomorrow"),
    ]
}

/// Ids of a task list, in order
pub fn ids(tasks: &[&Task]) -> Vec<String> {
    tasks.iter().map(|t| t.id.clone()).collect()
}
