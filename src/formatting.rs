//! Text rendering for MCP tool output
//!
//! Everything here reads engine results and never mutates the plan. Tools
//! re-query the engine after every toggle, so pages and buckets always reflect
//! the current state.

use crate::catalog::{Catalog, KnownCategory};
use crate::plan::{PlanSummary, Task, TaskBuckets};

/// Steps shown per page in the step list
pub const STEPS_PER_PAGE: usize = 6;

/// Short tag for a category, with a generic fallback for unknown labels
pub fn category_tag(category: &str) -> &'static str {
    match KnownCategory::from_label(category) {
        Some(KnownCategory::Infrastructure) => "build",
        Some(KnownCategory::AccessControl) => "shield",
        Some(KnownCategory::WaterManagement) | Some(KnownCategory::PondManagement) => "water",
        Some(KnownCategory::AnimalHealth) => "health",
        Some(KnownCategory::FeedManagement) => "feed",
        Some(KnownCategory::HumanResources) => "people",
        Some(KnownCategory::EquipmentManagement) => "tools",
        Some(KnownCategory::WasteManagement) => "waste",
        None => "general",
    }
}

/// One page of a list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number, clamped into range
    pub number: usize,
    pub total_pages: usize,
    pub start: usize,
    pub end: usize,
}

/// Compute the slice bounds for `page` over `len` items
///
/// Out-of-range pages clamp to the nearest valid page. An empty list has a
/// single empty page.
pub fn paginate(len: usize, page: usize) -> Page {
    let total_pages = len.div_ceil(STEPS_PER_PAGE).max(1);
    let number = page.clamp(1, total_pages);
    let start = ((number - 1) * STEPS_PER_PAGE).min(len);
    let end = (start + STEPS_PER_PAGE).min(len);
    Page {
        number,
        total_pages,
        start,
        end,
    }
}

fn format_task_line(task: &Task) -> String {
    let mut line = format!(
        "- [{}] {} (priority: {}, status: {}, {}: {})\n",
        task.id,
        task.title,
        task.priority,
        task.status,
        category_tag(&task.category),
        task.category
    );
    if !task.description.is_empty() {
        line.push_str(&format!("  {}\n", task.description));
    }
    line.push_str(&format!(
        "  Timeframe: {} | Cost: {}\n",
        task.timeframe, task.estimated_cost
    ));
    if let Some(ref reason) = task.adaptation_reason {
        line.push_str(&format!("  Why: {}\n", reason));
    }
    if let Some(date) = task.updated_at {
        line.push_str(&format!("  Updated: {}\n", date));
    }
    line
}

/// Render the four temporal buckets
pub fn format_buckets(selection_name: &str, buckets: &TaskBuckets<'_>) -> String {
    if buckets.is_empty() {
        return format!("No steps found for {}", selection_name);
    }

    let mut result = format!("{}: {} step(s)\n", selection_name, buckets.len());
    for (bucket, tasks) in buckets.iter() {
        if tasks.is_empty() {
            continue;
        }
        result.push_str(&format!("\n{} ({}):\n", bucket.label(), tasks.len()));
        for task in tasks {
            result.push_str(&format_task_line(task));
        }
    }
    result
}

/// Render one page of a selection's steps in plan order
pub fn format_steps(
    selection_name: &str,
    tasks: &[&Task],
    page: usize,
    current_step: Option<&Task>,
) -> String {
    if tasks.is_empty() {
        return format!("No steps found for {}", selection_name);
    }

    let page = paginate(tasks.len(), page);
    let mut result = format!(
        "{}: {} step(s), page {} of {}\n",
        selection_name,
        tasks.len(),
        page.number,
        page.total_pages
    );

    if tasks.iter().any(|t| t.priority == crate::plan::Priority::Critical) {
        result.push_str("Urgent: this plan has critical steps\n");
    }
    if let Some(step) = current_step {
        result.push_str(&format!("Next step: [{}] {}\n", step.id, step.title));
    }
    result.push('\n');

    for task in &tasks[page.start..page.end] {
        result.push_str(&format_task_line(task));
    }
    result
}

/// Render overall, per-module and per-phase progress
pub fn format_summary(summary: &PlanSummary<'_>) -> String {
    let mut result = format!(
        "Overall progress: {}% ({}/{} steps)\n",
        summary.overall.percentage, summary.overall.completed, summary.overall.total
    );
    if summary.journey.total > 0 {
        result.push_str(&format!(
            "Journey: {} of {} phases completed ({}%)\n",
            summary.journey.completed, summary.journey.total, summary.journey.percentage
        ));
    }

    match summary.current_phase {
        Some(phase) => {
            result.push_str(&format!("Current phase: {} - {}\n", phase.id, phase.name));
            match summary.current_step_in_phase {
                Some(step) => {
                    result.push_str(&format!("Next step: [{}] {}\n", step.id, step.title))
                }
                None => result.push_str("Next step: none, all phases complete\n"),
            }
        }
        None => result.push_str("Current phase: none configured\n"),
    }

    if !summary.per_module.is_empty() {
        result.push_str("\nModules:\n");
        for entry in &summary.per_module {
            result.push_str(&format!(
                "- {} ({}): {}% ({}/{})\n",
                entry.module.name,
                entry.module.id,
                entry.progress.percentage,
                entry.progress.completed,
                entry.progress.total
            ));
        }
    }

    if !summary.per_phase.is_empty() {
        result.push_str("\nPhases:\n");
        for entry in &summary.per_phase {
            result.push_str(&format!(
                "- Phase {} {}: {}% ({}/{})\n",
                entry.phase.id,
                entry.phase.name,
                entry.progress.percentage,
                entry.progress.completed,
                entry.progress.total
            ));
        }
    }

    result
}

/// List the selectable modules and phases
pub fn format_catalog(catalog: &Catalog) -> String {
    let mut result = String::from("Selections:\n- all: All Modules\n");

    for module in catalog.modules() {
        result.push_str(&format!("- {}: {}\n", module.id, module.name));
        if !module.description.is_empty() {
            result.push_str(&format!("  {}\n", module.description));
        }
        result.push_str(&format!("  Categories: {}\n", module.categories.join(", ")));
    }

    for phase in catalog.phases() {
        result.push_str(&format!("- phase-{}: {}\n", phase.id, phase.name));
        if !phase.description.is_empty() {
            result.push_str(&format!("  {}\n", phase.description));
        }
        result.push_str(&format!("  Categories: {}\n", phase.categories.join(", ")));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{PlanEngine, default_tasks};

    #[test]
    fn test_paginate() {
        assert_eq!(
            paginate(0, 1),
            Page {
                number: 1,
                total_pages: 1,
                start: 0,
                end: 0
            }
        );
        assert_eq!(paginate(8, 1).end, 6);
        assert_eq!(paginate(8, 2).start, 6);
        assert_eq!(paginate(8, 2).end, 8);
        // out of range clamps
        assert_eq!(paginate(8, 0).number, 1);
        assert_eq!(paginate(8, 9).number, 2);
        assert_eq!(paginate(12, 2).total_pages, 2);
    }

    #[test]
    fn test_category_tag_falls_back() {
        assert_eq!(category_tag("Pond Management"), "water");
        assert_eq!(category_tag("Marketing"), "general");
    }

    #[test]
    fn test_format_steps_pages_and_urgency() {
        let engine = PlanEngine::with_tasks(Catalog::gaqp(), default_tasks()).unwrap();
        let all = engine.select(None);
        let tasks = engine.tasks_for(&all);

        let first = format_steps(all.name(), &tasks, 1, engine.current_step_for(&all));
        assert!(first.contains("page 1 of 2"));
        assert!(first.contains("Urgent"));
        assert!(first.contains("Next step: [1]"));
        assert!(first.contains("[6]"));
        assert!(!first.contains("[7]"));

        let second = format_steps(all.name(), &tasks, 2, None);
        assert!(second.contains("[7]"));
        assert!(second.contains("[8]"));
        assert!(!second.contains("[1]"));
    }

    #[test]
    fn test_format_buckets_skips_empty_buckets() {
        let engine = PlanEngine::with_tasks(Catalog::gaqp(), default_tasks()).unwrap();
        let text = format_buckets("Farm Setup Basics", &engine.active_view("farm-setup"));

        assert!(text.contains("Due today (1)"));
        assert!(text.contains("Upcoming (1)"));
        assert!(!text.contains("Overdue"));
        assert!(!text.contains("Completed"));
    }

    #[test]
    fn test_format_summary_lists_groupings() {
        let engine = PlanEngine::with_tasks(Catalog::gaqp(), default_tasks()).unwrap();
        let text = format_summary(&engine.summary());

        assert!(text.contains("Overall progress: 13% (1/8 steps)"));
        assert!(text.contains("Journey: 0 of 4 phases completed (0%)"));
        assert!(text.contains("Current phase: 1 - Foundation & Site Security"));
        assert!(text.contains("Pond & Water Care (pond-water): 25% (1/4)"));
    }
}
