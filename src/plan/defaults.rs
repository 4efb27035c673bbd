//! Built-in plan used when no generated plan is supplied

use super::task::{Priority, Task, TaskStatus};

#[allow(clippy::too_many_arguments)]
fn step(
    id: &str,
    title: &str,
    description: &str,
    priority: Priority,
    status: TaskStatus,
    category: &str,
    estimated_cost: &str,
    timeframe: &str,
    adaptation_reason: Option<&str>,
) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        priority,
        status,
        category: category.to_string(),
        estimated_cost: estimated_cost.to_string(),
        timeframe: timeframe.to_string(),
        adaptation_reason: adaptation_reason.map(str::to_string),
        updated_at: None,
    }
}

/// The eight-step starter plan
pub fn default_tasks() -> Vec<Task> {
    use Priority::*;
    use TaskStatus::*;

    vec![
        step(
            "1",
            "Check water quality in Pond 3",
            "Test dissolved oxygen levels immediately - readings show concern",
            Critical,
            InProgress,
            "Water Management",
            "₱0 (existing equipment)",
            "Started 5 min ago",
            Some("Critical oxygen depletion detected"),
        ),
        step(
            "2",
            "Turn on backup aerators",
            "Activate all 3 backup aerators to increase oxygen",
            Critical,
            Completed,
            "Water Management",
            "₱0",
            "Completed 15 min ago",
            None,
        ),
        step(
            "3",
            "Monitor water for 2 hours",
            "Check dissolved oxygen every 30 minutes - target: above 5mg/L",
            High,
            Pending,
            "Water Management",
            "₱0",
            "Starts after step 1",
            None,
        ),
        step(
            "4",
            "Inspect pond dykes for damage",
            "Check all pond walls for cracks due to heavy rains forecast",
            High,
            Pending,
            "Infrastructure",
            "₱200-500",
            "Today before 5pm",
            Some("Prioritized due to typhoon alert"),
        ),
        step(
            "5",
            "Set up visitor disinfection",
            "Prepare footbath and disinfection station at farm entrance",
            Medium,
            Pending,
            "Access Control",
            "₱150-300",
            "Tomorrow",
            None,
        ),
        step(
            "6",
            "Check pond water temperature",
            "Monitor temperature levels in all ponds - ideal range 28-32°C",
            Medium,
            Pending,
            "Water Management",
            "₱0 (existing equipment)",
            "Tomorrow morning",
            None,
        ),
        step(
            "7",
            "Inspect feed storage area",
            "Check for moisture, pests, and proper ventilation in feed storage",
            High,
            Pending,
            "Feed Management",
            "₱100-200",
            "This afternoon",
            None,
        ),
        step(
            "8",
            "Calibrate water testing equipment",
            "Ensure DO meters and pH testers are properly calibrated",
            Medium,
            Pending,
            "Equipment Management",
            "₱50-100",
            "End of week",
            None,
        ),
    ]
}
