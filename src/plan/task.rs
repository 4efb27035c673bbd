use chrono::{Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{PlanError, PlanResult};

/// Get the current date in local timezone
pub fn local_date_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Task priority, critical first
///
/// The derived `Ord` follows declaration order, so sorting ascending puts
/// the most urgent work at the front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort rank: critical(0) < high(1) < medium(2) < low(3)
    pub fn rank(self) -> u8 {
        match self {
            Priority::Critical => 0,
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task status
///
/// `InProgress` is only ever set by load data (work already underway when the
/// plan was generated). The plan view toggles between `Pending` and `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
        }
    }

    pub fn is_completed(self) -> bool {
        self == TaskStatus::Completed
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TaskStatus::Pending),
            "in-progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            _ => Err(format!(
                "Invalid status '{}'. Valid options are: pending, in-progress, completed",
                s
            )),
        }
    }
}

/// A unit of biosecurity remediation work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier within a store (e.g., "1", "ai-task-0")
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: TaskStatus,
    /// Category label, the join key into modules and phases
    pub category: String,
    /// Descriptive cost text (e.g., "₱150-300")
    pub estimated_cost: String,
    /// Descriptive timing text, scanned for temporal keywords
    pub timeframe: String,
    /// Why the task was inserted or reprioritized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adaptation_reason: Option<String>,
    /// Date of the last status change made by the engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDate>,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }
}

/// One element of an externally generated task list
///
/// `id` and `status` may be absent; [`TaskInput::into_task`] backfills them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub priority: Priority,
    #[serde(default, deserialize_with = "blank_status_as_none")]
    pub status: Option<TaskStatus>,
    pub category: String,
    pub estimated_cost: String,
    pub timeframe: String,
    pub adaptation_reason: Option<String>,
}

/// An empty status string counts as absent
fn blank_status_as_none<'de, D>(deserializer: D) -> Result<Option<TaskStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(s) if !s.is_empty() => s.parse().map(Some).map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

impl TaskInput {
    /// Convert into a task, using `index` (position in the incoming array)
    /// for a missing or blank id
    ///
    /// Non-blank ids are kept verbatim, surrounding whitespace included.
    pub fn into_task(self, index: usize) -> Task {
        let id = match self.id {
            Some(id) if !id.trim().is_empty() => id,
            _ => format!("ai-task-{}", index),
        };

        Task {
            id,
            title: self.title,
            description: self.description,
            priority: self.priority,
            status: self.status.unwrap_or_default(),
            category: self.category,
            estimated_cost: self.estimated_cost,
            timeframe: self.timeframe,
            adaptation_reason: self.adaptation_reason,
            updated_at: None,
        }
    }
}

/// Parse a JSON task list in the ingestion shape and backfill ids/statuses
pub fn parse_task_list(json: &str) -> PlanResult<Vec<Task>> {
    let inputs: Vec<TaskInput> =
        serde_json::from_str(json).map_err(|e| PlanError::InvalidInput(e.to_string()))?;

    Ok(inputs
        .into_iter()
        .enumerate()
        .map(|(index, input)| input.into_task(index))
        .collect())
}
