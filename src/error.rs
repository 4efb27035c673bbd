//! Error types for the action plan engine

use thiserror::Error;

/// Errors raised by plan operations
///
/// Only the mutating operations (`load`, status changes) return these.
/// Queries are total and never fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// The incoming task list is malformed or reuses an id
    #[error("invalid task list: {0}")]
    InvalidInput(String),

    /// No task with this id exists in the store
    #[error("task '{0}' not found")]
    NotFound(String),

    /// A module or phase lists a category that no task uses.
    ///
    /// Collected and logged after a load, never returned from an operation.
    #[error("{grouping} lists category '{category}' but no task uses it")]
    Configuration { grouping: String, category: String },

    /// The module/phase catalog cannot be used
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
}

pub type PlanResult<T> = Result<T, PlanError>;
