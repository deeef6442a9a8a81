//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use crate::project::domain::ProjectId;
use thiserror::Error;

/// Errors returned while constructing or mutating task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The referenced project does not exist.
    #[error("task references unknown project {0}")]
    UnknownProject(ProjectId),

    /// The configured transition policy forbids the requested move.
    #[error("task {task_id} cannot move from {} to {}", from.as_str(), to.as_str())]
    TransitionNotAllowed {
        /// Task being transitioned.
        task_id: TaskId,
        /// Status before the attempted transition.
        from: TaskStatus,
        /// Requested target status.
        to: TaskStatus,
    },
}

/// Error returned while parsing task statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);
