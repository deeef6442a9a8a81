//! Domain model for task lifecycle management.
//!
//! Tasks move freely between the four board columns unless a restricted
//! [`TransitionPolicy`] is configured. Overdue evaluation is a pure function
//! of the task and the caller-supplied current time.

mod error;
mod ids;
mod status;
mod task;
mod transition;

pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::{TaskId, TaskTitle};
pub use status::{TaskPriority, TaskStatus};
pub use task::{PersistedTaskData, Task, TaskDraft, TaskPatch, is_overdue};
pub use transition::TransitionPolicy;
