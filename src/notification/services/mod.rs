//! Application services for notifications.

mod deriver;
mod inbox;

pub use deriver::NotificationDeriver;
pub use inbox::NotificationInbox;

use crate::{
    notification::domain::NotificationId,
    project::domain::{DiscussionId, ProjectId, UserId},
    store::ports::StoreError,
    task::domain::TaskId,
};
use thiserror::Error;

/// Errors raised while deriving or reading notifications.
#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    /// The notification does not exist.
    #[error("notification not found: {0}")]
    NotFound(NotificationId),

    /// The triggering task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// A referenced user does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// The triggering discussion does not exist.
    #[error("discussion not found: {0}")]
    DiscussionNotFound(DiscussionId),

    /// The triggering project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl NotificationError {
    /// Returns `true` for unknown-identifier failures.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        !matches!(self, Self::Store(_))
    }
}
