//! State-change events consumed by the notification deriver.

use crate::{
    project::domain::{DiscussionId, ProjectId, UserId},
    task::domain::TaskId,
};

/// A lifecycle change worth telling someone about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// A task gained a new assignee, on creation or by update.
    TaskAssigned {
        /// Task that was assigned.
        task_id: TaskId,
        /// User now responsible for it.
        assignee: UserId,
    },
    /// A task entered the done column from another column.
    TaskCompleted {
        /// Task that was completed.
        task_id: TaskId,
    },
    /// A reply was appended to a discussion thread.
    DiscussionReplied {
        /// Thread that received the reply.
        discussion_id: DiscussionId,
        /// Author of the reply.
        author: UserId,
    },
    /// A project's progress rose past a configured milestone.
    ProjectThresholdCrossed {
        /// Project whose progress changed.
        project_id: ProjectId,
        /// Milestone percentage that was reached.
        threshold: u8,
    },
}
