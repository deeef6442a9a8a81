//! Task aggregate root, its creation draft and partial-update patch.

use super::{TaskDomainError, TaskId, TaskPriority, TaskStatus, TaskTitle, TransitionPolicy};
use crate::project::domain::{ProjectId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    title: TaskTitle,
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    assignee: Option<UserId>,
    due_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Input for a brand-new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Owning project.
    pub project_id: ProjectId,
    /// Validated title.
    pub title: TaskTitle,
    /// Optional long-form description.
    pub description: Option<String>,
    /// Initial board column.
    pub status: TaskStatus,
    /// Initial priority.
    pub priority: TaskPriority,
    /// Initial assignee.
    pub assignee: Option<UserId>,
    /// Optional deadline.
    pub due_date: Option<DateTime<Utc>>,
}

impl TaskDraft {
    /// Creates a draft with default status and priority.
    #[must_use]
    pub fn new(project_id: ProjectId, title: TaskTitle) -> Self {
        Self {
            project_id,
            title,
            description: None,
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            assignee: None,
            due_date: None,
        }
    }
}

/// Parameter object for reconstructing a stored task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Stored task identifier.
    pub id: TaskId,
    /// Stored owning project.
    pub project_id: ProjectId,
    /// Stored title.
    pub title: TaskTitle,
    /// Stored description.
    pub description: Option<String>,
    /// Stored status.
    pub status: TaskStatus,
    /// Stored priority.
    pub priority: TaskPriority,
    /// Stored assignee.
    pub assignee: Option<UserId>,
    /// Stored deadline.
    pub due_date: Option<DateTime<Utc>>,
    /// Stored creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Stored latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Partial update applied by [`Task::apply_patch`].
///
/// Outer `None` leaves a field unchanged; for optional fields an inner `None`
/// clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    title: Option<String>,
    description: Option<Option<String>>,
    priority: Option<TaskPriority>,
    assignee: Option<Option<UserId>>,
    due_date: Option<Option<DateTime<Utc>>>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces or clears the description.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces or clears the assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: Option<UserId>) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Replaces or clears the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Option<DateTime<Utc>>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Returns the assignee this patch would set, if it touches the assignee.
    #[must_use]
    pub const fn assignee(&self) -> Option<Option<UserId>> {
        self.assignee
    }
}

impl Task {
    /// Creates a new task from a draft, stamping both timestamps with now.
    #[must_use]
    pub fn from_draft(draft: TaskDraft, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            project_id: draft.project_id,
            title: draft.title,
            description: normalize_description(draft.description),
            status: draft.status,
            priority: draft.priority,
            assignee: draft.assignee,
            due_date: draft.due_date,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from stored data.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            assignee: data.assignee,
            due_date: data.due_date,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the board column.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<UserId> {
        self.assignee
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` when the deadline has passed and the task is not done.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        is_overdue(self, now)
    }

    /// Moves the task to `target` and returns the previous status.
    ///
    /// Re-applying the current status is accepted and still refreshes
    /// `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TransitionNotAllowed`] when `policy`
    /// forbids the move; the task is left untouched.
    pub fn transition_to(
        &mut self,
        target: TaskStatus,
        policy: &TransitionPolicy,
        clock: &impl Clock,
    ) -> Result<TaskStatus, TaskDomainError> {
        let previous = self.status;
        if !policy.permits(previous, target) {
            return Err(TaskDomainError::TransitionNotAllowed {
                task_id: self.id,
                from: previous,
                to: target,
            });
        }
        self.status = target;
        self.touch(clock);
        Ok(previous)
    }

    /// Applies a partial update.
    ///
    /// Returns the new assignee when the patch changed the assignee to a
    /// different, non-empty user.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the patch carries a blank
    /// title; no field is modified in that case.
    pub fn apply_patch(
        &mut self,
        patch: TaskPatch,
        clock: &impl Clock,
    ) -> Result<Option<UserId>, TaskDomainError> {
        let TaskPatch {
            title,
            description,
            priority,
            assignee,
            due_date,
        } = patch;

        let validated_title = title.map(TaskTitle::new).transpose()?;

        if let Some(new_title) = validated_title {
            self.title = new_title;
        }
        if let Some(new_description) = description {
            self.description = normalize_description(new_description);
        }
        if let Some(new_priority) = priority {
            self.priority = new_priority;
        }
        if let Some(new_due_date) = due_date {
            self.due_date = new_due_date;
        }

        let mut newly_assigned = None;
        if let Some(new_assignee) = assignee {
            if new_assignee.is_some() && new_assignee != self.assignee {
                newly_assigned = new_assignee;
            }
            self.assignee = new_assignee;
        }

        self.touch(clock);
        Ok(newly_assigned)
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

/// Returns `true` iff `task` has a due date strictly before `now` and is not
/// done.
#[must_use]
pub fn is_overdue(task: &Task, now: DateTime<Utc>) -> bool {
    !task.status.is_done() && task.due_date.is_some_and(|due| due < now)
}

/// Blank descriptions are stored as absent.
fn normalize_description(description: Option<String>) -> Option<String> {
    description.filter(|text| !text.trim().is_empty())
}
