//! Service layer for task creation, status changes and field updates.

use crate::{
    WriteLock,
    config::EngineConfig,
    notification::{domain::LifecycleEvent, services::NotificationDeriver},
    project::{
        domain::{ProjectId, UserId},
        services::ProjectAggregator,
    },
    session::Session,
    store::ports::{EntityStore, StoreError},
    task::domain::{
        ParseTaskStatusError, Task, TaskDomainError, TaskDraft, TaskId, TaskPatch, TaskPriority,
        TaskStatus, TaskTitle,
    },
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    project_id: ProjectId,
    title: String,
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    assignee: Option<UserId>,
    due_date: Option<DateTime<Utc>>,
}

impl CreateTaskRequest {
    /// Creates a request in the `todo` column with `medium` priority.
    #[must_use]
    pub fn new(project_id: ProjectId, title: impl Into<String>) -> Self {
        Self {
            project_id,
            title: title.into(),
            description: None,
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            assignee: None,
            due_date: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial column.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Sets the deadline.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Clone, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The requested status string is not a known column.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),

    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The assignee does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl TaskLifecycleError {
    /// Returns `true` for rejected input, including an unknown project on
    /// creation.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Domain(_) | Self::InvalidStatus(_))
    }

    /// Returns `true` for unknown task, user or project identifiers.
    ///
    /// An unknown project on creation is both a validation failure and a
    /// missing reference.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::TaskNotFound(_)
                | Self::UserNotFound(_)
                | Self::Domain(TaskDomainError::UnknownProject(_))
        )
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// Mutations are serialised through a write lock held across their
/// read-modify-write, and each one may append advisory notifications.
pub struct TaskLifecycleService<S, C>
where
    S: EntityStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    config: Arc<EngineConfig>,
    aggregator: ProjectAggregator<S>,
    notifier: NotificationDeriver<S, C>,
    write_lock: WriteLock,
}

impl<S, C> Clone for TaskLifecycleService<S, C>
where
    S: EntityStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
            config: Arc::clone(&self.config),
            aggregator: self.aggregator.clone(),
            notifier: self.notifier.clone(),
            write_lock: Arc::clone(&self.write_lock),
        }
    }
}

impl<S, C> TaskLifecycleService<S, C>
where
    S: EntityStore,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service with the default configuration.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            aggregator: ProjectAggregator::new(Arc::clone(&store)),
            notifier: NotificationDeriver::new(Arc::clone(&store), Arc::clone(&clock)),
            store,
            clock,
            config: Arc::new(EngineConfig::default()),
            write_lock: WriteLock::default(),
        }
    }

    /// Replaces the engine configuration.
    #[must_use]
    pub fn with_config(mut self, config: Arc<EngineConfig>) -> Self {
        self.config = config;
        self
    }

    pub(crate) fn sharing_write_lock(mut self, write_lock: WriteLock) -> Self {
        self.write_lock = write_lock;
        self
    }

    /// Creates a task in an existing project.
    ///
    /// Emits `task_assigned` when the task starts with an assignee.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] or
    /// [`TaskDomainError::UnknownProject`] (both validation failures), or
    /// [`TaskLifecycleError::UserNotFound`] for an unknown assignee. The
    /// store is unchanged on failure.
    pub async fn create_task(
        &self,
        session: &Session,
        request: CreateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let CreateTaskRequest {
            project_id,
            title,
            description,
            status,
            priority,
            assignee,
            due_date,
        } = request;

        let validated_title = TaskTitle::new(title)?;

        let _guard = self.write_lock.lock().await;
        if self.store.get_project(project_id).await?.is_none() {
            return Err(TaskDomainError::UnknownProject(project_id).into());
        }
        if let Some(user_id) = assignee {
            self.require_user(user_id).await?;
        }

        let progress_before = self.progress_snapshot(project_id).await;
        let task = Task::from_draft(
            TaskDraft {
                description,
                status,
                priority,
                assignee,
                due_date,
                ..TaskDraft::new(project_id, validated_title)
            },
            &*self.clock,
        );
        self.store.upsert(task.clone().into()).await?;
        tracing::debug!(task_id = %task.id(), %project_id, status = %task.status(), "created task");

        if let Some(user_id) = task.assignee() {
            self.notifier
                .emit(
                    LifecycleEvent::TaskAssigned {
                        task_id: task.id(),
                        assignee: user_id,
                    },
                    session,
                )
                .await;
        }
        self.notify_progress(project_id, progress_before, session)
            .await;
        Ok(task)
    }

    /// Moves a task to `status`.
    ///
    /// Always refreshes `updated_at`, even when the status is unchanged.
    /// Emits `task_completed` when the task enters `done` from another
    /// column, and `project_update` when project progress rises past a
    /// configured milestone.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] for an unknown task and
    /// [`TaskDomainError::TransitionNotAllowed`] when a restricted policy
    /// forbids the move.
    pub async fn change_status(
        &self,
        session: &Session,
        task_id: TaskId,
        status: TaskStatus,
    ) -> TaskLifecycleResult<Task> {
        let _guard = self.write_lock.lock().await;
        let mut task = self.require_task(task_id).await?;
        let project_id = task.project_id();
        let progress_before = self.progress_snapshot(project_id).await;

        let previous = task.transition_to(status, &self.config.transitions, &*self.clock)?;
        self.store.upsert(task.clone().into()).await?;
        tracing::debug!(%task_id, from = %previous, to = %status, "changed task status");

        if status.is_done() && !previous.is_done() {
            self.notifier
                .emit(LifecycleEvent::TaskCompleted { task_id }, session)
                .await;
        }
        self.notify_progress(project_id, progress_before, session)
            .await;
        Ok(task)
    }

    /// Moves a task to the column named by `status`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::InvalidStatus`] for an unknown column
    /// name, otherwise as [`Self::change_status`].
    pub async fn change_status_str(
        &self,
        session: &Session,
        task_id: TaskId,
        status: &str,
    ) -> TaskLifecycleResult<Task> {
        let target = TaskStatus::try_from(status)?;
        self.change_status(session, task_id, target).await
    }

    /// Applies a partial update to a task.
    ///
    /// Emits `task_assigned` only when the assignee changes to a different
    /// user.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] for an unknown task,
    /// [`TaskLifecycleError::UserNotFound`] for an unknown assignee and
    /// [`TaskDomainError::EmptyTitle`] for a blank title. Nothing is applied
    /// on failure.
    pub async fn update_fields(
        &self,
        session: &Session,
        task_id: TaskId,
        patch: TaskPatch,
    ) -> TaskLifecycleResult<Task> {
        let _guard = self.write_lock.lock().await;
        let mut task = self.require_task(task_id).await?;
        if let Some(Some(user_id)) = patch.assignee() {
            self.require_user(user_id).await?;
        }

        let newly_assigned = task.apply_patch(patch, &*self.clock)?;
        self.store.upsert(task.clone().into()).await?;
        tracing::debug!(%task_id, "updated task fields");

        if let Some(assignee) = newly_assigned {
            self.notifier
                .emit(LifecycleEvent::TaskAssigned { task_id, assignee }, session)
                .await;
        }
        Ok(task)
    }

    /// Finds a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Store`] when the lookup fails.
    pub async fn get_task(&self, task_id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.store.get_task(task_id).await?)
    }

    /// Returns a project's tasks in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Store`] when the listing fails.
    pub async fn list_tasks_by_project(
        &self,
        project_id: ProjectId,
    ) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.store.list_tasks_by_project(project_id).await?)
    }

    async fn require_task(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.store
            .get_task(task_id)
            .await?
            .ok_or(TaskLifecycleError::TaskNotFound(task_id))
    }

    async fn require_user(&self, user_id: UserId) -> TaskLifecycleResult<()> {
        match self.store.get_user(user_id).await? {
            Some(_) => Ok(()),
            None => Err(TaskLifecycleError::UserNotFound(user_id)),
        }
    }

    /// Reads current progress for milestone detection; failures only log.
    async fn progress_snapshot(&self, project_id: ProjectId) -> Option<u8> {
        match self.aggregator.progress_percentage(project_id).await {
            Ok(percentage) => Some(percentage),
            Err(err) => {
                tracing::warn!(error = %err, %project_id, "progress unavailable for milestones");
                None
            }
        }
    }

    async fn notify_progress(
        &self,
        project_id: ProjectId,
        before: Option<u8>,
        session: &Session,
    ) {
        let Some(previous) = before else {
            return;
        };
        let Some(current) = self.progress_snapshot(project_id).await else {
            return;
        };
        if let Some(threshold) = self.config.highest_crossed_threshold(previous, current) {
            self.notifier
                .emit(
                    LifecycleEvent::ProjectThresholdCrossed {
                        project_id,
                        threshold,
                    },
                    session,
                )
                .await;
        }
    }
}
