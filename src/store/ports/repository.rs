//! Entity store port: canonical collections of every domain record.

use crate::{
    notification::domain::{Notification, NotificationId},
    project::domain::{Discussion, DiscussionId, Project, ProjectId, User, UserId},
    task::domain::{Task, TaskId},
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for entity store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Any record the store can hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    /// A team member.
    User(User),
    /// A project.
    Project(Project),
    /// A task.
    Task(Task),
    /// A discussion thread.
    Discussion(Discussion),
    /// A notification.
    Notification(Notification),
}

impl From<User> for Entity {
    fn from(value: User) -> Self {
        Self::User(value)
    }
}

impl From<Project> for Entity {
    fn from(value: Project) -> Self {
        Self::Project(value)
    }
}

impl From<Task> for Entity {
    fn from(value: Task) -> Self {
        Self::Task(value)
    }
}

impl From<Discussion> for Entity {
    fn from(value: Discussion) -> Self {
        Self::Discussion(value)
    }
}

impl From<Notification> for Entity {
    fn from(value: Notification) -> Self {
        Self::Notification(value)
    }
}

/// Authoritative storage contract.
///
/// Every read returns owned copies; mutating a returned record never changes
/// the store. Listings preserve insertion order.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Inserts a record or replaces the one with the same identifier.
    ///
    /// Timestamps are the caller's responsibility.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DanglingProject`] when a task or discussion
    /// references a project the store does not hold.
    async fn upsert(&self, entity: Entity) -> StoreResult<()>;

    /// Finds a user by identifier.
    async fn get_user(&self, id: UserId) -> StoreResult<Option<User>>;

    /// Finds a project by identifier.
    async fn get_project(&self, id: ProjectId) -> StoreResult<Option<Project>>;

    /// Finds a task by identifier.
    async fn get_task(&self, id: TaskId) -> StoreResult<Option<Task>>;

    /// Finds a discussion by identifier.
    async fn get_discussion(&self, id: DiscussionId) -> StoreResult<Option<Discussion>>;

    /// Finds a notification by identifier.
    async fn get_notification(&self, id: NotificationId) -> StoreResult<Option<Notification>>;

    /// Returns every project in insertion order.
    async fn list_projects(&self) -> StoreResult<Vec<Project>>;

    /// Returns every task in insertion order.
    async fn list_tasks(&self) -> StoreResult<Vec<Task>>;

    /// Returns the tasks of one project in insertion order.
    ///
    /// An unknown project yields an empty list.
    async fn list_tasks_by_project(&self, project_id: ProjectId) -> StoreResult<Vec<Task>>;

    /// Returns the discussions of one project in insertion order.
    async fn list_discussions_by_project(
        &self,
        project_id: ProjectId,
    ) -> StoreResult<Vec<Discussion>>;

    /// Returns every notification in insertion order.
    async fn list_notifications(&self) -> StoreResult<Vec<Notification>>;
}

/// Errors returned by entity store implementations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// A task or discussion references a project that is not stored.
    #[error("referenced project does not exist: {0}")]
    DanglingProject(ProjectId),

    /// Storage-layer failure.
    #[error("storage error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wraps a storage error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
