//! Read-side project statistics.
//!
//! Every query recomputes from the live task and discussion collections at
//! call time; nothing is cached, so totals can never drift from the tasks
//! they summarise.

use crate::{
    project::domain::{Project, ProjectId, User},
    session::Session,
    store::ports::{EntityStore, StoreError},
    task::domain::{Task, TaskStatus, is_overdue},
};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use thiserror::Error;

/// Errors returned by aggregate queries.
#[derive(Debug, Clone, Error)]
pub enum AggregateError {
    /// The project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// Store lookup failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AggregateError {
    /// Returns `true` for unknown-identifier failures.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::ProjectNotFound(_))
    }
}

/// Result type for aggregate queries.
pub type AggregateResult<T> = Result<T, AggregateError>;

/// Task count per board column. All four columns are always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCounts(BTreeMap<TaskStatus, usize>);

impl StatusCounts {
    /// Tallies the given tasks by status.
    #[must_use]
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut counts: BTreeMap<TaskStatus, usize> =
            TaskStatus::ALL.into_iter().map(|status| (status, 0)).collect();
        for task in tasks {
            *counts.entry(task.status()).or_default() += 1;
        }
        Self(counts)
    }

    /// Returns the count for one column.
    #[must_use]
    pub fn get(&self, status: TaskStatus) -> usize {
        self.0.get(&status).copied().unwrap_or_default()
    }

    /// Returns the number of tasks across all columns.
    #[must_use]
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    /// Iterates columns in board order.
    pub fn iter(&self) -> impl Iterator<Item = (TaskStatus, usize)> + '_ {
        self.0.iter().map(|(status, count)| (*status, *count))
    }
}

/// Rounded completion percentage, `0` for a project without tasks.
///
/// Halves round up, so one done task out of eight reports 13%.
#[must_use]
pub fn completion_percentage(completed: usize, total: usize) -> u8 {
    let doubled_total = total.saturating_mul(2);
    let numerator = completed.saturating_mul(200).saturating_add(total);
    let percentage = numerator.checked_div(doubled_total).unwrap_or(0);
    u8::try_from(percentage.min(100)).unwrap_or(100)
}

/// Everything a project card or header needs, computed in one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    /// The project record.
    pub project: Project,
    /// Number of tasks in the project.
    pub total_tasks: usize,
    /// Number of done tasks.
    pub completed_tasks: usize,
    /// Rounded completion percentage.
    pub progress_percentage: u8,
    /// Tasks per column.
    pub counts_by_status: StatusCounts,
    /// Roster size.
    pub member_count: usize,
    /// Number of discussion threads.
    pub discussion_count: usize,
}

/// Workspace-wide figures for the dashboard header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardSummary {
    /// Number of projects.
    pub active_projects: usize,
    /// Distinct users across all rosters.
    pub team_members: usize,
    /// Tasks across all projects.
    pub total_tasks: usize,
    /// Done tasks across all projects.
    pub completed_tasks: usize,
    /// Tasks not yet done.
    pub remaining_tasks: usize,
    /// Tasks assigned to the session's user.
    pub my_tasks: usize,
}

/// Pure read path over the entity store.
pub struct ProjectAggregator<S>
where
    S: EntityStore,
{
    store: Arc<S>,
}

impl<S> Clone for ProjectAggregator<S>
where
    S: EntityStore,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> ProjectAggregator<S>
where
    S: EntityStore,
{
    /// Creates an aggregator over `store`.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    async fn require_project(&self, project_id: ProjectId) -> AggregateResult<Project> {
        self.store
            .get_project(project_id)
            .await?
            .ok_or(AggregateError::ProjectNotFound(project_id))
    }

    async fn project_tasks(&self, project_id: ProjectId) -> AggregateResult<Vec<Task>> {
        self.require_project(project_id).await?;
        Ok(self.store.list_tasks_by_project(project_id).await?)
    }

    /// Returns `round(100 * done / total)`, or `0` when the project has no
    /// tasks.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::ProjectNotFound`] for an unknown project.
    pub async fn progress_percentage(&self, project_id: ProjectId) -> AggregateResult<u8> {
        let counts = self.counts_by_status(project_id).await?;
        Ok(completion_percentage(
            counts.get(TaskStatus::Done),
            counts.total(),
        ))
    }

    /// Returns task counts for all four columns.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::ProjectNotFound`] for an unknown project.
    pub async fn counts_by_status(&self, project_id: ProjectId) -> AggregateResult<StatusCounts> {
        let tasks = self.project_tasks(project_id).await?;
        Ok(StatusCounts::from_tasks(&tasks))
    }

    /// Returns the project's members in display order.
    ///
    /// Members whose user record is missing are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::ProjectNotFound`] for an unknown project.
    pub async fn team_roster(&self, project_id: ProjectId) -> AggregateResult<Vec<User>> {
        let project = self.require_project(project_id).await?;
        let mut roster = Vec::with_capacity(project.members().len());
        for member in project.members() {
            if let Some(user) = self.store.get_user(*member).await? {
                roster.push(user);
            }
        }
        Ok(roster)
    }

    /// Returns the number of discussion threads in the project.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::ProjectNotFound`] for an unknown project.
    pub async fn discussion_count(&self, project_id: ProjectId) -> AggregateResult<usize> {
        self.require_project(project_id).await?;
        Ok(self
            .store
            .list_discussions_by_project(project_id)
            .await?
            .len())
    }

    /// Returns the tasks in one board column, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::ProjectNotFound`] for an unknown project.
    pub async fn tasks_in_column(
        &self,
        project_id: ProjectId,
        status: TaskStatus,
    ) -> AggregateResult<Vec<Task>> {
        let tasks = self.project_tasks(project_id).await?;
        Ok(tasks
            .into_iter()
            .filter(|task| task.status() == status)
            .collect())
    }

    /// Returns the project's overdue tasks as of `now`.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::ProjectNotFound`] for an unknown project.
    pub async fn overdue_tasks(
        &self,
        project_id: ProjectId,
        now: DateTime<Utc>,
    ) -> AggregateResult<Vec<Task>> {
        let tasks = self.project_tasks(project_id).await?;
        Ok(tasks
            .into_iter()
            .filter(|task| is_overdue(task, now))
            .collect())
    }

    /// Returns the full card summary for one project.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::ProjectNotFound`] for an unknown project.
    pub async fn summary(&self, project_id: ProjectId) -> AggregateResult<ProjectSummary> {
        let project = self.require_project(project_id).await?;
        let tasks = self.store.list_tasks_by_project(project_id).await?;
        let discussion_count = self
            .store
            .list_discussions_by_project(project_id)
            .await?
            .len();

        let counts_by_status = StatusCounts::from_tasks(&tasks);
        let total_tasks = counts_by_status.total();
        let completed_tasks = counts_by_status.get(TaskStatus::Done);

        Ok(ProjectSummary {
            member_count: project.members().len(),
            project,
            total_tasks,
            completed_tasks,
            progress_percentage: completion_percentage(completed_tasks, total_tasks),
            counts_by_status,
            discussion_count,
        })
    }

    /// Returns workspace-wide figures, counting "my tasks" for the session's
    /// user.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::Store`] when a listing fails.
    pub async fn dashboard(&self, session: &Session) -> AggregateResult<DashboardSummary> {
        let projects = self.store.list_projects().await?;
        let tasks = self.store.list_tasks().await?;

        let team_members = projects
            .iter()
            .flat_map(|project| project.members().iter().copied())
            .collect::<BTreeSet<_>>()
            .len();
        let completed_tasks = tasks.iter().filter(|task| task.status().is_done()).count();
        let my_tasks = session.actor().map_or(0, |actor| {
            tasks
                .iter()
                .filter(|task| task.assignee() == Some(actor))
                .count()
        });

        Ok(DashboardSummary {
            active_projects: projects.len(),
            team_members,
            total_tasks: tasks.len(),
            completed_tasks,
            remaining_tasks: tasks.len().saturating_sub(completed_tasks),
            my_tasks,
        })
    }
}
