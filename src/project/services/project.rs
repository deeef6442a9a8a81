//! Service layer for user registration and project creation.

use crate::{
    WriteLock,
    project::domain::{
        DEFAULT_PROJECT_COLOR, Project, ProjectDomainError, ProjectDraft, ProjectId, User, UserId,
    },
    store::ports::{EntityStore, StoreError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for registering a team member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    name: String,
    email: String,
    avatar: Option<String>,
    role: Option<String>,
}

impl RegisterUserRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            avatar: None,
            role: None,
        }
    }

    /// Sets the avatar glyph.
    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// Sets the role label.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    name: String,
    description: String,
    color: String,
    members: Vec<UserId>,
}

impl CreateProjectRequest {
    /// Creates a request with a name and the default colour theme.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            color: DEFAULT_PROJECT_COLOR.to_owned(),
            members: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the colour theme token.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Sets the initial members in display order.
    #[must_use]
    pub fn with_members(mut self, members: impl IntoIterator<Item = UserId>) -> Self {
        self.members = members.into_iter().collect();
        self
    }
}

/// Service-level errors for user and project operations.
#[derive(Debug, Clone, Error)]
pub enum ProjectServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),

    /// The project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// A referenced user does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ProjectServiceError {
    /// Returns `true` for rejected input.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Domain(_))
    }

    /// Returns `true` for unknown-identifier failures.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::ProjectNotFound(_) | Self::UserNotFound(_))
    }
}

/// Result type for project service operations.
pub type ProjectServiceResult<T> = Result<T, ProjectServiceError>;

/// User and project orchestration service.
pub struct ProjectService<S, C>
where
    S: EntityStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    write_lock: WriteLock,
}

impl<S, C> Clone for ProjectService<S, C>
where
    S: EntityStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
            write_lock: Arc::clone(&self.write_lock),
        }
    }
}

impl<S, C> ProjectService<S, C>
where
    S: EntityStore,
    C: Clock + Send + Sync,
{
    /// Creates a new project service.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            store,
            clock,
            write_lock: WriteLock::default(),
        }
    }

    pub(crate) fn sharing_write_lock(mut self, write_lock: WriteLock) -> Self {
        self.write_lock = write_lock;
        self
    }

    /// Registers a new team member.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Domain`] for a blank name or malformed
    /// email.
    pub async fn register_user(&self, request: RegisterUserRequest) -> ProjectServiceResult<User> {
        let RegisterUserRequest {
            name,
            email,
            avatar,
            role,
        } = request;

        let mut user = User::new(name, email)?;
        if let Some(glyph) = avatar {
            user = user.with_avatar(glyph);
        }
        if let Some(label) = role {
            user = user.with_role(label);
        }

        let _guard = self.write_lock.lock().await;
        self.store.upsert(user.clone().into()).await?;
        tracing::debug!(user_id = %user.id(), "registered user");
        Ok(user)
    }

    /// Creates a project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Domain`] for a blank name and
    /// [`ProjectServiceError::UserNotFound`] when a member is unknown.
    pub async fn create_project(
        &self,
        request: CreateProjectRequest,
    ) -> ProjectServiceResult<Project> {
        let CreateProjectRequest {
            name,
            description,
            color,
            members,
        } = request;

        let _guard = self.write_lock.lock().await;
        for member in &members {
            self.require_user(*member).await?;
        }

        let project = Project::new(
            ProjectDraft {
                name,
                description,
                color,
                members,
            },
            &*self.clock,
        )?;
        self.store.upsert(project.clone().into()).await?;
        tracing::debug!(project_id = %project.id(), name = project.name(), "created project");
        Ok(project)
    }

    /// Adds a user to the project roster; a no-op for existing members.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::ProjectNotFound`] or
    /// [`ProjectServiceError::UserNotFound`] for unknown identifiers.
    pub async fn add_member(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> ProjectServiceResult<Project> {
        let _guard = self.write_lock.lock().await;
        let mut project = self
            .store
            .get_project(project_id)
            .await?
            .ok_or(ProjectServiceError::ProjectNotFound(project_id))?;
        self.require_user(user_id).await?;

        if project.add_member(user_id, &*self.clock) {
            self.store.upsert(project.clone().into()).await?;
        }
        Ok(project)
    }

    /// Finds a project by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Store`] when the lookup fails.
    pub async fn get_project(&self, project_id: ProjectId) -> ProjectServiceResult<Option<Project>> {
        Ok(self.store.get_project(project_id).await?)
    }

    /// Returns every project in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Store`] when the listing fails.
    pub async fn list_projects(&self) -> ProjectServiceResult<Vec<Project>> {
        Ok(self.store.list_projects().await?)
    }

    /// Finds a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Store`] when the lookup fails.
    pub async fn get_user(&self, user_id: UserId) -> ProjectServiceResult<Option<User>> {
        Ok(self.store.get_user(user_id).await?)
    }

    async fn require_user(&self, user_id: UserId) -> ProjectServiceResult<User> {
        self.store
            .get_user(user_id)
            .await?
            .ok_or(ProjectServiceError::UserNotFound(user_id))
    }
}
