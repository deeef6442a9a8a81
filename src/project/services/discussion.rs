//! Service layer for project discussion threads.

use crate::{
    WriteLock,
    notification::{domain::LifecycleEvent, services::NotificationDeriver},
    project::domain::{Discussion, DiscussionId, ProjectDomainError, ProjectId, UserId},
    session::Session,
    store::ports::{EntityStore, StoreError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for discussion operations.
#[derive(Debug, Clone, Error)]
pub enum DiscussionServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),

    /// The session carries no acting user, so there is no author.
    #[error("posting requires a signed-in user")]
    AnonymousSession,

    /// The acting user is not registered.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// The project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The discussion does not exist.
    #[error("discussion not found: {0}")]
    DiscussionNotFound(DiscussionId),

    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DiscussionServiceError {
    /// Returns `true` for rejected input.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Domain(_) | Self::AnonymousSession)
    }

    /// Returns `true` for unknown-identifier failures.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_) | Self::ProjectNotFound(_) | Self::DiscussionNotFound(_)
        )
    }
}

/// Result type for discussion service operations.
pub type DiscussionServiceResult<T> = Result<T, DiscussionServiceError>;

/// Discussion thread orchestration service.
pub struct DiscussionService<S, C>
where
    S: EntityStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    notifier: NotificationDeriver<S, C>,
    write_lock: WriteLock,
}

impl<S, C> Clone for DiscussionService<S, C>
where
    S: EntityStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
            notifier: self.notifier.clone(),
            write_lock: Arc::clone(&self.write_lock),
        }
    }
}

impl<S, C> DiscussionService<S, C>
where
    S: EntityStore,
    C: Clock + Send + Sync,
{
    /// Creates a new discussion service.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            notifier: NotificationDeriver::new(Arc::clone(&store), Arc::clone(&clock)),
            store,
            clock,
            write_lock: WriteLock::default(),
        }
    }

    pub(crate) fn sharing_write_lock(mut self, write_lock: WriteLock) -> Self {
        self.write_lock = write_lock;
        self
    }

    /// Opens a discussion thread authored by the session's user.
    ///
    /// # Errors
    ///
    /// Returns [`DiscussionServiceError`] for an anonymous session, blank
    /// input or unknown identifiers.
    pub async fn start_discussion(
        &self,
        session: &Session,
        project_id: ProjectId,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> DiscussionServiceResult<Discussion> {
        let author = self.require_author(session).await?;
        let _guard = self.write_lock.lock().await;
        if self.store.get_project(project_id).await?.is_none() {
            return Err(DiscussionServiceError::ProjectNotFound(project_id));
        }

        let discussion = Discussion::start(project_id, author, title, content, &*self.clock)?;
        self.store.upsert(discussion.clone().into()).await?;
        tracing::debug!(discussion_id = %discussion.id(), %project_id, "started discussion");
        Ok(discussion)
    }

    /// Appends a reply by the session's user and notifies the thread.
    ///
    /// # Errors
    ///
    /// Returns [`DiscussionServiceError`] for an anonymous session, a blank
    /// reply or an unknown discussion.
    pub async fn add_reply(
        &self,
        session: &Session,
        discussion_id: DiscussionId,
        content: impl Into<String>,
    ) -> DiscussionServiceResult<Discussion> {
        let author = self.require_author(session).await?;
        let _guard = self.write_lock.lock().await;
        let mut discussion = self
            .store
            .get_discussion(discussion_id)
            .await?
            .ok_or(DiscussionServiceError::DiscussionNotFound(discussion_id))?;

        discussion.add_reply(author, content, &*self.clock)?;
        self.store.upsert(discussion.clone().into()).await?;
        self.notifier
            .emit(
                LifecycleEvent::DiscussionReplied {
                    discussion_id,
                    author,
                },
                session,
            )
            .await;
        Ok(discussion)
    }

    /// Returns the project's discussions in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`DiscussionServiceError::Store`] when the listing fails.
    pub async fn list_for_project(
        &self,
        project_id: ProjectId,
    ) -> DiscussionServiceResult<Vec<Discussion>> {
        Ok(self.store.list_discussions_by_project(project_id).await?)
    }

    async fn require_author(&self, session: &Session) -> DiscussionServiceResult<UserId> {
        let actor = session
            .actor()
            .ok_or(DiscussionServiceError::AnonymousSession)?;
        if self.store.get_user(actor).await?.is_none() {
            return Err(DiscussionServiceError::UserNotFound(actor));
        }
        Ok(actor)
    }
}
