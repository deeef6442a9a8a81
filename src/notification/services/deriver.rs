//! Turns lifecycle events into stored notifications.
//!
//! Emission is best-effort: [`NotificationDeriver::emit`] logs and swallows
//! every failure so a broken notification never fails the mutation that
//! triggered it.

use crate::{
    notification::domain::{LifecycleEvent, Notification, NotificationKind, RelatedEntity},
    notification::services::NotificationError,
    project::domain::UserId,
    session::Session,
    store::ports::EntityStore,
};
use mockable::Clock;
use std::sync::Arc;

/// Builds notification records from lifecycle events.
pub struct NotificationDeriver<S, C>
where
    S: EntityStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> Clone for NotificationDeriver<S, C>
where
    S: EntityStore,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S, C> NotificationDeriver<S, C>
where
    S: EntityStore,
    C: Clock + Send + Sync,
{
    /// Creates a deriver writing into `store`.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Derives and stores the notification for `event`, logging and
    /// discarding any failure.
    pub async fn emit(&self, event: LifecycleEvent, session: &Session) -> Option<Notification> {
        match self.derive(event, session).await {
            Ok(notification) => {
                tracing::debug!(
                    notification_id = %notification.id(),
                    kind = %notification.kind(),
                    "emitted notification"
                );
                Some(notification)
            }
            Err(err) => {
                tracing::warn!(error = %err, ?event, "dropped notification");
                None
            }
        }
    }

    /// Derives and stores the notification for `event`.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError`] when a referenced entity is missing or
    /// the store rejects the record.
    pub async fn derive(
        &self,
        event: LifecycleEvent,
        session: &Session,
    ) -> Result<Notification, NotificationError> {
        let notification = self.build(event, session).await?;
        self.store.upsert(notification.clone().into()).await?;
        Ok(notification)
    }

    async fn build(
        &self,
        event: LifecycleEvent,
        session: &Session,
    ) -> Result<Notification, NotificationError> {
        let clock = &*self.clock;
        match event {
            LifecycleEvent::TaskAssigned { task_id, assignee } => {
                let task = self
                    .store
                    .get_task(task_id)
                    .await?
                    .ok_or(NotificationError::TaskNotFound(task_id))?;
                self.require_user_name(assignee).await?;
                let assigner = match session.actor().filter(|actor| *actor != assignee) {
                    Some(actor) => self.user_name(actor).await?,
                    None => None,
                };
                let message = assigner.map_or_else(
                    || format!("You have been assigned to \"{}\"", task.title()),
                    |name| format!("{name} assigned you to \"{}\"", task.title()),
                );
                Ok(Notification::new(
                    NotificationKind::TaskAssigned,
                    "New Task Assigned",
                    message,
                    Some(RelatedEntity::Task(task_id)),
                    clock,
                ))
            }
            LifecycleEvent::TaskCompleted { task_id } => {
                let task = self
                    .store
                    .get_task(task_id)
                    .await?
                    .ok_or(NotificationError::TaskNotFound(task_id))?;
                let mut completer = None;
                for candidate in [session.actor(), task.assignee()].into_iter().flatten() {
                    completer = self.user_name(candidate).await?;
                    if completer.is_some() {
                        break;
                    }
                }
                let who = completer.unwrap_or_else(|| "Someone".to_owned());
                Ok(Notification::new(
                    NotificationKind::TaskCompleted,
                    "Task Completed",
                    format!("{who} completed \"{}\"", task.title()),
                    Some(RelatedEntity::Task(task_id)),
                    clock,
                ))
            }
            LifecycleEvent::DiscussionReplied {
                discussion_id,
                author,
            } => {
                let discussion = self
                    .store
                    .get_discussion(discussion_id)
                    .await?
                    .ok_or(NotificationError::DiscussionNotFound(discussion_id))?;
                let name = self.require_user_name(author).await?;
                Ok(Notification::new(
                    NotificationKind::DiscussionReply,
                    "New Discussion Reply",
                    format!("{name} replied to \"{}\"", discussion.title()),
                    Some(RelatedEntity::Discussion(discussion_id)),
                    clock,
                ))
            }
            LifecycleEvent::ProjectThresholdCrossed {
                project_id,
                threshold,
            } => {
                let project = self
                    .store
                    .get_project(project_id)
                    .await?
                    .ok_or(NotificationError::ProjectNotFound(project_id))?;
                Ok(Notification::new(
                    NotificationKind::ProjectUpdate,
                    "Project Update",
                    format!("{} has reached {threshold}% completion", project.name()),
                    Some(RelatedEntity::Project(project_id)),
                    clock,
                ))
            }
        }
    }

    async fn user_name(&self, user_id: UserId) -> Result<Option<String>, NotificationError> {
        Ok(self
            .store
            .get_user(user_id)
            .await?
            .map(|user| user.name().to_owned()))
    }

    async fn require_user_name(&self, user_id: UserId) -> Result<String, NotificationError> {
        self.user_name(user_id)
            .await?
            .ok_or(NotificationError::UserNotFound(user_id))
    }
}
