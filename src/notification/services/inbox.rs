//! Read and acknowledge stored notifications.

use crate::{
    WriteLock,
    notification::domain::{Notification, NotificationId},
    notification::services::NotificationError,
    store::ports::EntityStore,
};
use std::cmp::Reverse;
use std::sync::Arc;

/// Header inbox over the stored notifications.
pub struct NotificationInbox<S>
where
    S: EntityStore,
{
    store: Arc<S>,
    write_lock: WriteLock,
}

impl<S> Clone for NotificationInbox<S>
where
    S: EntityStore,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            write_lock: Arc::clone(&self.write_lock),
        }
    }
}

impl<S> NotificationInbox<S>
where
    S: EntityStore,
{
    /// Creates an inbox over `store`.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            write_lock: WriteLock::default(),
        }
    }

    pub(crate) fn sharing_write_lock(mut self, write_lock: WriteLock) -> Self {
        self.write_lock = write_lock;
        self
    }

    /// Returns every notification, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::Store`] when the listing fails.
    pub async fn list(&self) -> Result<Vec<Notification>, NotificationError> {
        let mut notifications = self.store.list_notifications().await?;
        notifications.reverse();
        notifications.sort_by_key(|notification| Reverse(notification.created_at()));
        Ok(notifications)
    }

    /// Returns the number of unread notifications.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::Store`] when the listing fails.
    pub async fn unread_count(&self) -> Result<usize, NotificationError> {
        Ok(self
            .store
            .list_notifications()
            .await?
            .iter()
            .filter(|notification| !notification.is_read())
            .count())
    }

    /// Marks one notification as read and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::NotFound`] for an unknown identifier.
    pub async fn mark_read(&self, id: NotificationId) -> Result<Notification, NotificationError> {
        let _guard = self.write_lock.lock().await;
        let mut notification = self
            .store
            .get_notification(id)
            .await?
            .ok_or(NotificationError::NotFound(id))?;
        if notification.mark_read() {
            self.store.upsert(notification.clone().into()).await?;
        }
        Ok(notification)
    }

    /// Marks every notification as read and returns how many changed.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::Store`] when the store fails.
    pub async fn mark_all_read(&self) -> Result<usize, NotificationError> {
        let _guard = self.write_lock.lock().await;
        let mut changed = 0;
        for mut notification in self.store.list_notifications().await? {
            if notification.mark_read() {
                self.store.upsert(notification.into()).await?;
                changed += 1;
            }
        }
        Ok(changed)
    }
}
