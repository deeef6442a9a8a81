//! Notification records shown in the header inbox.

use super::NotificationId;
use crate::{
    project::domain::{DiscussionId, ProjectId},
    task::domain::TaskId,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A task was assigned to a user.
    TaskAssigned,
    /// A task reached the done column.
    TaskCompleted,
    /// A project crossed a completion milestone.
    ProjectUpdate,
    /// Someone replied in a discussion.
    DiscussionReply,
}

impl NotificationKind {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TaskAssigned => "task_assigned",
            Self::TaskCompleted => "task_completed",
            Self::ProjectUpdate => "project_update",
            Self::DiscussionReply => "discussion_reply",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entity that triggered a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum RelatedEntity {
    /// A task.
    Task(TaskId),
    /// A discussion thread.
    Discussion(DiscussionId),
    /// A project.
    Project(ProjectId),
}

/// Advisory notification record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    id: NotificationId,
    kind: NotificationKind,
    title: String,
    message: String,
    read: bool,
    created_at: DateTime<Utc>,
    related: Option<RelatedEntity>,
}

/// Parameter object for reconstructing a stored notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedNotificationData {
    /// Stored identifier.
    pub id: NotificationId,
    /// Stored category.
    pub kind: NotificationKind,
    /// Stored headline.
    pub title: String,
    /// Stored body text.
    pub message: String,
    /// Whether the notification has been read.
    pub read: bool,
    /// Stored creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Triggering entity, if any.
    pub related: Option<RelatedEntity>,
}

impl Notification {
    /// Creates an unread notification stamped with the current time.
    #[must_use]
    pub fn new(
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        related: Option<RelatedEntity>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            kind,
            title: title.into(),
            message: message.into(),
            read: false,
            created_at: clock.utc(),
            related,
        }
    }

    /// Reconstructs a notification from stored data.
    #[must_use]
    pub fn from_persisted(data: PersistedNotificationData) -> Self {
        Self {
            id: data.id,
            kind: data.kind,
            title: data.title,
            message: data.message,
            read: data.read,
            created_at: data.created_at,
            related: data.related,
        }
    }

    /// Returns the notification identifier.
    #[must_use]
    pub const fn id(&self) -> NotificationId {
        self.id
    }

    /// Returns the category.
    #[must_use]
    pub const fn kind(&self) -> NotificationKind {
        self.kind
    }

    /// Returns the headline.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the body text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns `true` once the notification has been read.
    #[must_use]
    pub const fn is_read(&self) -> bool {
        self.read
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the triggering entity, if any.
    #[must_use]
    pub const fn related(&self) -> Option<RelatedEntity> {
        self.related
    }

    /// Marks the notification as read. Returns `false` if it already was.
    pub const fn mark_read(&mut self) -> bool {
        let changed = !self.read;
        self.read = true;
        changed
    }
}
