//! Project discussion threads and their replies.

use super::{DiscussionId, ProjectDomainError, ProjectId, ReplyId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A single reply appended to a discussion thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscussionReply {
    id: ReplyId,
    author: UserId,
    content: String,
    created_at: DateTime<Utc>,
}

impl DiscussionReply {
    /// Reconstructs a reply from stored values.
    #[must_use]
    pub const fn from_persisted(
        id: ReplyId,
        author: UserId,
        content: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            author,
            content,
            created_at,
        }
    }

    /// Returns the reply identifier.
    #[must_use]
    pub const fn id(&self) -> ReplyId {
        self.id
    }

    /// Returns the reply author.
    #[must_use]
    pub const fn author(&self) -> UserId {
        self.author
    }

    /// Returns the reply body.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the reply timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A discussion thread scoped to one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discussion {
    id: DiscussionId,
    project_id: ProjectId,
    title: String,
    author: UserId,
    content: String,
    replies: Vec<DiscussionReply>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a stored discussion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedDiscussionData {
    /// Stored identifier.
    pub id: DiscussionId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Stored title.
    pub title: String,
    /// Thread author.
    pub author: UserId,
    /// Opening post body.
    pub content: String,
    /// Replies in posting order.
    pub replies: Vec<DiscussionReply>,
    /// Stored creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Stored latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Discussion {
    /// Opens a new discussion thread.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyDiscussionTitle`] or
    /// [`ProjectDomainError::EmptyDiscussionContent`] for blank input.
    pub fn start(
        project_id: ProjectId,
        author: UserId,
        title: impl Into<String>,
        content: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, ProjectDomainError> {
        let raw_title = title.into();
        if raw_title.trim().is_empty() {
            return Err(ProjectDomainError::EmptyDiscussionTitle);
        }
        let raw_content = content.into();
        if raw_content.trim().is_empty() {
            return Err(ProjectDomainError::EmptyDiscussionContent);
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: DiscussionId::new(),
            project_id,
            title: raw_title.trim().to_owned(),
            author,
            content: raw_content,
            replies: Vec::new(),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a discussion from stored data.
    #[must_use]
    pub fn from_persisted(data: PersistedDiscussionData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            title: data.title,
            author: data.author,
            content: data.content,
            replies: data.replies,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the discussion identifier.
    #[must_use]
    pub const fn id(&self) -> DiscussionId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the thread title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the thread author.
    #[must_use]
    pub const fn author(&self) -> UserId {
        self.author
    }

    /// Returns the opening post body.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns replies in posting order.
    #[must_use]
    pub fn replies(&self) -> &[DiscussionReply] {
        &self.replies
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

    /// Appends a reply and returns a copy of it.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyReplyContent`] when the body is
    /// blank; the thread is left untouched.
    pub fn add_reply(
        &mut self,
        author: UserId,
        content: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<DiscussionReply, ProjectDomainError> {
        let body = content.into();
        if body.trim().is_empty() {
            return Err(ProjectDomainError::EmptyReplyContent);
        }

        let timestamp = clock.utc();
        let reply = DiscussionReply {
            id: ReplyId::new(),
            author,
            content: body,
            created_at: timestamp,
        };
        self.replies.push(reply.clone());
        self.updated_at = timestamp;
        Ok(reply)
    }
}
