//! Project aggregate.
//!
//! Projects carry no task totals; the project aggregator derives them from
//! the live task collection on every read.

use super::{ProjectDomainError, ProjectId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Colour theme token applied when a project is created without one.
pub const DEFAULT_PROJECT_COLOR: &str = "from-blue-500 to-purple-600";

/// A project grouping tasks, discussions and a team roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: String,
    description: String,
    color: String,
    members: Vec<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Validated-on-construction input for a new project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    /// Display name; must not be blank.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Colour theme token.
    pub color: String,
    /// Initial members in display order.
    pub members: Vec<UserId>,
}

/// Parameter object for reconstructing a stored project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Stored identifier.
    pub id: ProjectId,
    /// Stored display name.
    pub name: String,
    /// Stored description.
    pub description: String,
    /// Stored colour theme token.
    pub color: String,
    /// Stored members in display order.
    pub members: Vec<UserId>,
    /// Stored creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Stored latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Creates a new project from a draft.
    ///
    /// Duplicate member identifiers collapse onto their first position.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyProjectName`] when the name is
    /// blank.
    pub fn new(draft: ProjectDraft, clock: &impl Clock) -> Result<Self, ProjectDomainError> {
        let ProjectDraft {
            name,
            description,
            color,
            members,
        } = draft;

        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ProjectDomainError::EmptyProjectName);
        }

        let color_token = if color.trim().is_empty() {
            DEFAULT_PROJECT_COLOR.to_owned()
        } else {
            color
        };

        let mut roster = Vec::with_capacity(members.len());
        for member in members {
            if !roster.contains(&member) {
                roster.push(member);
            }
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: ProjectId::new(),
            name: trimmed.to_owned(),
            description,
            color: color_token,
            members: roster,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a project from stored data.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            color: data.color,
            members: data.members,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the colour theme token.
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Returns member identifiers in display order.
    #[must_use]
    pub fn members(&self) -> &[UserId] {
        &self.members
    }

    /// Returns `true` when the user belongs to the project.
    #[must_use]
    pub fn has_member(&self, user_id: UserId) -> bool {
        self.members.contains(&user_id)
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

    /// Appends a member to the roster.
    ///
    /// Returns `false` without touching the project when the user is already
    /// a member.
    pub fn add_member(&mut self, user_id: UserId, clock: &impl Clock) -> bool {
        if self.has_member(user_id) {
            return false;
        }
        self.members.push(user_id);
        self.updated_at = clock.utc();
        true
    }
}
