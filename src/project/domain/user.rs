//! Team member records.

use super::{ProjectDomainError, UserId};
use serde::{Deserialize, Serialize};

/// A team member who can join projects, own tasks and post in discussions.
///
/// Users are immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    avatar: Option<String>,
    role: Option<String>,
}

impl User {
    /// Creates a validated user with a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyUserName`] when the name is blank
    /// and [`ProjectDomainError::InvalidEmail`] when the email is blank or has
    /// no `@`.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, ProjectDomainError> {
        let raw_name = name.into();
        let trimmed_name = raw_name.trim();
        if trimmed_name.is_empty() {
            return Err(ProjectDomainError::EmptyUserName);
        }

        let raw_email = email.into();
        let trimmed_email = raw_email.trim();
        if trimmed_email.is_empty() || !trimmed_email.contains('@') {
            return Err(ProjectDomainError::InvalidEmail(raw_email));
        }

        Ok(Self {
            id: UserId::new(),
            name: trimmed_name.to_owned(),
            email: trimmed_email.to_owned(),
            avatar: None,
            role: None,
        })
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

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the avatar glyph, if any.
    #[must_use]
    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }

    /// Returns the role label, if any.
    #[must_use]
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }
}
