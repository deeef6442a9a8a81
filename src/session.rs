//! Acting-user context passed explicitly to mutating operations.

use crate::project::domain::UserId;

/// Identity on whose behalf an operation runs.
///
/// Notification wording ("assigned by", "completed by") and dashboard
/// "my tasks" figures read the actor from here instead of from any global
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Session {
    actor: Option<UserId>,
}

impl Session {
    /// Creates a session acting as `user_id`.
    #[must_use]
    pub const fn for_user(user_id: UserId) -> Self {
        Self {
            actor: Some(user_id),
        }
    }

    /// Creates a session with no known actor, e.g. for system jobs.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { actor: None }
    }

    /// Returns the acting user, if known.
    #[must_use]
    pub const fn actor(&self) -> Option<UserId> {
        self.actor
    }
}
