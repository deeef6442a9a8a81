//! Error types for project domain validation.

use thiserror::Error;

/// Errors returned while constructing users, projects and discussions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyProjectName,

    /// The user name is empty after trimming.
    #[error("user name must not be empty")]
    EmptyUserName,

    /// The email address is empty or lacks an `@` separator.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The discussion title is empty after trimming.
    #[error("discussion title must not be empty")]
    EmptyDiscussionTitle,

    /// The discussion body is empty after trimming.
    #[error("discussion content must not be empty")]
    EmptyDiscussionContent,

    /// The reply body is empty after trimming.
    #[error("reply content must not be empty")]
    EmptyReplyContent,
}
