//! Domain model for users, projects and discussions.
//!
//! Relationships are expressed through identifiers rather than nested
//! ownership, so one user can be a project member, a task assignee and a
//! discussion author without duplication.

mod discussion;
mod error;
mod ids;
mod project;
mod user;

pub use discussion::{Discussion, DiscussionReply, PersistedDiscussionData};
pub use error::ProjectDomainError;
pub use ids::{DiscussionId, ProjectId, ReplyId, UserId};
pub use project::{DEFAULT_PROJECT_COLOR, PersistedProjectData, Project, ProjectDraft};
pub use user::User;
