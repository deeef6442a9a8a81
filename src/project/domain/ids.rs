//! Identifier types for users, projects and discussions.

use crate::ids::uuid_identifier;

uuid_identifier!(
    /// Unique identifier for a team member.
    UserId
);

uuid_identifier!(
    /// Unique identifier for a project.
    ProjectId
);

uuid_identifier!(
    /// Unique identifier for a project discussion thread.
    DiscussionId
);

uuid_identifier!(
    /// Unique identifier for a reply within a discussion thread.
    ReplyId
);
