//! Application services for projects, their statistics and discussions.

mod aggregator;
mod discussion;
mod project;

pub use aggregator::{
    AggregateError, AggregateResult, DashboardSummary, ProjectAggregator, ProjectSummary,
    StatusCounts, completion_percentage,
};
pub use discussion::{DiscussionService, DiscussionServiceError, DiscussionServiceResult};
pub use project::{
    CreateProjectRequest, ProjectService, ProjectServiceError, ProjectServiceResult,
    RegisterUserRequest,
};
