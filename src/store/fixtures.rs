//! Demo workspace used by the dashboard before any backend exists.
//!
//! Seeds the five demo users, four projects, five tasks of the flagship
//! project, two discussion threads and four notifications with fixed
//! timestamps.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{
    notification::domain::{
        Notification, NotificationId, NotificationKind, PersistedNotificationData,
        RelatedEntity,
    },
    project::domain::{
        Discussion, DiscussionId, DiscussionReply, PersistedDiscussionData, PersistedProjectData,
        Project, ProjectDomainError, ProjectId, ReplyId, User, UserId,
    },
    store::ports::{EntityStore, StoreError},
    task::domain::{
        PersistedTaskData, Task, TaskDomainError, TaskId, TaskPriority, TaskStatus, TaskTitle,
    },
};

/// Errors raised while seeding demo data.
#[derive(Debug, Clone, Error)]
pub enum FixtureError {
    /// A hard-coded timestamp failed to parse.
    #[error("invalid fixture timestamp '{value}': {source}")]
    Timestamp {
        /// Offending literal.
        value: &'static str,
        /// Parser error.
        source: chrono::ParseError,
    },
    /// The project fixture table is empty.
    #[error("demo fixtures define no projects")]
    NoProjects,
    /// A user or project literal failed validation.
    #[error(transparent)]
    Project(#[from] ProjectDomainError),
    /// A task literal failed validation.
    #[error(transparent)]
    Task(#[from] TaskDomainError),
    /// The store rejected a record.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Identifiers of the seeded records, in fixture order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoHandles {
    /// Demo users; the first one is the default signed-in user.
    pub users: Vec<UserId>,
    /// Demo projects; the first one owns every demo task.
    pub projects: Vec<ProjectId>,
    /// Demo tasks.
    pub tasks: Vec<TaskId>,
    /// Demo discussions.
    pub discussions: Vec<DiscussionId>,
    /// Demo notifications.
    pub notifications: Vec<NotificationId>,
}

impl DemoHandles {
    /// Returns the user the demo dashboard signs in as.
    #[must_use]
    pub fn current_user(&self) -> Option<UserId> {
        self.users.first().copied()
    }
}

fn at(value: &'static str) -> Result<DateTime<Utc>, FixtureError> {
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|source| FixtureError::Timestamp { value, source })
}

fn pick(ids: &[UserId], positions: &[usize]) -> Vec<UserId> {
    positions
        .iter()
        .filter_map(|position| ids.get(*position).copied())
        .collect()
}

const USERS: [(&str, &str, &str, &str); 5] = [
    ("Alex Chen", "alex.chen@synergysphere.com", "👨‍💻", "Project Manager"),
    ("Sarah Johnson", "sarah.johnson@synergysphere.com", "👩‍🎨", "UX Designer"),
    ("Marcus Rodriguez", "marcus.rodriguez@synergysphere.com", "👨‍🔬", "Full Stack Developer"),
    ("Emma Thompson", "emma.thompson@synergysphere.com", "👩‍💼", "Product Owner"),
    ("David Kim", "david.kim@synergysphere.com", "👨‍🚀", "DevOps Engineer"),
];

struct ProjectSeed {
    name: &'static str,
    description: &'static str,
    color: &'static str,
    members: &'static [usize],
    created_at: &'static str,
    updated_at: &'static str,
}

const PROJECTS: [ProjectSeed; 4] = [
    ProjectSeed {
        name: "SynergySphere Platform",
        description: "Building the next-generation team collaboration platform with intelligent features and seamless user experience.",
        color: "from-blue-500 to-purple-600",
        members: &[0, 1, 2, 3],
        created_at: "2024-01-15T10:00:00Z",
        updated_at: "2024-03-10T14:30:00Z",
    },
    ProjectSeed {
        name: "Mobile App Redesign",
        description: "Complete redesign of the mobile application with focus on user experience and performance optimization.",
        color: "from-green-500 to-teal-600",
        members: &[1, 2, 4],
        created_at: "2024-02-01T09:00:00Z",
        updated_at: "2024-03-08T16:45:00Z",
    },
    ProjectSeed {
        name: "API Integration Hub",
        description: "Developing a centralized hub for all third-party API integrations and webhooks management.",
        color: "from-orange-500 to-red-600",
        members: &[2, 4, 0],
        created_at: "2024-02-20T11:00:00Z",
        updated_at: "2024-03-09T13:20:00Z",
    },
    ProjectSeed {
        name: "Analytics Dashboard",
        description: "Advanced analytics dashboard for tracking team performance, project insights, and productivity metrics.",
        color: "from-purple-500 to-pink-600",
        members: &[3, 0, 1],
        created_at: "2024-03-01T08:30:00Z",
        updated_at: "2024-03-11T10:15:00Z",
    },
];

struct TaskSeed {
    title: &'static str,
    description: &'static str,
    status: TaskStatus,
    priority: TaskPriority,
    assignee: usize,
    due_date: &'static str,
    created_at: &'static str,
    updated_at: &'static str,
}

const TASKS: [TaskSeed; 5] = [
    TaskSeed {
        title: "Design user authentication flow",
        description: "Create wireframes and user flows for the complete authentication process including login, signup, and password recovery.",
        status: TaskStatus::Done,
        priority: TaskPriority::High,
        assignee: 1,
        due_date: "2024-03-15T23:59:59Z",
        created_at: "2024-03-01T10:00:00Z",
        updated_at: "2024-03-05T14:30:00Z",
    },
    TaskSeed {
        title: "Implement task board component",
        description: "Build the interactive Kanban-style task board with drag and drop functionality.",
        status: TaskStatus::InProgress,
        priority: TaskPriority::High,
        assignee: 2,
        due_date: "2024-03-20T23:59:59Z",
        created_at: "2024-03-05T09:00:00Z",
        updated_at: "2024-03-10T16:45:00Z",
    },
    TaskSeed {
        title: "Set up project database schema",
        description: "Design and implement the database schema for projects, tasks, and user relationships.",
        status: TaskStatus::Review,
        priority: TaskPriority::Medium,
        assignee: 4,
        due_date: "2024-03-18T23:59:59Z",
        created_at: "2024-03-02T11:30:00Z",
        updated_at: "2024-03-08T13:20:00Z",
    },
    TaskSeed {
        title: "Create notification system",
        description: "Implement real-time notifications for task updates, assignments, and project changes.",
        status: TaskStatus::Todo,
        priority: TaskPriority::Medium,
        assignee: 2,
        due_date: "2024-03-25T23:59:59Z",
        created_at: "2024-03-08T14:00:00Z",
        updated_at: "2024-03-08T14:00:00Z",
    },
    TaskSeed {
        title: "Mobile responsive design testing",
        description: "Test and optimize the platform for mobile devices and tablets.",
        status: TaskStatus::Todo,
        priority: TaskPriority::Low,
        assignee: 1,
        due_date: "2024-03-30T23:59:59Z",
        created_at: "2024-03-10T10:15:00Z",
        updated_at: "2024-03-10T10:15:00Z",
    },
];

/// Loads the demo workspace into `store`.
///
/// # Errors
///
/// Returns [`FixtureError`] if a literal fails validation or the store
/// rejects a record.
pub async fn seed_demo<S: EntityStore + ?Sized>(store: &S) -> Result<DemoHandles, FixtureError> {
    let users = seed_users(store).await?;
    let projects = seed_projects(store, &users).await?;
    let flagship = projects
        .first()
        .copied()
        .ok_or(FixtureError::NoProjects)?;
    let tasks = seed_tasks(store, flagship, &users).await?;
    let discussions = seed_discussions(store, flagship, &users).await?;
    let notifications = seed_notifications(store, flagship, &tasks, &discussions).await?;

    tracing::debug!(
        users = users.len(),
        projects = projects.len(),
        tasks = tasks.len(),
        "seeded demo workspace"
    );

    Ok(DemoHandles {
        users,
        projects,
        tasks,
        discussions,
        notifications,
    })
}

async fn seed_users<S: EntityStore + ?Sized>(store: &S) -> Result<Vec<UserId>, FixtureError> {
    let mut ids = Vec::with_capacity(USERS.len());
    for (name, email, avatar, role) in USERS {
        let user = User::new(name, email)?.with_avatar(avatar).with_role(role);
        ids.push(user.id());
        store.upsert(user.into()).await?;
    }
    Ok(ids)
}

async fn seed_projects<S: EntityStore + ?Sized>(
    store: &S,
    users: &[UserId],
) -> Result<Vec<ProjectId>, FixtureError> {
    let mut ids = Vec::with_capacity(PROJECTS.len());
    for seed in &PROJECTS {
        let project = Project::from_persisted(PersistedProjectData {
            id: ProjectId::new(),
            name: seed.name.to_owned(),
            description: seed.description.to_owned(),
            color: seed.color.to_owned(),
            members: pick(users, seed.members),
            created_at: at(seed.created_at)?,
            updated_at: at(seed.updated_at)?,
        });
        ids.push(project.id());
        store.upsert(project.into()).await?;
    }
    Ok(ids)
}

async fn seed_tasks<S: EntityStore + ?Sized>(
    store: &S,
    project_id: ProjectId,
    users: &[UserId],
) -> Result<Vec<TaskId>, FixtureError> {
    let mut ids = Vec::with_capacity(TASKS.len());
    for seed in &TASKS {
        let task = Task::from_persisted(PersistedTaskData {
            id: TaskId::new(),
            project_id,
            title: TaskTitle::new(seed.title)?,
            description: Some(seed.description.to_owned()),
            status: seed.status,
            priority: seed.priority,
            assignee: users.get(seed.assignee).copied(),
            due_date: Some(at(seed.due_date)?),
            created_at: at(seed.created_at)?,
            updated_at: at(seed.updated_at)?,
        });
        ids.push(task.id());
        store.upsert(task.into()).await?;
    }
    Ok(ids)
}

struct ReplySeed {
    author: usize,
    content: &'static str,
    created_at: &'static str,
}

struct DiscussionSeed {
    title: &'static str,
    author: usize,
    content: &'static str,
    replies: &'static [ReplySeed],
    created_at: &'static str,
    updated_at: &'static str,
}

const DISCUSSIONS: [DiscussionSeed; 2] = [
    DiscussionSeed {
        title: "UI/UX Design Direction Discussion",
        author: 0,
        content: "I'd like to discuss our approach to the overall design direction. Should we go with a more minimalist approach or embrace the glass morphism trend?",
        replies: &[
            ReplySeed {
                author: 1,
                content: "I think glass morphism could work well for our modern collaboration platform. It adds depth without being overwhelming.",
                created_at: "2024-03-08T10:30:00Z",
            },
            ReplySeed {
                author: 3,
                content: "Agreed! We should also consider accessibility. Glass effects should not compromise readability.",
                created_at: "2024-03-08T11:15:00Z",
            },
        ],
        created_at: "2024-03-08T09:45:00Z",
        updated_at: "2024-03-08T11:15:00Z",
    },
    DiscussionSeed {
        title: "Performance Optimization Strategies",
        author: 2,
        content: "Let's discuss our approach to performance optimization. I've identified several areas where we can improve loading times.",
        replies: &[ReplySeed {
            author: 4,
            content: "Great initiative! I suggest we implement lazy loading for the task boards and optimize our API calls.",
            created_at: "2024-03-09T14:20:00Z",
        }],
        created_at: "2024-03-09T13:30:00Z",
        updated_at: "2024-03-09T14:20:00Z",
    },
];

async fn seed_discussions<S: EntityStore + ?Sized>(
    store: &S,
    project_id: ProjectId,
    users: &[UserId],
) -> Result<Vec<DiscussionId>, FixtureError> {
    let mut ids = Vec::with_capacity(DISCUSSIONS.len());
    for seed in &DISCUSSIONS {
        let mut replies = Vec::with_capacity(seed.replies.len());
        for reply in seed.replies {
            let Some(author) = users.get(reply.author).copied() else {
                continue;
            };
            replies.push(DiscussionReply::from_persisted(
                ReplyId::new(),
                author,
                reply.content.to_owned(),
                at(reply.created_at)?,
            ));
        }
        let Some(author) = users.get(seed.author).copied() else {
            continue;
        };
        let discussion = Discussion::from_persisted(PersistedDiscussionData {
            id: DiscussionId::new(),
            project_id,
            title: seed.title.to_owned(),
            author,
            content: seed.content.to_owned(),
            replies,
            created_at: at(seed.created_at)?,
            updated_at: at(seed.updated_at)?,
        });
        ids.push(discussion.id());
        store.upsert(discussion.into()).await?;
    }
    Ok(ids)
}

async fn seed_notifications<S: EntityStore + ?Sized>(
    store: &S,
    project_id: ProjectId,
    tasks: &[TaskId],
    discussions: &[DiscussionId],
) -> Result<Vec<NotificationId>, FixtureError> {
    let seeds = [
        (
            NotificationKind::TaskAssigned,
            "New Task Assigned",
            "You have been assigned to \"Implement task board component\"",
            false,
            "2024-03-10T16:45:00Z",
            tasks.get(1).copied().map(RelatedEntity::Task),
        ),
        (
            NotificationKind::DiscussionReply,
            "New Discussion Reply",
            "Sarah Johnson replied to \"UI/UX Design Direction Discussion\"",
            false,
            "2024-03-08T10:30:00Z",
            discussions.first().copied().map(RelatedEntity::Discussion),
        ),
        (
            NotificationKind::TaskCompleted,
            "Task Completed",
            "Sarah Johnson completed \"Design user authentication flow\"",
            true,
            "2024-03-05T14:30:00Z",
            tasks.first().copied().map(RelatedEntity::Task),
        ),
        (
            NotificationKind::ProjectUpdate,
            "Project Update",
            "SynergySphere Platform has reached 75% completion",
            true,
            "2024-03-10T14:30:00Z",
            Some(RelatedEntity::Project(project_id)),
        ),
    ];

    let mut ids = Vec::with_capacity(seeds.len());
    for (kind, title, message, read, created_at, related) in seeds {
        let notification = Notification::from_persisted(PersistedNotificationData {
            id: NotificationId::new(),
            kind,
            title: title.to_owned(),
            message: message.to_owned(),
            read,
            created_at: at(created_at)?,
            related,
        });
        ids.push(notification.id());
        store.upsert(notification.into()).await?;
    }
    Ok(ids)
}
