//! Derived statistics tests for the project aggregator.

use std::sync::Arc;

use crate::{
    project::{
        domain::{Discussion, Project, ProjectDraft, ProjectId, User, UserId},
        services::{AggregateError, ProjectAggregator, completion_percentage},
    },
    session::Session,
    store::{adapters::memory::InMemoryEntityStore, ports::EntityStore},
    task::domain::{Task, TaskDraft, TaskStatus, TaskTitle},
    test_support::{SteppingClock, fixed_instant},
};
use chrono::Duration;
use eyre::ensure;
use rstest::rstest;

struct Board {
    store: Arc<InMemoryEntityStore>,
    clock: SteppingClock,
    aggregator: ProjectAggregator<InMemoryEntityStore>,
}

impl Board {
    fn new() -> Self {
        let store = Arc::new(InMemoryEntityStore::new());
        Self {
            aggregator: ProjectAggregator::new(Arc::clone(&store)),
            store,
            clock: SteppingClock::default(),
        }
    }

    async fn user(&self, name: &str) -> eyre::Result<User> {
        let email = format!("{}@synergysphere.com", name.to_lowercase());
        let user = User::new(name, email)?;
        self.store.upsert(user.clone().into()).await?;
        Ok(user)
    }

    async fn project(&self, name: &str, members: Vec<UserId>) -> eyre::Result<Project> {
        let project = Project::new(
            ProjectDraft {
                name: name.to_owned(),
                description: String::new(),
                color: String::new(),
                members,
            },
            &self.clock,
        )?;
        self.store.upsert(project.clone().into()).await?;
        Ok(project)
    }

    async fn task(&self, draft: TaskDraft) -> eyre::Result<Task> {
        let task = Task::from_draft(draft, &self.clock);
        self.store.upsert(task.clone().into()).await?;
        Ok(task)
    }

    async fn tasks_with(&self, project_id: ProjectId, statuses: &[TaskStatus]) -> eyre::Result<()> {
        for (position, status) in statuses.iter().enumerate() {
            let title = TaskTitle::new(format!("Task {position}"))?;
            self.task(TaskDraft {
                status: *status,
                ..TaskDraft::new(project_id, title)
            })
            .await?;
        }
        Ok(())
    }
}

#[rstest]
#[case(0, 0, 0)]
#[case(0, 4, 0)]
#[case(1, 3, 33)]
#[case(2, 3, 67)]
#[case(1, 8, 13)]
#[case(1, 5, 20)]
#[case(4, 4, 100)]
fn completion_rounds_half_up(#[case] done: usize, #[case] total: usize, #[case] expected: u8) {
    assert_eq!(completion_percentage(done, total), expected);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_project_reports_zero_progress_and_zero_counts() -> eyre::Result<()> {
    let board = Board::new();
    let project = board.project("Empty", Vec::new()).await?;

    ensure!(board.aggregator.progress_percentage(project.id()).await? == 0);
    let counts = board.aggregator.counts_by_status(project.id()).await?;
    ensure!(counts.iter().count() == 4);
    ensure!(counts.iter().all(|(_, count)| count == 0));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn counts_cover_every_column_and_sum_to_total() -> eyre::Result<()> {
    let board = Board::new();
    let project = board.project("Website", Vec::new()).await?;
    let other = board.project("Other", Vec::new()).await?;
    board
        .tasks_with(
            project.id(),
            &[TaskStatus::Done, TaskStatus::Done, TaskStatus::InProgress, TaskStatus::Todo],
        )
        .await?;
    board.tasks_with(other.id(), &[TaskStatus::Review]).await?;

    let counts = board.aggregator.counts_by_status(project.id()).await?;

    ensure!(counts.get(TaskStatus::Todo) == 1);
    ensure!(counts.get(TaskStatus::InProgress) == 1);
    ensure!(counts.get(TaskStatus::Review) == 0);
    ensure!(counts.get(TaskStatus::Done) == 2);
    ensure!(counts.total() == 4);
    ensure!(board.aggregator.progress_percentage(project.id()).await? == 50);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_project_is_not_found() -> eyre::Result<()> {
    let board = Board::new();
    let missing = ProjectId::new();

    let result = board.aggregator.progress_percentage(missing).await;

    ensure!(matches!(result, Err(AggregateError::ProjectNotFound(id)) if id == missing));
    ensure!(result.err().is_some_and(|err| err.is_not_found()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn roster_follows_member_order_and_skips_unknown_users() -> eyre::Result<()> {
    let board = Board::new();
    let maya = board.user("Maya").await?;
    let alex = board.user("Alex").await?;
    let project = board
        .project("Roster", vec![alex.id(), UserId::new(), maya.id()])
        .await?;

    let roster = board.aggregator.team_roster(project.id()).await?;

    let names: Vec<&str> = roster.iter().map(User::name).collect();
    ensure!(names == ["Alex", "Maya"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn discussion_count_is_scoped_to_the_project() -> eyre::Result<()> {
    let board = Board::new();
    let author = board.user("Emma").await?;
    let project = board.project("Talk", vec![author.id()]).await?;
    let other = board.project("Quiet", Vec::new()).await?;
    for title in ["One", "Two"] {
        let discussion = Discussion::start(project.id(), author.id(), title, "Body", &board.clock)?;
        board.store.upsert(discussion.into()).await?;
    }

    ensure!(board.aggregator.discussion_count(project.id()).await? == 2);
    ensure!(board.aggregator.discussion_count(other.id()).await? == 0);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn columns_and_overdue_filters_keep_creation_order() -> eyre::Result<()> {
    let board = Board::new();
    let project = board.project("Board", Vec::new()).await?;
    let now = fixed_instant();
    let yesterday = now - Duration::days(1);

    let late = board
        .task(TaskDraft {
            status: TaskStatus::InProgress,
            due_date: Some(yesterday),
            ..TaskDraft::new(project.id(), TaskTitle::new("Late")?)
        })
        .await?;
    board
        .task(TaskDraft {
            status: TaskStatus::Done,
            due_date: Some(yesterday),
            ..TaskDraft::new(project.id(), TaskTitle::new("Shipped")?)
        })
        .await?;
    let future = board
        .task(TaskDraft {
            status: TaskStatus::InProgress,
            due_date: Some(now + Duration::days(3)),
            ..TaskDraft::new(project.id(), TaskTitle::new("Upcoming")?)
        })
        .await?;

    let in_progress = board
        .aggregator
        .tasks_in_column(project.id(), TaskStatus::InProgress)
        .await?;
    ensure!(in_progress == vec![late.clone(), future]);

    let overdue = board.aggregator.overdue_tasks(project.id(), now).await?;
    ensure!(overdue == vec![late]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn summary_combines_card_figures() -> eyre::Result<()> {
    let board = Board::new();
    let alex = board.user("Alex").await?;
    let sarah = board.user("Sarah").await?;
    let project = board.project("Card", vec![alex.id(), sarah.id()]).await?;
    board
        .tasks_with(
            project.id(),
            &[TaskStatus::Done, TaskStatus::Review, TaskStatus::Todo],
        )
        .await?;
    let discussion = Discussion::start(project.id(), alex.id(), "Kickoff", "Hi", &board.clock)?;
    board.store.upsert(discussion.into()).await?;

    let summary = board.aggregator.summary(project.id()).await?;

    ensure!(summary.project == project);
    ensure!(summary.total_tasks == 3);
    ensure!(summary.completed_tasks == 1);
    ensure!(summary.progress_percentage == 33);
    ensure!(summary.counts_by_status.get(TaskStatus::Review) == 1);
    ensure!(summary.member_count == 2);
    ensure!(summary.discussion_count == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dashboard_counts_distinct_members_and_my_tasks() -> eyre::Result<()> {
    let board = Board::new();
    let alex = board.user("Alex").await?;
    let sarah = board.user("Sarah").await?;
    let first = board.project("First", vec![alex.id(), sarah.id()]).await?;
    board.project("Second", vec![sarah.id()]).await?;
    for (title, status, assignee) in [
        ("a", TaskStatus::Done, Some(alex.id())),
        ("b", TaskStatus::Todo, Some(alex.id())),
        ("c", TaskStatus::Review, Some(sarah.id())),
        ("d", TaskStatus::Todo, None),
    ] {
        board
            .task(TaskDraft {
                status,
                assignee,
                ..TaskDraft::new(first.id(), TaskTitle::new(title)?)
            })
            .await?;
    }

    let mine = board.aggregator.dashboard(&Session::for_user(alex.id())).await?;
    let anonymous = board.aggregator.dashboard(&Session::anonymous()).await?;

    ensure!(mine.active_projects == 2);
    ensure!(mine.team_members == 2);
    ensure!(mine.total_tasks == 4);
    ensure!(mine.completed_tasks == 1);
    ensure!(mine.remaining_tasks == 3);
    ensure!(mine.my_tasks == 2);
    ensure!(anonymous.my_tasks == 0);
    Ok(())
}
