//! Task board behaviour through the engine.

use chrono::{Duration, Utc};
use eyre::{OptionExt, ensure};
use rstest::rstest;
use synergysphere::{
    config::EngineConfig,
    session::Session,
    task::{
        domain::{TaskPatch, TaskPriority, TaskStatus},
        services::CreateTaskRequest,
    },
};

use super::helpers::{TestEngine, engine, engine_with, team_project};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn progress_follows_column_moves(engine: TestEngine) -> eyre::Result<()> {
    let (_, _, project) = team_project(&engine).await?;
    let session = Session::anonymous();
    let mut ids = Vec::new();
    for title in ["Audit", "Wireframes", "Build", "Launch"] {
        let task = engine
            .tasks()
            .create_task(&session, CreateTaskRequest::new(project.id(), title))
            .await?;
        ids.push(task.id());
    }

    let moves = [
        TaskStatus::Done,
        TaskStatus::Done,
        TaskStatus::InProgress,
        TaskStatus::Todo,
    ];
    for (id, status) in ids.iter().zip(moves) {
        engine.tasks().change_status(&session, *id, status).await?;
    }

    let counts = engine.aggregator().counts_by_status(project.id()).await?;
    ensure!(engine.aggregator().progress_percentage(project.id()).await? == 50);
    ensure!(counts.get(TaskStatus::Todo) == 1);
    ensure!(counts.get(TaskStatus::InProgress) == 1);
    ensure!(counts.get(TaskStatus::Review) == 0);
    ensure!(counts.get(TaskStatus::Done) == 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_round_trips_with_requested_fields(engine: TestEngine) -> eyre::Result<()> {
    let (_, sarah, project) = team_project(&engine).await?;
    let due = Utc::now() + Duration::days(5);

    let created = engine
        .tasks()
        .create_task(
            &Session::anonymous(),
            CreateTaskRequest::new(project.id(), "  Landing page  ")
                .with_description("Hero and pricing sections")
                .with_priority(TaskPriority::High)
                .with_status(TaskStatus::Review)
                .with_assignee(sarah.id())
                .with_due_date(due),
        )
        .await?;
    let fetched = engine
        .tasks()
        .get_task(created.id())
        .await?
        .ok_or_eyre("task should be stored")?;

    ensure!(fetched == created);
    ensure!(fetched.title().as_str() == "Landing page");
    ensure!(fetched.description() == Some("Hero and pricing sections"));
    ensure!(fetched.priority() == TaskPriority::High);
    ensure!(fetched.status() == TaskStatus::Review);
    ensure!(fetched.due_date() == Some(due));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overdue_ignores_completed_work(engine: TestEngine) -> eyre::Result<()> {
    let (_, _, project) = team_project(&engine).await?;
    let session = Session::anonymous();
    let yesterday = Utc::now() - Duration::days(1);

    let late = engine
        .tasks()
        .create_task(
            &session,
            CreateTaskRequest::new(project.id(), "Late")
                .with_status(TaskStatus::InProgress)
                .with_due_date(yesterday),
        )
        .await?;
    let finished = engine
        .tasks()
        .create_task(
            &session,
            CreateTaskRequest::new(project.id(), "Finished").with_due_date(yesterday),
        )
        .await?;
    engine
        .tasks()
        .change_status(&session, finished.id(), TaskStatus::Done)
        .await?;

    let overdue = engine
        .aggregator()
        .overdue_tasks(project.id(), Utc::now())
        .await?;
    let ids: Vec<_> = overdue.iter().map(|task| task.id()).collect();
    ensure!(ids == vec![late.id()]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn strict_workflow_walks_every_column() -> eyre::Result<()> {
    let engine = engine_with(EngineConfig::strict_workflow())?;
    let (_, _, project) = team_project(&engine).await?;
    let session = Session::anonymous();
    let task = engine
        .tasks()
        .create_task(&session, CreateTaskRequest::new(project.id(), "Gated"))
        .await?;

    let skipped = engine
        .tasks()
        .change_status(&session, task.id(), TaskStatus::Review)
        .await;
    ensure!(skipped.is_err_and(|err| err.is_validation()));

    for status in ["in-progress", "review", "done"] {
        engine
            .tasks()
            .change_status_str(&session, task.id(), status)
            .await?;
    }
    ensure!(engine.aggregator().progress_percentage(project.id()).await? == 100);
    Ok(())
}

#[rstest]
fn invalid_config_is_rejected_before_use() {
    let config = EngineConfig::from_json(r#"{ "completion_thresholds": [10, 150] }"#);
    assert!(config.is_err());

    let unchecked = EngineConfig {
        completion_thresholds: vec![0],
        ..EngineConfig::default()
    };
    assert!(engine_with(unchecked).is_err());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn patch_updates_only_named_fields(engine: TestEngine) -> eyre::Result<()> {
    let (_, _, project) = team_project(&engine).await?;
    let session = Session::anonymous();
    let task = engine
        .tasks()
        .create_task(
            &session,
            CreateTaskRequest::new(project.id(), "Copy").with_description("Draft text"),
        )
        .await?;

    let updated = engine
        .tasks()
        .update_fields(
            &session,
            task.id(),
            TaskPatch::new().with_priority(TaskPriority::Urgent),
        )
        .await?;

    ensure!(updated.priority() == TaskPriority::Urgent);
    ensure!(updated.title() == task.title());
    ensure!(updated.description() == Some("Draft text"));
    ensure!(updated.status() == task.status());
    Ok(())
}
