//! Notifications produced by engine mutations.

use eyre::{OptionExt, ensure};
use rstest::rstest;
use synergysphere::{
    notification::domain::{NotificationKind, RelatedEntity},
    session::Session,
    task::{domain::TaskStatus, services::CreateTaskRequest},
};

use super::helpers::{TestEngine, engine, team_project};

async fn kinds(engine: &TestEngine) -> eyre::Result<Vec<NotificationKind>> {
    Ok(engine
        .inbox()
        .list()
        .await?
        .iter()
        .map(|notification| notification.kind())
        .collect())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completing_the_only_task_reports_completion_and_milestone(
    engine: TestEngine,
) -> eyre::Result<()> {
    let (alex, _, project) = team_project(&engine).await?;
    let session = Session::for_user(alex.id());
    let task = engine
        .tasks()
        .create_task(&session, CreateTaskRequest::new(project.id(), "Ship it"))
        .await?;

    engine
        .tasks()
        .change_status(&session, task.id(), TaskStatus::Done)
        .await?;

    let listed = engine.inbox().list().await?;
    ensure!(listed.len() == 2);
    let completion = listed
        .iter()
        .find(|notification| notification.kind() == NotificationKind::TaskCompleted)
        .ok_or_eyre("completion notification")?;
    ensure!(completion.message() == "Alex Chen completed \"Ship it\"");
    ensure!(completion.related() == Some(RelatedEntity::Task(task.id())));
    let milestone = listed
        .iter()
        .find(|notification| notification.kind() == NotificationKind::ProjectUpdate)
        .ok_or_eyre("milestone notification")?;
    ensure!(milestone.message() == "Website Redesign has reached 100% completion");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_mutations_leave_the_inbox_empty(engine: TestEngine) -> eyre::Result<()> {
    let (alex, _, project) = team_project(&engine).await?;
    let session = Session::for_user(alex.id());

    let blank = engine
        .tasks()
        .create_task(&session, CreateTaskRequest::new(project.id(), "   "))
        .await;
    ensure!(blank.is_err_and(|err| err.is_validation()));

    let bogus = engine
        .tasks()
        .create_task(&session, CreateTaskRequest::new(project.id(), "Valid"))
        .await?;
    let rejected = engine
        .tasks()
        .change_status_str(&session, bogus.id(), "archived")
        .await;
    ensure!(rejected.is_err_and(|err| err.is_validation()));

    ensure!(kinds(&engine).await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn replies_notify_and_inbox_tracks_read_state(engine: TestEngine) -> eyre::Result<()> {
    let (alex, sarah, project) = team_project(&engine).await?;
    let thread = engine
        .discussions()
        .start_discussion(
            &Session::for_user(alex.id()),
            project.id(),
            "Colour palette",
            "Warm or cool?",
        )
        .await?;
    engine
        .discussions()
        .add_reply(&Session::for_user(sarah.id()), thread.id(), "Cool, please")
        .await?;

    ensure!(kinds(&engine).await? == vec![NotificationKind::DiscussionReply]);
    ensure!(engine.inbox().unread_count().await? == 1);
    ensure!(engine.inbox().mark_all_read().await? == 1);
    ensure!(engine.inbox().unread_count().await? == 0);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_moves_apply_one_at_a_time(engine: TestEngine) -> eyre::Result<()> {
    let (_, _, project) = team_project(&engine).await?;
    let session = Session::anonymous();
    let mut ids = Vec::new();
    for position in 0..8 {
        let task = engine
            .tasks()
            .create_task(
                &session,
                CreateTaskRequest::new(project.id(), format!("Task {position}")),
            )
            .await?;
        ids.push(task.id());
    }

    let mut handles = Vec::new();
    for id in ids {
        let tasks = engine.tasks().clone();
        handles.push(tokio::spawn(async move {
            tasks
                .change_status(&Session::anonymous(), id, TaskStatus::Done)
                .await
        }));
    }
    for handle in handles {
        handle.await??;
    }

    ensure!(engine.aggregator().progress_percentage(project.id()).await? == 100);
    let milestones = engine
        .inbox()
        .list()
        .await?
        .iter()
        .filter(|notification| notification.kind() == NotificationKind::ProjectUpdate)
        .count();
    ensure!(milestones == 4);
    Ok(())
}
