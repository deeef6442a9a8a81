//! Workspace-wide figures over the demo workspace.

use eyre::{OptionExt, ensure};
use rstest::rstest;
use synergysphere::{
    session::Session,
    task::{domain::TaskStatus, services::CreateTaskRequest},
};

use super::helpers::{TestEngine, engine};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn demo_dashboard_reflects_seeded_tasks(engine: TestEngine) -> eyre::Result<()> {
    let handles = engine.seed_demo().await?;
    let me = handles.current_user().ok_or_eyre("demo user")?;

    let dashboard = engine.aggregator().dashboard(&Session::for_user(me)).await?;

    ensure!(dashboard.active_projects == 4);
    ensure!(dashboard.total_tasks == 5);
    ensure!(dashboard.completed_tasks == 1);
    ensure!(dashboard.remaining_tasks == 4);
    ensure!(dashboard.team_members == 5);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn demo_progress_moves_with_new_work(engine: TestEngine) -> eyre::Result<()> {
    let handles = engine.seed_demo().await?;
    let flagship = *handles.projects.first().ok_or_eyre("flagship project")?;
    let session = Session::anonymous();
    ensure!(engine.aggregator().progress_percentage(flagship).await? == 20);

    let extra = engine
        .tasks()
        .create_task(&session, CreateTaskRequest::new(flagship, "Release notes"))
        .await?;
    ensure!(engine.aggregator().progress_percentage(flagship).await? == 17);

    engine
        .tasks()
        .change_status(&session, extra.id(), TaskStatus::Done)
        .await?;
    ensure!(engine.aggregator().progress_percentage(flagship).await? == 33);

    let roster = engine.aggregator().team_roster(flagship).await?;
    ensure!(roster.len() == 4);
    ensure!(engine.aggregator().discussion_count(flagship).await? == 2);
    Ok(())
}
