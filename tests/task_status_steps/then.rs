//! Then steps for task status BDD scenarios.

use super::world::{TaskStatusWorld, run_async};
use rstest_bdd_macros::then;
use synergysphere::task::{
    domain::{TaskDomainError, TaskStatus},
    services::TaskLifecycleError,
};

#[then(r#"task {position:usize} is in the "{status}" column"#)]
fn task_is_in_column(
    world: &TaskStatusWorld,
    position: usize,
    status: String,
) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task_id = world.task_id(position)?;
    let task = run_async(world.engine()?.tasks().get_task(task_id))?
        .ok_or_else(|| eyre::eyre!("task {position} is missing"))?;

    if task.status() != expected {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected.as_str(),
            task.status().as_str()
        ));
    }
    Ok(())
}

#[then("project progress is {percentage:u8} percent")]
fn project_progress_is(world: &TaskStatusWorld, percentage: u8) -> Result<(), eyre::Report> {
    let project_id = world.project_id()?;
    let actual = run_async(world.engine()?.aggregator().progress_percentage(project_id))?;
    eyre::ensure!(
        actual == percentage,
        "expected {percentage}% progress, found {actual}%"
    );
    Ok(())
}

#[then(r#"a "{kind}" notification is in the inbox"#)]
fn notification_in_inbox(world: &TaskStatusWorld, kind: String) -> Result<(), eyre::Report> {
    let notifications = run_async(world.engine()?.inbox().list())?;
    eyre::ensure!(
        notifications
            .iter()
            .any(|notification| notification.kind().as_str() == kind),
        "no {kind} notification among {notifications:?}"
    );
    Ok(())
}

#[then("the move fails with an invalid status error")]
fn move_fails_with_invalid_status(world: &TaskStatusWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_move_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing move result"))?;

    if !matches!(result, Err(TaskLifecycleError::InvalidStatus(_))) {
        return Err(eyre::eyre!("expected InvalidStatus error, got {result:?}"));
    }
    Ok(())
}

#[then("the move fails with a transition not allowed error")]
fn move_fails_with_transition_not_allowed(world: &TaskStatusWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_move_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing move result"))?;

    if !matches!(
        result,
        Err(TaskLifecycleError::Domain(
            TaskDomainError::TransitionNotAllowed { .. }
        ))
    ) {
        return Err(eyre::eyre!(
            "expected TransitionNotAllowed error, got {result:?}"
        ));
    }
    Ok(())
}
