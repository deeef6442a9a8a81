//! Given steps for task status BDD scenarios.

use super::world::{TaskStatusWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use synergysphere::{
    config::EngineConfig,
    project::services::CreateProjectRequest,
    session::Session,
    task::services::CreateTaskRequest,
};

#[given("the strict workflow is enabled")]
fn strict_workflow_enabled(world: &mut TaskStatusWorld) {
    world.config = EngineConfig::strict_workflow();
}

#[given("a project with {count:usize} tasks")]
fn project_with_tasks(world: &mut TaskStatusWorld, count: usize) -> Result<(), eyre::Report> {
    let engine = world.start_engine()?;
    let project = run_async(
        engine
            .projects()
            .create_project(CreateProjectRequest::new("Scenario project")),
    )
    .wrap_err("create project for status scenario")?;

    let mut task_ids = Vec::with_capacity(count);
    for position in 1..=count {
        let task = run_async(engine.tasks().create_task(
            &Session::anonymous(),
            CreateTaskRequest::new(project.id(), format!("Task {position}")),
        ))
        .wrap_err("create task for status scenario")?;
        task_ids.push(task.id());
    }

    world.project_id = Some(project.id());
    world.task_ids = task_ids;
    Ok(())
}

#[given(r#"task {position:usize} has been moved to "{status}""#)]
fn task_has_been_moved(
    world: &mut TaskStatusWorld,
    position: usize,
    status: String,
) -> Result<(), eyre::Report> {
    let task_id = world.task_id(position)?;
    run_async(
        world
            .engine()?
            .tasks()
            .change_status_str(&Session::anonymous(), task_id, &status),
    )
    .wrap_err("move task in scenario setup")?;
    Ok(())
}
