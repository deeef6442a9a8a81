//! When steps for task status BDD scenarios.

use super::world::{TaskStatusWorld, run_async};
use rstest_bdd_macros::when;
use synergysphere::session::Session;

#[when(r#"task {position:usize} is moved to "{status}""#)]
fn move_task(
    world: &mut TaskStatusWorld,
    position: usize,
    status: String,
) -> Result<(), eyre::Report> {
    let task_id = world.task_id(position)?;
    let result = run_async(
        world
            .engine()?
            .tasks()
            .change_status_str(&Session::anonymous(), task_id, &status),
    );
    world.last_move_result = Some(result);
    Ok(())
}
