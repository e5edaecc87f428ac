//! When steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, run_async};
use rstest_bdd_macros::when;
use taskhive::{
    project::{
        domain::{Task, TaskStatus},
        services::ProjectServiceError,
    },
    user::domain::{User, UserId},
};

fn record(world: &mut TaskLifecycleWorld, result: Result<Task, ProjectServiceError>) {
    if let Ok(ref updated) = result {
        world.task = Some(updated.clone());
    }
    world.last_result = Some(result);
}

fn assign_to(world: &mut TaskLifecycleWorld, assignee: UserId) -> Result<(), eyre::Report> {
    let manager = world.cast()?.manager.id();
    let task_id = world.task()?.id();
    let result = run_async(world.tasks.assign_task(manager, task_id, assignee));
    record(world, result);
    Ok(())
}

#[when(r#"the developer moves the task to "{status}""#)]
fn developer_moves_task(world: &mut TaskLifecycleWorld, status: String) -> Result<(), eyre::Report> {
    let target = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let developer = world.cast()?.developer.id();
    let task_id = world.task()?.id();
    let result = run_async(world.tasks.change_status(developer, task_id, target));
    record(world, result);
    Ok(())
}

#[when("the manager assigns the task to the developer")]
fn manager_assigns_developer(world: &mut TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let developer = world.cast()?.developer.id();
    assign_to(world, developer)
}

#[when("the manager assigns the task to the outsider")]
fn manager_assigns_outsider(world: &mut TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let outsider = world
        .cast()?
        .outsider
        .as_ref()
        .map(User::id)
        .ok_or_else(|| eyre::eyre!("missing outsider in scenario world"))?;
    assign_to(world, outsider)
}
