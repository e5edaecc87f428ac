//! Given steps for task lifecycle BDD scenarios.

use super::world::{Cast, TaskLifecycleWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskhive::{
    project::{
        domain::{ProjectStatus, TaskStatus},
        services::{CreateProjectRequest, CreateTaskRequest},
    },
    team::{
        domain::TeamRole,
        services::{AddMemberRequest, CreateTeamRequest},
    },
    user::{
        domain::{User, UserRole},
        services::{BootstrapAdminRequest, RegisterUserRequest},
    },
};

fn register(
    world: &TaskLifecycleWorld,
    admin: &User,
    username: &str,
    role: UserRole,
) -> eyre::Result<User> {
    let request = RegisterUserRequest::new(
        admin.id(),
        username,
        format!("{username}@example.com"),
        format!("hash-{username}"),
    )
    .with_role(role);
    run_async(world.directory.register_user(request)).wrap_err("register scenario user")
}

fn move_task(world: &mut TaskLifecycleWorld, status: &str) -> eyre::Result<()> {
    let target = TaskStatus::try_from(status)
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let developer = world.cast()?.developer.id();
    let task_id = world.task()?.id();
    let moved = run_async(world.tasks.change_status(developer, task_id, target))
        .wrap_err("move task in scenario setup")?;
    world.task = Some(moved);
    Ok(())
}

#[given("a project with a task assigned to a team developer")]
fn project_with_assigned_task(world: &mut TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let admin = run_async(world.directory.bootstrap_admin(BootstrapAdminRequest::new(
        "root",
        "root@example.com",
        "hash-root",
    )))
    .wrap_err("bootstrap administrator")?;
    let manager = register(world, &admin, "pat", UserRole::ProjectManager)?;
    let developer = register(world, &admin, "dana", UserRole::Developer)?;

    let team = run_async(
        world
            .teams
            .create_team(CreateTeamRequest::new(manager.id(), "Platform")),
    )
    .wrap_err("create team")?;
    run_async(world.teams.add_member(
        AddMemberRequest::new(manager.id(), team.id(), developer.id())
            .with_role(TeamRole::Developer),
    ))
    .wrap_err("add developer")?;
    let project = run_async(
        world
            .projects
            .create_project(CreateProjectRequest::new(manager.id(), team.id(), "Launch")),
    )
    .wrap_err("create project")?;
    let task = run_async(
        world
            .tasks
            .create_task(CreateTaskRequest::new(developer.id(), project.id(), "Build")),
    )
    .wrap_err("create task")?;
    let assigned = run_async(world.tasks.assign_task(manager.id(), task.id(), developer.id()))
        .wrap_err("assign task")?;

    world.task = Some(assigned);
    world.cast = Some(Cast {
        admin,
        manager,
        developer,
        outsider: None,
    });
    Ok(())
}

#[given(r#"the task has been moved to "{status}""#)]
fn task_moved_to(world: &mut TaskLifecycleWorld, status: String) -> Result<(), eyre::Report> {
    move_task(world, &status)
}

#[given(r#"the task has been moved through "{first}" to "{second}""#)]
fn task_moved_through(
    world: &mut TaskLifecycleWorld,
    first: String,
    second: String,
) -> Result<(), eyre::Report> {
    move_task(world, &first)?;
    move_task(world, &second)
}

#[given("a developer outside the team")]
fn developer_outside_team(world: &mut TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let admin = world.cast()?.admin.clone();
    let outsider = register(world, &admin, "olly", UserRole::Developer)?;
    let cast = world
        .cast
        .as_mut()
        .ok_or_else(|| eyre::eyre!("missing participants in scenario world"))?;
    cast.outsider = Some(outsider);
    Ok(())
}

#[given("the project has been cancelled")]
fn project_cancelled(world: &mut TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let manager = world.cast()?.manager.id();
    let project_id = world.task()?.project_id();
    run_async(
        world
            .projects
            .change_status(manager, project_id, ProjectStatus::Cancelled),
    )
    .wrap_err("cancel project in scenario setup")?;
    Ok(())
}
