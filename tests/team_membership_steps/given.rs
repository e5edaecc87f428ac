//! Given steps for team membership BDD scenarios.

use super::world::{TeamMembershipWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskhive::{
    project::services::{CreateProjectRequest, CreateTaskRequest},
    team::{
        domain::TeamRole,
        services::{AddMemberRequest, CreateTeamRequest},
    },
    user::domain::UserRole,
};

fn join(world: &mut TeamMembershipWorld, username: &str, role: TeamRole) -> eyre::Result<()> {
    let user = world.register(username, UserRole::Developer)?;
    let team_id = world.team()?.id();
    let admin_id = world
        .admin
        .as_ref()
        .map(taskhive::user::domain::User::id)
        .ok_or_else(|| eyre::eyre!("missing administrator in scenario world"))?;
    let updated = run_async(
        world
            .teams
            .add_member(AddMemberRequest::new(admin_id, team_id, user.id()).with_role(role)),
    )
    .wrap_err("add member in scenario setup")?;
    world.team = Some(updated);
    Ok(())
}

#[given(r#"a team managed by project manager "{username}""#)]
fn team_managed_by(world: &mut TeamMembershipWorld, username: String) -> Result<(), eyre::Report> {
    let manager = world.register(&username, UserRole::ProjectManager)?;
    let team = run_async(
        world
            .teams
            .create_team(CreateTeamRequest::new(manager.id(), "Platform")),
    )
    .wrap_err("create team in scenario setup")?;
    let with_manager = run_async(world.teams.add_member(
        AddMemberRequest::new(manager.id(), team.id(), manager.id())
            .with_role(TeamRole::ProjectManager),
    ))
    .wrap_err("add manager to team")?;
    world.team = Some(with_manager);
    Ok(())
}

#[given(r#"a developer "{username}" in the team"#)]
fn developer_in_team(world: &mut TeamMembershipWorld, username: String) -> Result<(), eyre::Report> {
    join(world, &username, TeamRole::Developer)
}

#[given(r#"a team lead "{username}" in the team"#)]
fn team_lead_in_team(world: &mut TeamMembershipWorld, username: String) -> Result<(), eyre::Report> {
    join(world, &username, TeamRole::TeamLead)
}

#[given(r#"a developer "{username}" outside the team"#)]
fn developer_outside_team(
    world: &mut TeamMembershipWorld,
    username: String,
) -> Result<(), eyre::Report> {
    world.register(&username, UserRole::Developer)?;
    Ok(())
}

#[given("the team already has {count:usize} members")]
fn team_has_members(world: &mut TeamMembershipWorld, count: usize) -> Result<(), eyre::Report> {
    let current = world.team()?.member_count();
    for index in current..count {
        join(world, &format!("filler{index}"), TeamRole::Developer)?;
    }
    eyre::ensure!(
        world.team()?.member_count() == count,
        "team should hold {count} members"
    );
    Ok(())
}

#[given(r#""{username}" is assigned an open task"#)]
fn member_has_open_task(world: &mut TeamMembershipWorld, username: String) -> Result<(), eyre::Report> {
    let assignee = world.person(&username)?.id();
    let team_id = world.team()?.id();
    let admin_id = world
        .admin
        .as_ref()
        .map(taskhive::user::domain::User::id)
        .ok_or_else(|| eyre::eyre!("missing administrator in scenario world"))?;

    let project = run_async(
        world
            .projects
            .create_project(CreateProjectRequest::new(admin_id, team_id, "Roadmap")),
    )
    .wrap_err("create project in scenario setup")?;
    let task = run_async(
        world
            .tasks
            .create_task(CreateTaskRequest::new(admin_id, project.id(), "Open work")),
    )
    .wrap_err("create task in scenario setup")?;
    run_async(world.tasks.assign_task(admin_id, task.id(), assignee))
        .wrap_err("assign task in scenario setup")?;
    Ok(())
}
