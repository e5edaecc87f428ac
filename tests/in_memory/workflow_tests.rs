//! End-to-end flows across users, teams, projects and tasks.

use super::helpers::{Workspace, workspace};
use eyre::ensure;
use rstest::rstest;
use taskhive::{
    project::{
        domain::{ProjectStatus, TaskStatus},
        services::{
            CreateProjectRequest, CreateTaskRequest, ProjectServiceError, UpdateTaskRequest,
        },
    },
    rules::{InvariantViolation, RuleViolation},
    team::{
        domain::TeamRole,
        services::{AddMemberRequest, CreateTeamRequest, RemoveMemberRequest},
    },
    user::{domain::UserRole, services::UserDirectoryError},
};

fn is_project_finalized<T>(result: &Result<T, ProjectServiceError>) -> bool {
    matches!(
        result,
        Err(ProjectServiceError::Rule(RuleViolation::BusinessInvariantViolation(
            InvariantViolation::ProjectFinalized {
                status: ProjectStatus::Cancelled,
                ..
            }
        )))
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_runs_from_planning_to_completion(workspace: Workspace) -> eyre::Result<()> {
    let admin = workspace.admin().await?;
    let manager = workspace.register(&admin, "pm", UserRole::ProjectManager).await?;
    let developer = workspace.register(&admin, "dev", UserRole::Developer).await?;

    let team = workspace
        .teams
        .create_team(CreateTeamRequest::new(manager.id(), "Platform").with_description("Core"))
        .await?;
    workspace
        .teams
        .add_member(
            AddMemberRequest::new(manager.id(), team.id(), manager.id())
                .with_role(TeamRole::ProjectManager),
        )
        .await?;
    workspace
        .teams
        .add_member(AddMemberRequest::new(manager.id(), team.id(), developer.id()))
        .await?;

    let project = workspace
        .projects
        .create_project(CreateProjectRequest::new(manager.id(), team.id(), "Launch"))
        .await?;
    workspace
        .projects
        .change_status(manager.id(), project.id(), ProjectStatus::Active)
        .await?;

    let task = workspace
        .tasks
        .create_task(CreateTaskRequest::new(developer.id(), project.id(), "Build"))
        .await?;
    workspace
        .tasks
        .assign_task(manager.id(), task.id(), developer.id())
        .await?;
    for status in [TaskStatus::InProgress, TaskStatus::InReview, TaskStatus::Done] {
        workspace
            .tasks
            .change_status(developer.id(), task.id(), status)
            .await?;
    }

    let completed = workspace
        .projects
        .change_status(manager.id(), project.id(), ProjectStatus::Completed)
        .await?;
    ensure!(completed.status() == ProjectStatus::Completed, "project not completed");

    let late = workspace
        .tasks
        .create_task(CreateTaskRequest::new(developer.id(), project.id(), "Late"))
        .await;
    ensure!(
        matches!(
            late,
            Err(ProjectServiceError::Rule(RuleViolation::BusinessInvariantViolation(
                InvariantViolation::ProjectFinalized { .. }
            )))
        ),
        "completed project accepted a task: {late:?}"
    );

    let released = workspace
        .teams
        .remove_member(RemoveMemberRequest::new(manager.id(), team.id(), developer.id()))
        .await?;
    ensure!(!released.is_member(developer.id()), "developer still in team");

    let event_types: Vec<_> = workspace
        .events
        .published()?
        .iter()
        .map(|envelope| envelope.event().event_type())
        .collect();
    ensure!(
        event_types.first() == Some(&"user_registered"),
        "unexpected first event: {event_types:?}"
    );
    ensure!(
        event_types.last() == Some(&"member_removed"),
        "unexpected last event: {event_types:?}"
    );
    ensure!(
        event_types.iter().filter(|kind| **kind == "task_status_changed").count() == 3,
        "expected three task transitions: {event_types:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deactivated_user_keeps_assignment_but_gets_no_new_work(
    workspace: Workspace,
) -> eyre::Result<()> {
    let admin = workspace.admin().await?;
    let manager = workspace.register(&admin, "pm", UserRole::ProjectManager).await?;
    let developer = workspace.register(&admin, "dev", UserRole::Developer).await?;
    let team = workspace
        .teams
        .create_team(CreateTeamRequest::new(manager.id(), "Platform"))
        .await?;
    workspace
        .teams
        .add_member(AddMemberRequest::new(manager.id(), team.id(), developer.id()))
        .await?;
    let project = workspace
        .projects
        .create_project(CreateProjectRequest::new(manager.id(), team.id(), "Launch"))
        .await?;
    let first = workspace
        .tasks
        .create_task(CreateTaskRequest::new(manager.id(), project.id(), "First"))
        .await?;
    let second = workspace
        .tasks
        .create_task(CreateTaskRequest::new(manager.id(), project.id(), "Second"))
        .await?;
    workspace
        .tasks
        .assign_task(manager.id(), first.id(), developer.id())
        .await?;

    workspace
        .directory
        .deactivate_user(admin.id(), developer.id())
        .await?;

    let kept = workspace.tasks.find_by_id(first.id()).await?;
    ensure!(
        kept.and_then(|task| task.assignee()) == Some(developer.id()),
        "existing assignment was dropped"
    );
    let rejected = workspace
        .tasks
        .assign_task(manager.id(), second.id(), developer.id())
        .await;
    ensure!(
        matches!(
            rejected,
            Err(ProjectServiceError::Rule(RuleViolation::BusinessInvariantViolation(
                InvariantViolation::InactiveUser(id)
            ))) if id == developer.id()
        ),
        "inactive user received work: {rejected:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deactivated_actor_is_denied_everything(workspace: Workspace) -> eyre::Result<()> {
    let admin = workspace.admin().await?;
    let manager = workspace.register(&admin, "pm", UserRole::ProjectManager).await?;
    workspace
        .directory
        .deactivate_user(admin.id(), manager.id())
        .await?;

    let result = workspace
        .teams
        .create_team(CreateTeamRequest::new(manager.id(), "Ghost town"))
        .await;

    ensure!(result.is_err(), "inactive manager created a team");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cancelled_project_freezes_its_tasks(workspace: Workspace) -> eyre::Result<()> {
    let admin = workspace.admin().await?;
    let manager = workspace.register(&admin, "pm", UserRole::ProjectManager).await?;
    let developer = workspace.register(&admin, "dev", UserRole::Developer).await?;
    let team = workspace
        .teams
        .create_team(CreateTeamRequest::new(manager.id(), "Platform"))
        .await?;
    workspace
        .teams
        .add_member(AddMemberRequest::new(manager.id(), team.id(), developer.id()))
        .await?;
    let project = workspace
        .projects
        .create_project(CreateProjectRequest::new(manager.id(), team.id(), "Launch"))
        .await?;
    let assigned = workspace
        .tasks
        .create_task(CreateTaskRequest::new(developer.id(), project.id(), "Assigned"))
        .await?;
    let idle = workspace
        .tasks
        .create_task(CreateTaskRequest::new(developer.id(), project.id(), "Idle"))
        .await?;
    workspace
        .tasks
        .assign_task(manager.id(), assigned.id(), developer.id())
        .await?;

    workspace
        .projects
        .change_status(manager.id(), project.id(), ProjectStatus::Cancelled)
        .await?;

    let assign = workspace
        .tasks
        .assign_task(manager.id(), idle.id(), developer.id())
        .await;
    ensure!(is_project_finalized(&assign), "assignment accepted: {assign:?}");
    let unassign = workspace
        .tasks
        .unassign_task(manager.id(), assigned.id())
        .await;
    ensure!(is_project_finalized(&unassign), "unassignment accepted: {unassign:?}");
    let moved = workspace
        .tasks
        .change_status(developer.id(), idle.id(), TaskStatus::InProgress)
        .await;
    ensure!(is_project_finalized(&moved), "status change accepted: {moved:?}");
    let edited = workspace
        .tasks
        .update_details(UpdateTaskRequest::new(developer.id(), idle.id(), "Renamed"))
        .await;
    ensure!(is_project_finalized(&edited), "edit accepted: {edited:?}");

    let unchanged = workspace.tasks.find_by_id(idle.id()).await?;
    ensure!(
        unchanged.is_some_and(|task| {
            task.status() == TaskStatus::ToDo && task.assignee().is_none()
        }),
        "frozen task was modified"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn user_is_deleted_only_after_leaving_every_team(workspace: Workspace) -> eyre::Result<()> {
    let admin = workspace.admin().await?;
    let manager = workspace.register(&admin, "pm", UserRole::ProjectManager).await?;
    let developer = workspace.register(&admin, "dev", UserRole::Developer).await?;
    let team = workspace
        .teams
        .create_team(CreateTeamRequest::new(manager.id(), "Platform"))
        .await?;
    workspace
        .teams
        .add_member(AddMemberRequest::new(manager.id(), team.id(), developer.id()))
        .await?;
    let project = workspace
        .projects
        .create_project(CreateProjectRequest::new(manager.id(), team.id(), "Launch"))
        .await?;
    let task = workspace
        .tasks
        .create_task(CreateTaskRequest::new(developer.id(), project.id(), "Build"))
        .await?;
    workspace
        .tasks
        .assign_task(manager.id(), task.id(), developer.id())
        .await?;

    let blocked = workspace
        .directory
        .delete_user(admin.id(), developer.id())
        .await;
    ensure!(
        matches!(
            blocked,
            Err(UserDirectoryError::Rule(RuleViolation::BusinessInvariantViolation(
                InvariantViolation::UserHasMemberships { teams: 1, .. }
            )))
        ),
        "member with open work was deleted: {blocked:?}"
    );

    for status in [TaskStatus::InProgress, TaskStatus::Done] {
        workspace
            .tasks
            .change_status(developer.id(), task.id(), status)
            .await?;
    }
    workspace
        .teams
        .remove_member(RemoveMemberRequest::new(manager.id(), team.id(), developer.id()))
        .await?;
    workspace
        .directory
        .delete_user(admin.id(), developer.id())
        .await?;

    ensure!(
        workspace.directory.find_by_id(developer.id()).await?.is_none(),
        "user still present after deletion"
    );
    Ok(())
}
