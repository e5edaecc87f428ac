//! Aggregate consistency rules over primitive inputs.
//!
//! Aggregates call these while applying changes; services call them for
//! checks spanning several aggregates.

use super::{InvariantViolation, LifecycleStatus, RuleViolation};
use crate::{
    project::domain::{ProjectId, ProjectStatus, TaskId, TaskStatus},
    team::domain::{TeamId, TeamStatus},
    user::domain::{UserId, UserStatus},
};

/// Requires an active user account.
///
/// # Errors
///
/// Returns [`InvariantViolation::InactiveUser`] for inactive accounts.
pub fn ensure_user_active(user_id: UserId, status: UserStatus) -> Result<(), RuleViolation> {
    match status {
        UserStatus::Active => Ok(()),
        UserStatus::Inactive => Err(InvariantViolation::InactiveUser(user_id).into()),
    }
}

/// Requires a team that can take on new members or projects.
///
/// # Errors
///
/// Returns [`InvariantViolation::TeamNotActive`] unless the team is active.
pub fn ensure_team_active(team_id: TeamId, status: TeamStatus) -> Result<(), RuleViolation> {
    if status == TeamStatus::Active {
        return Ok(());
    }
    Err(InvariantViolation::TeamNotActive(team_id).into())
}

/// Requires spare capacity in a team holding `member_count` members.
///
/// # Errors
///
/// Returns [`InvariantViolation::TeamAtCapacity`] when the team is full.
pub fn ensure_team_capacity(
    team_id: TeamId,
    member_count: usize,
    capacity: usize,
) -> Result<(), RuleViolation> {
    if member_count < capacity {
        return Ok(());
    }
    Err(InvariantViolation::TeamAtCapacity { team_id, capacity }.into())
}

/// Requires that a departing member holds no unfinished task assignments in
/// the team's projects.
///
/// # Errors
///
/// Returns [`InvariantViolation::MemberHasOpenTasks`] when `open_tasks` is
/// non-zero.
pub fn ensure_no_open_assignments(
    team_id: TeamId,
    user_id: UserId,
    open_tasks: usize,
) -> Result<(), RuleViolation> {
    if open_tasks == 0 {
        return Ok(());
    }
    Err(InvariantViolation::MemberHasOpenTasks {
        team_id,
        user_id,
        open_tasks,
    }
    .into())
}

/// Requires that a user about to be deleted belongs to no team.
///
/// # Errors
///
/// Returns [`InvariantViolation::UserHasMemberships`] when `team_count` is
/// non-zero.
pub const fn ensure_no_memberships(
    user_id: UserId,
    team_count: usize,
) -> Result<(), RuleViolation> {
    if team_count == 0 {
        return Ok(());
    }
    Err(RuleViolation::BusinessInvariantViolation(
        InvariantViolation::UserHasMemberships {
            user_id,
            teams: team_count,
        },
    ))
}

/// Requires a project that still accepts structural changes.
///
/// # Errors
///
/// Returns [`InvariantViolation::ProjectFinalized`] for completed or
/// cancelled projects.
pub fn ensure_project_open(project_id: ProjectId, status: ProjectStatus) -> Result<(), RuleViolation> {
    if status.is_terminal() {
        return Err(InvariantViolation::ProjectFinalized { project_id, status }.into());
    }
    Ok(())
}

/// Requires that every task of a project is finished before completion.
///
/// # Errors
///
/// Returns [`InvariantViolation::ProjectHasOpenTasks`] when `open_tasks` is
/// non-zero.
pub fn ensure_project_completable(
    project_id: ProjectId,
    open_tasks: usize,
) -> Result<(), RuleViolation> {
    if open_tasks == 0 {
        return Ok(());
    }
    Err(InvariantViolation::ProjectHasOpenTasks {
        project_id,
        open_tasks,
    }
    .into())
}

/// Requires a task that still accepts structural changes.
///
/// # Errors
///
/// Returns [`InvariantViolation::TaskFinalized`] for done or cancelled tasks.
pub fn ensure_task_open(task_id: TaskId, status: TaskStatus) -> Result<(), RuleViolation> {
    if status.is_terminal() {
        return Err(InvariantViolation::TaskFinalized { task_id, status }.into());
    }
    Ok(())
}

/// Checks the task-side and assignee-side conditions of an assignment.
///
/// The task must not be finalized, and the assignee must be active and a
/// member of the team owning the task's project.
///
/// # Errors
///
/// Returns the first [`InvariantViolation`] found, checked in that order.
pub fn ensure_assignable(
    task_id: TaskId,
    task_status: TaskStatus,
    team_id: TeamId,
    assignee_id: UserId,
    assignee_status: UserStatus,
    assignee_in_team: bool,
) -> Result<(), RuleViolation> {
    ensure_task_open(task_id, task_status)?;
    ensure_user_active(assignee_id, assignee_status)?;
    if assignee_in_team {
        return Ok(());
    }
    Err(InvariantViolation::NotTeamMember {
        team_id,
        user_id: assignee_id,
    }
    .into())
}
