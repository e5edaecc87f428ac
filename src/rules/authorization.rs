//! Role-based authorization rules.
//!
//! Every operation is gated by a minimum system role. Operations that target
//! another user's account additionally require the actor to strictly
//! outrank the target, and deactivation or deletion may never target the
//! actor's own account. Team-scoped operations are also open to members who
//! hold a managing role within that team.

use super::{InvariantViolation, PrivilegeRequirement, RuleViolation};
use crate::{
    team::domain::TeamRole,
    user::domain::{UserId, UserRole, UserStatus},
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operations subject to authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Register a new user account.
    CreateUser,
    /// Change another user's system role.
    ModifyRole,
    /// Deactivate a user account.
    DeactivateUser,
    /// Reactivate a user account.
    ActivateUser,
    /// Delete a user account.
    DeleteUser,
    /// Create teams, change their status, or manage their members.
    ManageTeam,
    /// Create projects or change their details and status.
    ManageProject,
    /// Create tasks and subtasks.
    CreateTask,
    /// Edit tasks or move them through their lifecycle.
    UpdateTask,
    /// Assign or unassign tasks.
    AssignTask,
    /// Read users, teams, projects and tasks.
    ViewResources,
}

impl Operation {
    /// Returns the least privileged system role allowed to perform the
    /// operation.
    #[must_use]
    pub const fn min_role(self) -> UserRole {
        match self {
            Self::CreateUser
            | Self::ModifyRole
            | Self::DeactivateUser
            | Self::ActivateUser
            | Self::DeleteUser => UserRole::Admin,
            Self::ManageTeam | Self::ManageProject | Self::AssignTask => UserRole::ProjectManager,
            Self::CreateTask | Self::UpdateTask => UserRole::Developer,
            Self::ViewResources => UserRole::Viewer,
        }
    }

    /// Returns `true` for operations that may never target the actor's own
    /// account.
    #[must_use]
    pub const fn forbids_self_target(self) -> bool {
        matches!(self, Self::DeactivateUser | Self::DeleteUser)
    }

    /// Returns a short verb phrase describing the operation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateUser => "create users",
            Self::ModifyRole => "modify roles",
            Self::DeactivateUser => "deactivate users",
            Self::ActivateUser => "activate users",
            Self::DeleteUser => "delete users",
            Self::ManageTeam => "manage teams",
            Self::ManageProject => "manage projects",
            Self::CreateTask => "create tasks",
            Self::UpdateTask => "update tasks",
            Self::AssignTask => "assign tasks",
            Self::ViewResources => "view resources",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user performing an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    id: UserId,
    role: UserRole,
    status: UserStatus,
}

impl Actor {
    /// Creates an actor from its identity, role and account status.
    #[must_use]
    pub const fn new(id: UserId, role: UserRole, status: UserStatus) -> Self {
        Self { id, role, status }
    }

    /// Returns the acting user's identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the acting user's system role.
    #[must_use]
    pub const fn role(&self) -> UserRole {
        self.role
    }

    /// Returns `true` when the acting account is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    const fn denied(&self, operation: Operation, requirement: PrivilegeRequirement) -> RuleViolation {
        RuleViolation::InsufficientPrivilege {
            actor_id: self.id,
            actor_role: self.role,
            operation,
            requirement,
        }
    }
}

/// Returns `true` when `actor` strictly outranks `target` in the role
/// hierarchy.
#[must_use]
pub const fn has_sufficient_privileges(actor: UserRole, target: UserRole) -> bool {
    actor.level() > target.level()
}

/// Returns `true` when `role` meets the operation's minimum role.
#[must_use]
pub const fn role_permits(role: UserRole, operation: Operation) -> bool {
    role.level() >= operation.min_role().level()
}

/// Checks that the actor may perform `operation` at all.
///
/// # Errors
///
/// Returns [`RuleViolation::InsufficientPrivilege`] when the actor is
/// inactive or below the operation's minimum role.
pub fn ensure_permitted(actor: &Actor, operation: Operation) -> Result<(), RuleViolation> {
    ensure_active_actor(actor, operation)?;
    if role_permits(actor.role, operation) {
        return Ok(());
    }
    Err(actor.denied(
        operation,
        PrivilegeRequirement::MinimumRole(operation.min_role()),
    ))
}

/// Checks that the actor may perform a cross-user `operation` on the
/// account identified by `target_id`, which currently holds `target_role`.
///
/// Self-targeting is rejected first for deactivation and deletion, whatever
/// the actor's role.
///
/// # Errors
///
/// Returns [`InvariantViolation::SelfTargeting`] for forbidden
/// self-targeting, or [`RuleViolation::InsufficientPrivilege`] when the actor
/// lacks the minimum role or does not strictly outrank the target.
pub fn ensure_can_target(
    actor: &Actor,
    target_id: UserId,
    target_role: UserRole,
    operation: Operation,
) -> Result<(), RuleViolation> {
    if operation.forbids_self_target() && actor.id == target_id {
        return Err(InvariantViolation::SelfTargeting {
            user_id: actor.id,
            operation,
        }
        .into());
    }

    ensure_permitted(actor, operation)?;

    if has_sufficient_privileges(actor.role, target_role) {
        return Ok(());
    }
    Err(actor.denied(operation, PrivilegeRequirement::Outrank(target_role)))
}

/// Checks that the actor may hand out `role`, either to a new account or as
/// a role change.
///
/// Administrators may grant any role; everyone else must strictly outrank
/// the granted role.
///
/// # Errors
///
/// Returns [`RuleViolation::InsufficientPrivilege`] when the grant exceeds
/// the actor's authority.
pub fn ensure_can_grant_role(
    actor: &Actor,
    role: UserRole,
    operation: Operation,
) -> Result<(), RuleViolation> {
    if actor.role == UserRole::Admin || has_sufficient_privileges(actor.role, role) {
        return Ok(());
    }
    Err(actor.denied(operation, PrivilegeRequirement::Outrank(role)))
}

/// Checks a team-scoped operation.
///
/// The actor is allowed when their system role meets the operation's
/// minimum, or when `team_role` (the actor's role within the team, if any)
/// is a managing role.
///
/// # Errors
///
/// Returns [`RuleViolation::InsufficientPrivilege`] when the actor is
/// inactive or has neither kind of privilege.
pub fn ensure_team_privilege(
    actor: &Actor,
    team_role: Option<TeamRole>,
    operation: Operation,
) -> Result<(), RuleViolation> {
    ensure_active_actor(actor, operation)?;
    let manages_team = team_role.is_some_and(TeamRole::can_manage_team);
    if role_permits(actor.role, operation) || manages_team {
        return Ok(());
    }
    Err(actor.denied(operation, PrivilegeRequirement::TeamManager))
}

fn ensure_active_actor(actor: &Actor, operation: Operation) -> Result<(), RuleViolation> {
    if actor.is_active() {
        return Ok(());
    }
    Err(actor.denied(operation, PrivilegeRequirement::ActiveAccount))
}
