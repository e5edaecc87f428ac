//! Rule violation types shared by every aggregate.

use super::Operation;
use crate::{
    project::domain::{ProjectId, ProjectStatus, TaskId, TaskStatus},
    team::domain::TeamId,
    user::domain::{UserId, UserRole},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Aggregate kind named in transition errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A user account.
    User,
    /// A team.
    Team,
    /// A project.
    Project,
    /// A task or subtask.
    Task,
}

impl EntityKind {
    /// Returns the lowercase display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Team => "team",
            Self::Project => "project",
            Self::Task => "task",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The privilege an actor was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivilegeRequirement {
    /// The operation needs at least this system role.
    MinimumRole(UserRole),
    /// The actor must strictly outrank a user holding this role.
    Outrank(UserRole),
    /// The operation needs system privileges or a managing role in the team.
    TeamManager,
    /// The actor's own account must be active.
    ActiveAccount,
}

impl fmt::Display for PrivilegeRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinimumRole(role) => write!(f, "requires at least the {role} role"),
            Self::Outrank(role) => write!(f, "requires outranking the {role} role"),
            Self::TeamManager => f.write_str("requires team management rights"),
            Self::ActiveAccount => f.write_str("requires an active account"),
        }
    }
}

/// A business invariant that a proposed change would break.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The actor attempted a self-directed operation that is forbidden.
    #[error("user {user_id} may not {operation} when targeting their own account")]
    SelfTargeting {
        /// The acting and targeted user.
        user_id: UserId,
        /// The forbidden operation.
        operation: Operation,
    },

    /// The user is inactive and cannot join teams or receive work.
    #[error("user {0} is inactive")]
    InactiveUser(UserId),

    /// The user still belongs to teams and cannot be deleted.
    #[error("user {user_id} still belongs to {teams} team(s)")]
    UserHasMemberships {
        /// The user being deleted.
        user_id: UserId,
        /// Number of teams the user belongs to.
        teams: usize,
    },

    /// The team has no spare capacity.
    #[error("team {team_id} is at capacity ({capacity} members)")]
    TeamAtCapacity {
        /// The full team.
        team_id: TeamId,
        /// The configured member cap.
        capacity: usize,
    },

    /// The user already belongs to the team.
    #[error("user {user_id} is already a member of team {team_id}")]
    AlreadyMember {
        /// The team.
        team_id: TeamId,
        /// The existing member.
        user_id: UserId,
    },

    /// The user does not belong to the team.
    #[error("user {user_id} is not a member of team {team_id}")]
    NotTeamMember {
        /// The team.
        team_id: TeamId,
        /// The outsider.
        user_id: UserId,
    },

    /// The team is not active and accepts no new members or projects.
    #[error("team {0} is not active")]
    TeamNotActive(TeamId),

    /// The team is archived and accepts no structural changes.
    #[error("team {0} is archived")]
    TeamArchived(TeamId),

    /// The member still holds unfinished tasks in the team's projects.
    #[error("user {user_id} still has {open_tasks} unfinished task(s) in team {team_id}")]
    MemberHasOpenTasks {
        /// The team.
        team_id: TeamId,
        /// The member being removed.
        user_id: UserId,
        /// Number of unfinished assignments.
        open_tasks: usize,
    },

    /// The project is finalized and accepts no structural changes.
    #[error("project {project_id} is {status} and accepts no changes")]
    ProjectFinalized {
        /// The project.
        project_id: ProjectId,
        /// Its terminal status.
        status: ProjectStatus,
    },

    /// The project still has unfinished tasks and cannot be completed.
    #[error("project {project_id} still has {open_tasks} unfinished task(s)")]
    ProjectHasOpenTasks {
        /// The project.
        project_id: ProjectId,
        /// Number of unfinished tasks.
        open_tasks: usize,
    },

    /// The task is finalized and accepts no structural changes.
    #[error("task {task_id} is {status} and accepts no changes")]
    TaskFinalized {
        /// The task.
        task_id: TaskId,
        /// Its terminal status.
        status: TaskStatus,
    },

    /// The parent is itself a subtask; only one level of nesting is allowed.
    #[error("task {0} is a subtask and cannot have subtasks")]
    SubtaskNesting(TaskId),

    /// The parent task belongs to another project.
    #[error("parent task {parent_id} does not belong to project {project_id}")]
    ParentInOtherProject {
        /// The parent task.
        parent_id: TaskId,
        /// The project the subtask was created in.
        project_id: ProjectId,
    },
}

/// Denial returned by every domain rule.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RuleViolation {
    /// The status pair is not an edge of the entity's transition graph.
    #[error("invalid {entity} status transition from {from} to {to}")]
    InvalidTransition {
        /// The kind of aggregate.
        entity: EntityKind,
        /// Current status.
        from: &'static str,
        /// Requested status.
        to: &'static str,
    },

    /// The actor lacks the privilege the operation needs.
    #[error("user {actor_id} ({actor_role}) may not {operation}: {requirement}")]
    InsufficientPrivilege {
        /// The acting user.
        actor_id: UserId,
        /// The actor's system role.
        actor_role: UserRole,
        /// The attempted operation.
        operation: Operation,
        /// The missing privilege.
        requirement: PrivilegeRequirement,
    },

    /// A business invariant would be broken.
    #[error(transparent)]
    BusinessInvariantViolation(#[from] InvariantViolation),
}
