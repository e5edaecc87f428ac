//! Domain events raised by successful state changes.

use crate::{
    project::domain::{ProjectId, ProjectStatus, TaskId, TaskStatus},
    team::domain::{TeamId, TeamRole, TeamStatus},
    user::domain::{UserId, UserRole, UserStatus},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A committed change to an aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A user account was created.
    UserRegistered {
        /// The new user.
        user_id: UserId,
        /// The granted role.
        role: UserRole,
    },
    /// A user's system role changed.
    UserRoleChanged {
        /// The affected user.
        user_id: UserId,
        /// Role before the change.
        from: UserRole,
        /// Role after the change.
        to: UserRole,
    },
    /// A user account was activated or deactivated.
    UserStatusChanged {
        /// The affected user.
        user_id: UserId,
        /// The new status.
        status: UserStatus,
    },
    /// A user account was deleted.
    UserDeleted {
        /// The deleted user.
        user_id: UserId,
    },
    /// A team was created.
    TeamCreated {
        /// The new team.
        team_id: TeamId,
    },
    /// A team changed status.
    TeamStatusChanged {
        /// The team.
        team_id: TeamId,
        /// The new status.
        status: TeamStatus,
    },
    /// A user joined a team.
    MemberAdded {
        /// The team.
        team_id: TeamId,
        /// The new member.
        user_id: UserId,
        /// The member's team role.
        role: TeamRole,
    },
    /// A user left a team.
    MemberRemoved {
        /// The team.
        team_id: TeamId,
        /// The former member.
        user_id: UserId,
    },
    /// A project was created.
    ProjectCreated {
        /// The new project.
        project_id: ProjectId,
        /// The owning team.
        team_id: TeamId,
    },
    /// A project changed status.
    ProjectStatusChanged {
        /// The project.
        project_id: ProjectId,
        /// The new status.
        status: ProjectStatus,
    },
    /// A task or subtask was created.
    TaskCreated {
        /// The new task.
        task_id: TaskId,
        /// The owning project.
        project_id: ProjectId,
        /// The parent, for subtasks.
        parent_id: Option<TaskId>,
    },
    /// A task was assigned.
    TaskAssigned {
        /// The task.
        task_id: TaskId,
        /// The assignee.
        assignee: UserId,
    },
    /// A task lost its assignee.
    TaskUnassigned {
        /// The task.
        task_id: TaskId,
        /// The former assignee.
        previous: UserId,
    },
    /// A task changed status.
    TaskStatusChanged {
        /// The task.
        task_id: TaskId,
        /// The new status.
        status: TaskStatus,
    },
}

impl DomainEvent {
    /// Returns the snake_case event type name.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::UserRegistered { .. } => "user_registered",
            Self::UserRoleChanged { .. } => "user_role_changed",
            Self::UserStatusChanged { .. } => "user_status_changed",
            Self::UserDeleted { .. } => "user_deleted",
            Self::TeamCreated { .. } => "team_created",
            Self::TeamStatusChanged { .. } => "team_status_changed",
            Self::MemberAdded { .. } => "member_added",
            Self::MemberRemoved { .. } => "member_removed",
            Self::ProjectCreated { .. } => "project_created",
            Self::ProjectStatusChanged { .. } => "project_status_changed",
            Self::TaskCreated { .. } => "task_created",
            Self::TaskAssigned { .. } => "task_assigned",
            Self::TaskUnassigned { .. } => "task_unassigned",
            Self::TaskStatusChanged { .. } => "task_status_changed",
        }
    }
}

/// A domain event with delivery metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope {
    event_id: Uuid,
    actor_id: UserId,
    occurred_at: DateTime<Utc>,
    event: DomainEvent,
}

impl EventEnvelope {
    /// Wraps `event` raised by `actor_id` at the clock's current time.
    #[must_use]
    pub fn new(event: DomainEvent, actor_id: UserId, clock: &impl Clock) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            actor_id,
            occurred_at: clock.utc(),
            event,
        }
    }

    /// Returns the unique event identifier.
    #[must_use]
    pub const fn event_id(&self) -> Uuid {
        self.event_id
    }

    /// Returns the user whose request raised the event.
    #[must_use]
    pub const fn actor_id(&self) -> UserId {
        self.actor_id
    }

    /// Returns when the change was committed.
    #[must_use]
    pub const fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    /// Returns the wrapped event.
    #[must_use]
    pub const fn event(&self) -> &DomainEvent {
        &self.event
    }

    /// Renders the envelope as JSON.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if serialization fails.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
