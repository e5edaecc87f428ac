//! Task aggregate root.

use super::{Project, ProjectId, TaskId, TaskPriority, TaskStatus};
use crate::{
    naming::Name,
    rules::{
        InvariantViolation, LifecycleStatus, RuleViolation, ensure_assignable, ensure_task_open,
        ensure_transition,
    },
    team::domain::Team,
    user::domain::{User, UserId},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Editable content of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Task title.
    pub title: Name,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Urgency.
    pub priority: TaskPriority,
}

impl TaskDraft {
    /// Creates a draft with the given title, no description and medium
    /// priority.
    #[must_use]
    pub fn new(title: Name) -> Self {
        Self {
            title,
            description: None,
            priority: TaskPriority::default(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }
}

/// Task aggregate root.
///
/// A task belongs to one project and may be a subtask of another task in the
/// same project. Only one level of nesting is permitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    parent_id: Option<TaskId>,
    title: Name,
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    assignee: Option<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owning project.
    pub project_id: ProjectId,
    /// Persisted parent task, for subtasks.
    pub parent_id: Option<TaskId>,
    /// Persisted title.
    pub title: Name,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted assignee, if any.
    pub assignee: Option<UserId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a top-level task in `project`.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantViolation::ProjectFinalized`] when the project no
    /// longer accepts changes.
    pub fn new(
        project: &Project,
        draft: TaskDraft,
        clock: &impl Clock,
    ) -> Result<Self, RuleViolation> {
        project.ensure_accepts_changes()?;
        Ok(Self::build(project.id(), None, draft, clock))
    }

    /// Creates a subtask of `parent` in `project`.
    ///
    /// # Errors
    ///
    /// Returns a [`RuleViolation::BusinessInvariantViolation`] when the
    /// project is finalized, the parent belongs to another project, the
    /// parent is itself a subtask, or the parent is finalized.
    pub fn new_subtask(
        project: &Project,
        parent: &Self,
        draft: TaskDraft,
        clock: &impl Clock,
    ) -> Result<Self, RuleViolation> {
        project.ensure_accepts_changes()?;
        if parent.project_id != project.id() {
            return Err(InvariantViolation::ParentInOtherProject {
                parent_id: parent.id,
                project_id: project.id(),
            }
            .into());
        }
        if parent.is_subtask() {
            return Err(InvariantViolation::SubtaskNesting(parent.id).into());
        }
        ensure_task_open(parent.id, parent.status)?;
        Ok(Self::build(project.id(), Some(parent.id), draft, clock))
    }

    fn build(
        project_id: ProjectId,
        parent_id: Option<TaskId>,
        draft: TaskDraft,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            project_id,
            parent_id,
            title: draft.title,
            description: draft.description,
            status: TaskStatus::ToDo,
            priority: draft.priority,
            assignee: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            parent_id: data.parent_id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            assignee: data.assignee,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the parent task for subtasks.
    #[must_use]
    pub const fn parent_id(&self) -> Option<TaskId> {
        self.parent_id
    }

    /// Returns `true` when the task is a subtask.
    #[must_use]
    pub const fn is_subtask(&self) -> bool {
        self.parent_id.is_some()
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &Name {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the assigned user, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<UserId> {
        self.assignee
    }

    /// Returns `true` once the task is done or cancelled.
    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.status.is_terminal()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the task's title, description and priority.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantViolation::TaskFinalized`] for finalized tasks.
    pub fn update_details(&mut self, draft: TaskDraft, clock: &impl Clock) -> Result<(), RuleViolation> {
        ensure_task_open(self.id, self.status)?;
        self.title = draft.title;
        self.description = draft.description;
        self.priority = draft.priority;
        self.touch(clock);
        Ok(())
    }

    /// Assigns the task to `assignee`.
    ///
    /// `team` must be the team owning the task's project.
    ///
    /// # Errors
    ///
    /// Returns a [`RuleViolation::BusinessInvariantViolation`] when the task
    /// is finalized, the assignee is inactive, or the assignee is not a
    /// member of `team`.
    pub fn assign(
        &mut self,
        assignee: &User,
        team: &Team,
        clock: &impl Clock,
    ) -> Result<(), RuleViolation> {
        ensure_assignable(
            self.id,
            self.status,
            team.id(),
            assignee.id(),
            assignee.status(),
            team.is_member(assignee.id()),
        )?;
        if self.assignee != Some(assignee.id()) {
            self.assignee = Some(assignee.id());
            self.touch(clock);
        }
        Ok(())
    }

    /// Clears the assignee and returns the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantViolation::TaskFinalized`] for finalized tasks.
    pub fn unassign(&mut self, clock: &impl Clock) -> Result<Option<UserId>, RuleViolation> {
        ensure_task_open(self.id, self.status)?;
        let previous = self.assignee.take();
        if previous.is_some() {
            self.touch(clock);
        }
        Ok(previous)
    }

    /// Moves the task to `target` status.
    ///
    /// Moving to the current status is a no-op and leaves `updated_at`
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`RuleViolation::InvalidTransition`] when the task status
    /// graph does not permit the move.
    pub fn transition_to(
        &mut self,
        target: TaskStatus,
        clock: &impl Clock,
    ) -> Result<(), RuleViolation> {
        ensure_transition(self.status, target)?;
        if self.status != target {
            self.status = target;
            self.touch(clock);
        }
        Ok(())
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
