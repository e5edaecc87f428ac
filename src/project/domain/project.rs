//! Project aggregate root.

use super::{ProjectId, ProjectStatus};
use crate::{
    naming::Name,
    rules::{LifecycleStatus, RuleViolation, ensure_project_open, ensure_transition},
    team::domain::TeamId,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Project aggregate root. Tasks reference their project by identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    team_id: TeamId,
    name: Name,
    description: Option<String>,
    status: ProjectStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted project aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Persisted owning team.
    pub team_id: TeamId,
    /// Persisted project name.
    pub name: Name,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted lifecycle status.
    pub status: ProjectStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Creates a new project in [`ProjectStatus::Planning`] owned by
    /// `team_id`.
    #[must_use]
    pub fn new(
        team_id: TeamId,
        name: Name,
        description: Option<String>,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: ProjectId::new(),
            team_id,
            name,
            description,
            status: ProjectStatus::Planning,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            team_id: data.team_id,
            name: data.name,
            description: data.description,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the owning team.
    #[must_use]
    pub const fn team_id(&self) -> TeamId {
        self.team_id
    }

    /// Returns the project name.
    #[must_use]
    pub const fn name(&self) -> &Name {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Returns `true` once the project is completed or cancelled.
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

    /// Checks that the project and its tasks still accept changes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::rules::InvariantViolation::ProjectFinalized`] for
    /// finalized projects.
    pub fn ensure_accepts_changes(&self) -> Result<(), RuleViolation> {
        ensure_project_open(self.id, self.status)
    }

    /// Replaces the project's name and description.
    ///
    /// # Errors
    ///
    /// Returns [`crate::rules::InvariantViolation::ProjectFinalized`] for
    /// finalized projects.
    pub fn update_details(
        &mut self,
        name: Name,
        description: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), RuleViolation> {
        self.ensure_accepts_changes()?;
        self.name = name;
        self.description = description;
        self.touch(clock);
        Ok(())
    }

    /// Moves the project to `target` status.
    ///
    /// Moving to the current status is a no-op and leaves `updated_at`
    /// unchanged. Whether the project's tasks allow completion is checked by
    /// the caller through [`crate::rules::ensure_project_completable`].
    ///
    /// # Errors
    ///
    /// Returns [`RuleViolation::InvalidTransition`] when the project status
    /// graph does not permit the move.
    pub fn transition_to(
        &mut self,
        target: ProjectStatus,
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
