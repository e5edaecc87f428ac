//! Team aggregate root.

use super::{TeamId, TeamMember, TeamRole, TeamStatus};
use crate::{
    naming::Name,
    rules::{
        InvariantViolation, RuleViolation, ensure_no_open_assignments, ensure_team_active,
        ensure_team_capacity, ensure_transition, ensure_user_active,
    },
    user::domain::{User, UserId},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Team aggregate root owning a bounded member collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    id: TeamId,
    name: Name,
    description: Option<String>,
    status: TeamStatus,
    members: Vec<TeamMember>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted team aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTeamData {
    /// Persisted team identifier.
    pub id: TeamId,
    /// Persisted team name.
    pub name: Name,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted lifecycle status.
    pub status: TeamStatus,
    /// Persisted membership records.
    pub members: Vec<TeamMember>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Team {
    /// Creates a new active team with no members.
    #[must_use]
    pub fn new(name: Name, description: Option<String>, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TeamId::new(),
            name,
            description,
            status: TeamStatus::Active,
            members: Vec::new(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a team from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTeamData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            status: data.status,
            members: data.members,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the team identifier.
    #[must_use]
    pub const fn id(&self) -> TeamId {
        self.id
    }

    /// Returns the team name.
    #[must_use]
    pub const fn name(&self) -> &Name {
        &self.name
    }

    /// Returns the team description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TeamStatus {
        self.status
    }

    /// Returns the membership records in joining order.
    #[must_use]
    pub fn members(&self) -> &[TeamMember] {
        &self.members
    }

    /// Returns the number of members.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Returns the membership record for `user_id`, if the user belongs to
    /// the team.
    #[must_use]
    pub fn member(&self, user_id: UserId) -> Option<&TeamMember> {
        self.members
            .iter()
            .find(|member| member.user_id() == user_id)
    }

    /// Returns `true` when `user_id` belongs to the team.
    #[must_use]
    pub fn is_member(&self, user_id: UserId) -> bool {
        self.member(user_id).is_some()
    }

    /// Returns the role `user_id` holds in the team, if any.
    #[must_use]
    pub fn role_of(&self, user_id: UserId) -> Option<TeamRole> {
        self.member(user_id).map(TeamMember::role)
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

    /// Adds `candidate` to the team with the given team role.
    ///
    /// # Errors
    ///
    /// Returns a [`RuleViolation::BusinessInvariantViolation`] when the team
    /// is not active, the candidate is inactive, the candidate is already a
    /// member, or the team already holds `capacity` members.
    pub fn add_member(
        &mut self,
        candidate: &User,
        role: TeamRole,
        capacity: usize,
        clock: &impl Clock,
    ) -> Result<(), RuleViolation> {
        ensure_team_active(self.id, self.status)?;
        ensure_user_active(candidate.id(), candidate.status())?;
        if self.is_member(candidate.id()) {
            return Err(InvariantViolation::AlreadyMember {
                team_id: self.id,
                user_id: candidate.id(),
            }
            .into());
        }
        ensure_team_capacity(self.id, self.members.len(), capacity)?;

        let joined_at = clock.utc();
        self.members
            .push(TeamMember::new(candidate.id(), role, joined_at));
        self.updated_at = joined_at;
        Ok(())
    }

    /// Removes `user_id` from the team and returns the removed record.
    ///
    /// `open_tasks` is the number of unfinished tasks assigned to the user
    /// across the team's projects.
    ///
    /// # Errors
    ///
    /// Returns a [`RuleViolation::BusinessInvariantViolation`] when the team
    /// is archived, the user is not a member, or the user still holds
    /// unfinished tasks.
    pub fn remove_member(
        &mut self,
        user_id: UserId,
        open_tasks: usize,
        clock: &impl Clock,
    ) -> Result<TeamMember, RuleViolation> {
        self.ensure_not_archived()?;
        let Some(position) = self
            .members
            .iter()
            .position(|member| member.user_id() == user_id)
        else {
            return Err(InvariantViolation::NotTeamMember {
                team_id: self.id,
                user_id,
            }
            .into());
        };
        ensure_no_open_assignments(self.id, user_id, open_tasks)?;

        let removed = self.members.remove(position);
        self.touch(clock);
        Ok(removed)
    }

    /// Replaces the team's name and description.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantViolation::TeamArchived`] for archived teams.
    pub fn update_details(
        &mut self,
        name: Name,
        description: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), RuleViolation> {
        self.ensure_not_archived()?;
        self.name = name;
        self.description = description;
        self.touch(clock);
        Ok(())
    }

    /// Moves the team to `target` status.
    ///
    /// Moving to the current status is a no-op and leaves `updated_at`
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`RuleViolation::InvalidTransition`] when the team status
    /// graph does not permit the move.
    pub fn transition_to(
        &mut self,
        target: TeamStatus,
        clock: &impl Clock,
    ) -> Result<(), RuleViolation> {
        ensure_transition(self.status, target)?;
        if self.status != target {
            self.status = target;
            self.touch(clock);
        }
        Ok(())
    }

    fn ensure_not_archived(&self) -> Result<(), RuleViolation> {
        if self.status == TeamStatus::Archived {
            return Err(InvariantViolation::TeamArchived(self.id).into());
        }
        Ok(())
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
