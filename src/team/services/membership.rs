//! Service layer for teams and their membership.

use crate::{
    config::PolicyConfig,
    events::{DomainEvent, EventEnvelope, EventPublisher, publish_committed},
    naming::{Name, normalize_description},
    project::ports::{ProjectRepository, ProjectRepositoryError, TaskRepository},
    rules::{Actor, Operation, RuleViolation, ensure_permitted, ensure_team_privilege},
    team::{
        domain::{Team, TeamDomainError, TeamId, TeamRole, TeamStatus},
        ports::{TeamRepository, TeamRepositoryError},
    },
    user::{
        domain::{User, UserId},
        ports::{UserRepository, UserRepositoryError},
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTeamRequest {
    actor_id: UserId,
    name: String,
    description: Option<String>,
}

impl CreateTeamRequest {
    /// Creates a request with the required team name.
    #[must_use]
    pub fn new(actor_id: UserId, name: impl Into<String>) -> Self {
        Self {
            actor_id,
            name: name.into(),
            description: None,
        }
    }

    /// Sets the team description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Request payload for adding a user to a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddMemberRequest {
    actor_id: UserId,
    team_id: TeamId,
    user_id: UserId,
    role: TeamRole,
}

impl AddMemberRequest {
    /// Creates a request adding `user_id` as a [`TeamRole::Developer`].
    #[must_use]
    pub const fn new(actor_id: UserId, team_id: TeamId, user_id: UserId) -> Self {
        Self {
            actor_id,
            team_id,
            user_id,
            role: TeamRole::Developer,
        }
    }

    /// Sets the member's role within the team.
    #[must_use]
    pub const fn with_role(mut self, role: TeamRole) -> Self {
        self.role = role;
        self
    }
}

/// Request payload for removing a user from a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveMemberRequest {
    actor_id: UserId,
    team_id: TeamId,
    user_id: UserId,
}

impl RemoveMemberRequest {
    /// Creates a removal request.
    #[must_use]
    pub const fn new(actor_id: UserId, team_id: TeamId, user_id: UserId) -> Self {
        Self {
            actor_id,
            team_id,
            user_id,
        }
    }
}

/// Service-level errors for team operations.
#[derive(Debug, Error)]
pub enum TeamServiceError {
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] TeamDomainError),
    /// A business rule denied the operation.
    #[error(transparent)]
    Rule(#[from] RuleViolation),
    /// Team repository operation failed.
    #[error(transparent)]
    Repository(#[from] TeamRepositoryError),
    /// User lookup failed.
    #[error(transparent)]
    Users(#[from] UserRepositoryError),
    /// Project or task lookup failed.
    #[error(transparent)]
    Projects(#[from] ProjectRepositoryError),
    /// The acting user does not exist.
    #[error("acting user not found: {0}")]
    ActorNotFound(UserId),
    /// The targeted user does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),
    /// The team does not exist.
    #[error("team not found: {0}")]
    TeamNotFound(TeamId),
}

/// Result type for team service operations.
pub type TeamServiceResult<T> = Result<T, TeamServiceError>;

/// Team and membership orchestration service.
#[derive(Clone)]
pub struct TeamMembershipService<U, T, P, K, E, C>
where
    U: UserRepository,
    T: TeamRepository,
    P: ProjectRepository,
    K: TaskRepository,
    E: EventPublisher,
    C: Clock + Send + Sync,
{
    users: Arc<U>,
    teams: Arc<T>,
    projects: Arc<P>,
    tasks: Arc<K>,
    events: Arc<E>,
    clock: Arc<C>,
    policy: PolicyConfig,
}

impl<U, T, P, K, E, C> TeamMembershipService<U, T, P, K, E, C>
where
    U: UserRepository,
    T: TeamRepository,
    P: ProjectRepository,
    K: TaskRepository,
    E: EventPublisher,
    C: Clock + Send + Sync,
{
    /// Creates a new team membership service with the default policy.
    #[must_use]
    pub fn new(
        users: Arc<U>,
        teams: Arc<T>,
        projects: Arc<P>,
        tasks: Arc<K>,
        events: Arc<E>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            users,
            teams,
            projects,
            tasks,
            events,
            clock,
            policy: PolicyConfig::default(),
        }
    }

    /// Replaces the business policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: PolicyConfig) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the active business policy.
    #[must_use]
    pub const fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// Creates a new active team.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError::Rule`] when the actor may not manage
    /// teams, or [`TeamServiceError::Domain`] when the name is invalid.
    pub async fn create_team(&self, request: CreateTeamRequest) -> TeamServiceResult<Team> {
        let actor = self.actor(request.actor_id).await?;
        authorize(|| ensure_permitted(&actor, Operation::ManageTeam))?;

        let name = Name::with_limit(request.name, self.policy.max_name_length)
            .map_err(TeamDomainError::from)?;
        let team = Team::new(name, normalize_description(request.description), &*self.clock);
        self.teams.store(&team).await?;
        tracing::info!(actor_id = %actor.id(), team_id = %team.id(), "created team");
        self.publish(DomainEvent::TeamCreated { team_id: team.id() }, actor.id())
            .await;
        Ok(team)
    }

    /// Adds a user to a team.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError::Rule`] when the actor lacks team
    /// management rights, the team is inactive or full, or the user is
    /// inactive or already a member.
    pub async fn add_member(&self, request: AddMemberRequest) -> TeamServiceResult<Team> {
        let actor = self.actor(request.actor_id).await?;
        let mut team = self.team(request.team_id).await?;
        authorize(|| {
            ensure_team_privilege(&actor, team.role_of(actor.id()), Operation::ManageTeam)
        })?;

        let candidate = self.user(request.user_id).await?;
        authorize(|| {
            team.add_member(
                &candidate,
                request.role,
                self.policy.team_capacity,
                &*self.clock,
            )
        })?;
        self.teams.update(&team).await?;
        tracing::info!(
            actor_id = %actor.id(),
            team_id = %team.id(),
            user_id = %candidate.id(),
            role = %request.role,
            members = team.member_count(),
            "added team member"
        );
        self.publish(
            DomainEvent::MemberAdded {
                team_id: team.id(),
                user_id: candidate.id(),
                role: request.role,
            },
            actor.id(),
        )
        .await;
        Ok(team)
    }

    /// Removes a user from a team.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError::Rule`] when the actor lacks team
    /// management rights, the user is not a member, or the user still holds
    /// unfinished tasks in the team's projects.
    pub async fn remove_member(&self, request: RemoveMemberRequest) -> TeamServiceResult<Team> {
        let actor = self.actor(request.actor_id).await?;
        let mut team = self.team(request.team_id).await?;
        authorize(|| {
            ensure_team_privilege(&actor, team.role_of(actor.id()), Operation::ManageTeam)
        })?;

        let project_ids: Vec<_> = self
            .projects
            .find_by_team(team.id())
            .await?
            .iter()
            .map(|project| project.id())
            .collect();
        let open_tasks = self
            .tasks
            .count_open_assigned(request.user_id, &project_ids)
            .await?;

        authorize(|| {
            team.remove_member(request.user_id, open_tasks, &*self.clock)
                .map(drop)
        })?;
        self.teams.update(&team).await?;
        tracing::info!(
            actor_id = %actor.id(),
            team_id = %team.id(),
            user_id = %request.user_id,
            "removed team member"
        );
        self.publish(
            DomainEvent::MemberRemoved {
                team_id: team.id(),
                user_id: request.user_id,
            },
            actor.id(),
        )
        .await;
        Ok(team)
    }

    /// Renames a team and replaces its description.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError::Rule`] when the actor lacks team
    /// management rights or the team is archived, or
    /// [`TeamServiceError::Domain`] when the name is invalid.
    pub async fn update_details(
        &self,
        actor_id: UserId,
        team_id: TeamId,
        name: impl Into<String>,
        description: Option<String>,
    ) -> TeamServiceResult<Team> {
        let actor = self.actor(actor_id).await?;
        let mut team = self.team(team_id).await?;
        authorize(|| {
            ensure_team_privilege(&actor, team.role_of(actor.id()), Operation::ManageTeam)
        })?;

        let validated = Name::with_limit(name, self.policy.max_name_length)
            .map_err(TeamDomainError::from)?;
        authorize(|| {
            team.update_details(validated, normalize_description(description), &*self.clock)
        })?;
        self.teams.update(&team).await?;
        tracing::info!(actor_id = %actor.id(), team_id = %team.id(), "updated team details");
        Ok(team)
    }

    /// Moves a team to another lifecycle status.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError::Rule`] when the actor lacks team
    /// management rights or the transition is not permitted.
    pub async fn change_status(
        &self,
        actor_id: UserId,
        team_id: TeamId,
        status: TeamStatus,
    ) -> TeamServiceResult<Team> {
        let actor = self.actor(actor_id).await?;
        let mut team = self.team(team_id).await?;
        authorize(|| {
            ensure_team_privilege(&actor, team.role_of(actor.id()), Operation::ManageTeam)
        })?;

        let previous = team.status();
        authorize(|| team.transition_to(status, &*self.clock))?;
        if previous == status {
            return Ok(team);
        }
        self.teams.update(&team).await?;
        tracing::info!(
            actor_id = %actor.id(),
            team_id = %team.id(),
            from = %previous,
            to = %status,
            "changed team status"
        );
        self.publish(
            DomainEvent::TeamStatusChanged {
                team_id: team.id(),
                status,
            },
            actor.id(),
        )
        .await;
        Ok(team)
    }

    /// Retrieves a team by identifier.
    ///
    /// Returns `Ok(None)` when the team does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, team_id: TeamId) -> TeamServiceResult<Option<Team>> {
        Ok(self.teams.find_by_id(team_id).await?)
    }

    /// Returns the teams a user belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`TeamServiceError::Repository`] when lookup fails.
    pub async fn teams_of(&self, user_id: UserId) -> TeamServiceResult<Vec<Team>> {
        Ok(self.teams.find_by_member(user_id).await?)
    }

    async fn actor(&self, actor_id: UserId) -> TeamServiceResult<Actor> {
        self.users
            .find_by_id(actor_id)
            .await?
            .map(|user| user.as_actor())
            .ok_or(TeamServiceError::ActorNotFound(actor_id))
    }

    async fn user(&self, user_id: UserId) -> TeamServiceResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(TeamServiceError::UserNotFound(user_id))
    }

    async fn team(&self, team_id: TeamId) -> TeamServiceResult<Team> {
        self.teams
            .find_by_id(team_id)
            .await?
            .ok_or(TeamServiceError::TeamNotFound(team_id))
    }

    async fn publish(&self, event: DomainEvent, actor_id: UserId) {
        publish_committed(&*self.events, EventEnvelope::new(event, actor_id, &*self.clock)).await;
    }
}

fn authorize(check: impl FnOnce() -> Result<(), RuleViolation>) -> Result<(), RuleViolation> {
    check().inspect_err(|violation| tracing::warn!(%violation, "team operation denied"))
}
