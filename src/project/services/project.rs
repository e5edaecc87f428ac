//! Service layer for project lifecycle management.

use super::{ProjectServiceError, ProjectServiceResult};
use crate::{
    config::PolicyConfig,
    events::{DomainEvent, EventEnvelope, EventPublisher, publish_committed},
    naming::{Name, normalize_description},
    project::{
        domain::{Project, ProjectDomainError, ProjectId, ProjectStatus},
        ports::{ProjectRepository, TaskRepository},
    },
    rules::{
        Actor, Operation, RuleViolation, ensure_permitted, ensure_project_completable,
        ensure_team_active, ensure_team_privilege,
    },
    team::{
        domain::{Team, TeamId},
        ports::TeamRepository,
    },
    user::{domain::UserId, ports::UserRepository},
};
use mockable::Clock;
use std::sync::Arc;

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    actor_id: UserId,
    team_id: TeamId,
    name: String,
    description: Option<String>,
}

impl CreateProjectRequest {
    /// Creates a request for a project owned by `team_id`.
    #[must_use]
    pub fn new(actor_id: UserId, team_id: TeamId, name: impl Into<String>) -> Self {
        Self {
            actor_id,
            team_id,
            name: name.into(),
            description: None,
        }
    }

    /// Sets the project description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Project orchestration service.
#[derive(Clone)]
pub struct ProjectService<U, T, P, K, E, C>
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

impl<U, T, P, K, E, C> ProjectService<U, T, P, K, E, C>
where
    U: UserRepository,
    T: TeamRepository,
    P: ProjectRepository,
    K: TaskRepository,
    E: EventPublisher,
    C: Clock + Send + Sync,
{
    /// Creates a new project service with the default policy.
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

    /// Creates a project in [`ProjectStatus::Planning`] under an active team.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Rule`] when the actor may not manage
    /// the team's projects or the team is not active, or
    /// [`ProjectServiceError::Domain`] when the name is invalid.
    pub async fn create_project(
        &self,
        request: CreateProjectRequest,
    ) -> ProjectServiceResult<Project> {
        let actor = self.actor(request.actor_id).await?;
        let team = self.team(request.team_id).await?;
        authorize(|| {
            ensure_team_privilege(&actor, team.role_of(actor.id()), Operation::ManageProject)
        })?;
        authorize(|| ensure_team_active(team.id(), team.status()))?;

        let name = Name::with_limit(request.name, self.policy.max_name_length)
            .map_err(ProjectDomainError::InvalidProjectName)?;
        let project = Project::new(
            team.id(),
            name,
            normalize_description(request.description),
            &*self.clock,
        );
        self.projects.store(&project).await?;
        tracing::info!(
            actor_id = %actor.id(),
            team_id = %team.id(),
            project_id = %project.id(),
            "created project"
        );
        self.publish(
            DomainEvent::ProjectCreated {
                project_id: project.id(),
                team_id: team.id(),
            },
            actor.id(),
        )
        .await;
        Ok(project)
    }

    /// Renames a project and replaces its description.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Rule`] when the actor may not manage
    /// the project or it is finalized, or [`ProjectServiceError::Domain`]
    /// when the name is invalid.
    pub async fn update_details(
        &self,
        actor_id: UserId,
        project_id: ProjectId,
        name: impl Into<String>,
        description: Option<String>,
    ) -> ProjectServiceResult<Project> {
        let actor = self.actor(actor_id).await?;
        let mut project = self.project(project_id).await?;
        self.ensure_manages(&actor, &project).await?;

        let validated = Name::with_limit(name, self.policy.max_name_length)
            .map_err(ProjectDomainError::InvalidProjectName)?;
        authorize(|| {
            project.update_details(validated, normalize_description(description), &*self.clock)
        })?;
        self.projects.update(&project).await?;
        tracing::info!(actor_id = %actor.id(), project_id = %project.id(), "updated project details");
        Ok(project)
    }

    /// Moves a project to another lifecycle status.
    ///
    /// Completion additionally requires every task of the project to be done
    /// or cancelled.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Rule`] when the actor may not manage
    /// the project, the transition is not permitted, or unfinished tasks
    /// block completion.
    pub async fn change_status(
        &self,
        actor_id: UserId,
        project_id: ProjectId,
        status: ProjectStatus,
    ) -> ProjectServiceResult<Project> {
        let actor = self.actor(actor_id).await?;
        let mut project = self.project(project_id).await?;
        self.ensure_manages(&actor, &project).await?;

        let previous = project.status();
        authorize(|| project.transition_to(status, &*self.clock))?;
        if previous == status {
            return Ok(project);
        }
        if status == ProjectStatus::Completed {
            let open_tasks = self
                .tasks
                .find_by_project(project.id())
                .await?
                .iter()
                .filter(|task| !task.is_finalized())
                .count();
            authorize(|| ensure_project_completable(project.id(), open_tasks))?;
        }

        self.projects.update(&project).await?;
        tracing::info!(
            actor_id = %actor.id(),
            project_id = %project.id(),
            from = %previous,
            to = %status,
            "changed project status"
        );
        self.publish(
            DomainEvent::ProjectStatusChanged {
                project_id: project.id(),
                status,
            },
            actor.id(),
        )
        .await;
        Ok(project)
    }

    /// Retrieves a project by identifier.
    ///
    /// Returns `Ok(None)` when the project does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, project_id: ProjectId) -> ProjectServiceResult<Option<Project>> {
        Ok(self.projects.find_by_id(project_id).await?)
    }

    /// Lists the projects owned by a team, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Rule`] when the actor may not view
    /// resources.
    pub async fn list_by_team(
        &self,
        actor_id: UserId,
        team_id: TeamId,
    ) -> ProjectServiceResult<Vec<Project>> {
        let actor = self.actor(actor_id).await?;
        authorize(|| ensure_permitted(&actor, Operation::ViewResources))?;
        Ok(self.projects.find_by_team(team_id).await?)
    }

    async fn ensure_manages(&self, actor: &Actor, project: &Project) -> ProjectServiceResult<()> {
        let team = self.team(project.team_id()).await?;
        authorize(|| {
            ensure_team_privilege(actor, team.role_of(actor.id()), Operation::ManageProject)
        })?;
        Ok(())
    }

    async fn actor(&self, actor_id: UserId) -> ProjectServiceResult<Actor> {
        self.users
            .find_by_id(actor_id)
            .await?
            .map(|user| user.as_actor())
            .ok_or(ProjectServiceError::ActorNotFound(actor_id))
    }

    async fn team(&self, team_id: TeamId) -> ProjectServiceResult<Team> {
        self.teams
            .find_by_id(team_id)
            .await?
            .ok_or(ProjectServiceError::TeamNotFound(team_id))
    }

    async fn project(&self, project_id: ProjectId) -> ProjectServiceResult<Project> {
        self.projects
            .find_by_id(project_id)
            .await?
            .ok_or(ProjectServiceError::ProjectNotFound(project_id))
    }

    async fn publish(&self, event: DomainEvent, actor_id: UserId) {
        publish_committed(&*self.events, EventEnvelope::new(event, actor_id, &*self.clock)).await;
    }
}

fn authorize(check: impl FnOnce() -> Result<(), RuleViolation>) -> Result<(), RuleViolation> {
    check().inspect_err(|violation| tracing::warn!(%violation, "project operation denied"))
}
