//! Service layer for tasks, subtasks and assignments.

use super::{ProjectServiceError, ProjectServiceResult};
use crate::{
    config::PolicyConfig,
    events::{DomainEvent, EventEnvelope, EventPublisher, publish_committed},
    naming::{Name, normalize_description},
    project::{
        domain::{
            Project, ProjectDomainError, ProjectId, Task, TaskDraft, TaskId, TaskPriority,
            TaskStatus,
        },
        ports::{ProjectRepository, TaskRepository},
    },
    rules::{Actor, Operation, RuleViolation, ensure_permitted, ensure_team_privilege},
    team::{
        domain::{Team, TeamId},
        ports::TeamRepository,
    },
    user::{
        domain::{User, UserId},
        ports::UserRepository,
    },
};
use mockable::Clock;
use std::sync::Arc;

/// Request payload for creating a task or subtask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    actor_id: UserId,
    project_id: ProjectId,
    parent_id: Option<TaskId>,
    title: String,
    description: Option<String>,
    priority: TaskPriority,
}

impl CreateTaskRequest {
    /// Creates a request for a top-level task with medium priority.
    #[must_use]
    pub fn new(actor_id: UserId, project_id: ProjectId, title: impl Into<String>) -> Self {
        Self {
            actor_id,
            project_id,
            parent_id: None,
            title: title.into(),
            description: None,
            priority: TaskPriority::default(),
        }
    }

    /// Makes the new task a subtask of `parent_id`.
    #[must_use]
    pub const fn with_parent(mut self, parent_id: TaskId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the task priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }
}

/// Request payload for editing a task's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    actor_id: UserId,
    task_id: TaskId,
    title: String,
    description: Option<String>,
    priority: TaskPriority,
}

impl UpdateTaskRequest {
    /// Creates a request replacing the title and clearing the description.
    #[must_use]
    pub fn new(actor_id: UserId, task_id: TaskId, title: impl Into<String>) -> Self {
        Self {
            actor_id,
            task_id,
            title: title.into(),
            description: None,
            priority: TaskPriority::default(),
        }
    }

    /// Sets the new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the new priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }
}

/// Task orchestration service.
#[derive(Clone)]
pub struct TaskService<U, T, P, K, E, C>
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

impl<U, T, P, K, E, C> TaskService<U, T, P, K, E, C>
where
    U: UserRepository,
    T: TeamRepository,
    P: ProjectRepository,
    K: TaskRepository,
    E: EventPublisher,
    C: Clock + Send + Sync,
{
    /// Creates a new task service with the default policy.
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

    /// Creates a task, or a subtask when the request names a parent.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Rule`] when the actor may not create
    /// tasks, the project or parent is finalized, or the parent is itself a
    /// subtask or belongs to another project.
    pub async fn create_task(&self, request: CreateTaskRequest) -> ProjectServiceResult<Task> {
        let actor = self.actor(request.actor_id).await?;
        authorize(|| ensure_permitted(&actor, Operation::CreateTask))?;
        let project = self.project(request.project_id).await?;
        let draft = self.draft(request.title, request.description, request.priority)?;

        let task = match request.parent_id {
            Some(parent_id) => {
                let parent = self.task(parent_id).await?;
                authorize_with(|| Task::new_subtask(&project, &parent, draft, &*self.clock))?
            }
            None => authorize_with(|| Task::new(&project, draft, &*self.clock))?,
        };
        self.tasks.store(&task).await?;
        tracing::info!(
            actor_id = %actor.id(),
            project_id = %project.id(),
            task_id = %task.id(),
            subtask = task.is_subtask(),
            "created task"
        );
        self.publish(
            DomainEvent::TaskCreated {
                task_id: task.id(),
                project_id: project.id(),
                parent_id: task.parent_id(),
            },
            actor.id(),
        )
        .await;
        Ok(task)
    }

    /// Replaces a task's title, description and priority.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Rule`] when the actor may not update
    /// tasks, or the task or its project is finalized.
    pub async fn update_details(&self, request: UpdateTaskRequest) -> ProjectServiceResult<Task> {
        let actor = self.actor(request.actor_id).await?;
        authorize(|| ensure_permitted(&actor, Operation::UpdateTask))?;
        let mut task = self.task(request.task_id).await?;
        self.open_project(&task).await?;
        let draft = self.draft(request.title, request.description, request.priority)?;

        authorize(|| task.update_details(draft, &*self.clock))?;
        self.tasks.update(&task).await?;
        tracing::info!(actor_id = %actor.id(), task_id = %task.id(), "updated task details");
        Ok(task)
    }

    /// Assigns a task to a member of the project's team.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Rule`] when the actor may not assign
    /// tasks in the team, the task or its project is finalized, or the
    /// assignee is inactive or outside the team.
    pub async fn assign_task(
        &self,
        actor_id: UserId,
        task_id: TaskId,
        assignee_id: UserId,
    ) -> ProjectServiceResult<Task> {
        let actor = self.actor(actor_id).await?;
        let mut task = self.task(task_id).await?;
        let (project, team) = self.owning_team(&task).await?;
        authorize(|| {
            ensure_team_privilege(&actor, team.role_of(actor.id()), Operation::AssignTask)?;
            project.ensure_accepts_changes()
        })?;

        let assignee = self.user(assignee_id).await?;
        authorize(|| task.assign(&assignee, &team, &*self.clock))?;
        self.tasks.update(&task).await?;
        tracing::info!(
            actor_id = %actor.id(),
            task_id = %task.id(),
            assignee = %assignee.id(),
            "assigned task"
        );
        self.publish(
            DomainEvent::TaskAssigned {
                task_id: task.id(),
                assignee: assignee.id(),
            },
            actor.id(),
        )
        .await;
        Ok(task)
    }

    /// Clears a task's assignee.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Rule`] when the actor may not assign
    /// tasks in the team, or the task or its project is finalized.
    pub async fn unassign_task(
        &self,
        actor_id: UserId,
        task_id: TaskId,
    ) -> ProjectServiceResult<Task> {
        let actor = self.actor(actor_id).await?;
        let mut task = self.task(task_id).await?;
        let (project, team) = self.owning_team(&task).await?;
        authorize(|| {
            ensure_team_privilege(&actor, team.role_of(actor.id()), Operation::AssignTask)?;
            project.ensure_accepts_changes()
        })?;

        let previous = authorize_with(|| task.unassign(&*self.clock))?;
        let Some(previous_assignee) = previous else {
            return Ok(task);
        };
        self.tasks.update(&task).await?;
        tracing::info!(
            actor_id = %actor.id(),
            task_id = %task.id(),
            previous = %previous_assignee,
            "unassigned task"
        );
        self.publish(
            DomainEvent::TaskUnassigned {
                task_id: task.id(),
                previous: previous_assignee,
            },
            actor.id(),
        )
        .await;
        Ok(task)
    }

    /// Moves a task to another lifecycle status.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Rule`] when the actor may not update
    /// tasks, the project is finalized, or the transition is not permitted.
    pub async fn change_status(
        &self,
        actor_id: UserId,
        task_id: TaskId,
        status: TaskStatus,
    ) -> ProjectServiceResult<Task> {
        let actor = self.actor(actor_id).await?;
        authorize(|| ensure_permitted(&actor, Operation::UpdateTask))?;
        let mut task = self.task(task_id).await?;
        self.open_project(&task).await?;

        let previous = task.status();
        authorize(|| task.transition_to(status, &*self.clock))?;
        if previous == status {
            return Ok(task);
        }
        self.tasks.update(&task).await?;
        tracing::info!(
            actor_id = %actor.id(),
            task_id = %task.id(),
            from = %previous,
            to = %status,
            "changed task status"
        );
        self.publish(
            DomainEvent::TaskStatusChanged {
                task_id: task.id(),
                status,
            },
            actor.id(),
        )
        .await;
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, task_id: TaskId) -> ProjectServiceResult<Option<Task>> {
        Ok(self.tasks.find_by_id(task_id).await?)
    }

    /// Lists every task of a project, subtasks included, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Rule`] when the actor may not view
    /// resources.
    pub async fn list_by_project(
        &self,
        actor_id: UserId,
        project_id: ProjectId,
    ) -> ProjectServiceResult<Vec<Task>> {
        let actor = self.actor(actor_id).await?;
        authorize(|| ensure_permitted(&actor, Operation::ViewResources))?;
        Ok(self.tasks.find_by_project(project_id).await?)
    }

    /// Lists the subtasks of a task, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when lookup fails.
    pub async fn list_subtasks(&self, parent_id: TaskId) -> ProjectServiceResult<Vec<Task>> {
        Ok(self.tasks.find_subtasks(parent_id).await?)
    }

    fn draft(
        &self,
        title: String,
        description: Option<String>,
        priority: TaskPriority,
    ) -> ProjectServiceResult<TaskDraft> {
        let validated = Name::with_limit(title, self.policy.max_name_length)
            .map_err(ProjectDomainError::InvalidTaskTitle)?;
        Ok(TaskDraft {
            title: validated,
            description: normalize_description(description),
            priority,
        })
    }

    async fn owning_team(&self, task: &Task) -> ProjectServiceResult<(Project, Team)> {
        let project = self.project(task.project_id()).await?;
        let team = self.team(project.team_id()).await?;
        Ok((project, team))
    }

    /// Rejects changes to tasks of a finalized project.
    async fn open_project(&self, task: &Task) -> ProjectServiceResult<()> {
        let project = self.project(task.project_id()).await?;
        authorize(|| project.ensure_accepts_changes())?;
        Ok(())
    }

    async fn actor(&self, actor_id: UserId) -> ProjectServiceResult<Actor> {
        self.users
            .find_by_id(actor_id)
            .await?
            .map(|user| user.as_actor())
            .ok_or(ProjectServiceError::ActorNotFound(actor_id))
    }

    async fn user(&self, user_id: UserId) -> ProjectServiceResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(ProjectServiceError::UserNotFound(user_id))
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

    async fn task(&self, task_id: TaskId) -> ProjectServiceResult<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or(ProjectServiceError::TaskNotFound(task_id))
    }

    async fn publish(&self, event: DomainEvent, actor_id: UserId) {
        publish_committed(&*self.events, EventEnvelope::new(event, actor_id, &*self.clock)).await;
    }
}

fn authorize(check: impl FnOnce() -> Result<(), RuleViolation>) -> Result<(), RuleViolation> {
    authorize_with(check)
}

fn authorize_with<T>(check: impl FnOnce() -> Result<T, RuleViolation>) -> Result<T, RuleViolation> {
    check().inspect_err(|violation| tracing::warn!(%violation, "task operation denied"))
}
