//! Shared world state for task lifecycle BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskhive::{
    events::adapters::InMemoryEventPublisher,
    project::{
        adapters::memory::{InMemoryProjectRepository, InMemoryTaskRepository},
        domain::Task,
        services::{ProjectService, ProjectServiceError, TaskService},
    },
    team::{adapters::memory::InMemoryTeamRepository, services::TeamMembershipService},
    user::{
        adapters::memory::InMemoryUserRepository, domain::User, services::UserDirectoryService,
    },
};

type Users = InMemoryUserRepository;
type Teams = InMemoryTeamRepository;
type Projects = InMemoryProjectRepository;
type Tasks = InMemoryTaskRepository;
type Events = InMemoryEventPublisher;

/// Participants created by the scenario background.
pub struct Cast {
    pub admin: User,
    pub manager: User,
    pub developer: User,
    pub outsider: Option<User>,
}

/// Scenario world for task lifecycle behaviour tests.
pub struct TaskLifecycleWorld {
    pub directory: UserDirectoryService<Users, Teams, Events, DefaultClock>,
    pub teams: TeamMembershipService<Users, Teams, Projects, Tasks, Events, DefaultClock>,
    pub projects: ProjectService<Users, Teams, Projects, Tasks, Events, DefaultClock>,
    pub tasks: TaskService<Users, Teams, Projects, Tasks, Events, DefaultClock>,
    pub cast: Option<Cast>,
    pub task: Option<Task>,
    pub last_result: Option<Result<Task, ProjectServiceError>>,
}

impl TaskLifecycleWorld {
    /// Creates a world backed by empty in-memory stores.
    #[must_use]
    pub fn new() -> Self {
        let users = Arc::new(Users::new());
        let teams = Arc::new(Teams::new());
        let projects = Arc::new(Projects::new());
        let tasks = Arc::new(Tasks::new());
        let events = Arc::new(Events::new());
        let clock = Arc::new(DefaultClock);

        Self {
            directory: UserDirectoryService::new(
                Arc::clone(&users),
                Arc::clone(&teams),
                Arc::clone(&events),
                Arc::clone(&clock),
            ),
            teams: TeamMembershipService::new(
                Arc::clone(&users),
                Arc::clone(&teams),
                Arc::clone(&projects),
                Arc::clone(&tasks),
                Arc::clone(&events),
                Arc::clone(&clock),
            ),
            projects: ProjectService::new(
                Arc::clone(&users),
                Arc::clone(&teams),
                Arc::clone(&projects),
                Arc::clone(&tasks),
                Arc::clone(&events),
                Arc::clone(&clock),
            ),
            tasks: TaskService::new(users, teams, projects, tasks, events, clock),
            cast: None,
            task: None,
            last_result: None,
        }
    }

    /// Returns the scenario participants.
    ///
    /// # Errors
    ///
    /// Returns an error if the background has not run.
    pub fn cast(&self) -> eyre::Result<&Cast> {
        self.cast
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing participants in scenario world"))
    }

    /// Returns the scenario task.
    ///
    /// # Errors
    ///
    /// Returns an error if no task has been created.
    pub fn task(&self) -> eyre::Result<&Task> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }
}

impl Default for TaskLifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskLifecycleWorld {
    TaskLifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
