//! Shared world state for team membership BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskhive::{
    events::adapters::InMemoryEventPublisher,
    project::{
        adapters::memory::{InMemoryProjectRepository, InMemoryTaskRepository},
        services::{ProjectService, TaskService},
    },
    team::{
        adapters::memory::InMemoryTeamRepository,
        domain::Team,
        services::{TeamMembershipService, TeamServiceError},
    },
    user::{
        adapters::memory::InMemoryUserRepository,
        domain::{User, UserRole},
        services::{BootstrapAdminRequest, RegisterUserRequest, UserDirectoryService},
    },
};

type Users = InMemoryUserRepository;
type Teams = InMemoryTeamRepository;
type Projects = InMemoryProjectRepository;
type Tasks = InMemoryTaskRepository;
type Events = InMemoryEventPublisher;

/// Scenario world for team membership behaviour tests.
pub struct TeamMembershipWorld {
    pub directory: UserDirectoryService<Users, Teams, Events, DefaultClock>,
    pub teams: TeamMembershipService<Users, Teams, Projects, Tasks, Events, DefaultClock>,
    pub projects: ProjectService<Users, Teams, Projects, Tasks, Events, DefaultClock>,
    pub tasks: TaskService<Users, Teams, Projects, Tasks, Events, DefaultClock>,
    pub admin: Option<User>,
    pub people: HashMap<String, User>,
    pub team: Option<Team>,
    pub last_result: Option<Result<Team, TeamServiceError>>,
}

impl TeamMembershipWorld {
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
            admin: None,
            people: HashMap::new(),
            team: None,
            last_result: None,
        }
    }

    /// Registers `username` with `role`, bootstrapping an administrator on
    /// first use.
    ///
    /// # Errors
    ///
    /// Returns an error if registration is rejected.
    pub fn register(&mut self, username: &str, role: UserRole) -> eyre::Result<User> {
        let admin = match self.admin.clone() {
            Some(existing) => existing,
            None => {
                let created = run_async(self.directory.bootstrap_admin(
                    BootstrapAdminRequest::new("root", "root@example.com", "hash-root"),
                ))?;
                self.admin = Some(created.clone());
                created
            }
        };
        let request = RegisterUserRequest::new(
            admin.id(),
            username,
            format!("{username}@example.com"),
            format!("hash-{username}"),
        )
        .with_role(role);
        let user = run_async(self.directory.register_user(request))?;
        self.people.insert(username.to_owned(), user.clone());
        Ok(user)
    }

    /// Looks up a previously registered user by name.
    ///
    /// # Errors
    ///
    /// Returns an error if no user was registered under `username`.
    pub fn person(&self, username: &str) -> eyre::Result<&User> {
        self.people
            .get(username)
            .ok_or_else(|| eyre::eyre!("unknown person in scenario: {username}"))
    }

    /// Returns the scenario team.
    ///
    /// # Errors
    ///
    /// Returns an error if no team has been created yet.
    pub fn team(&self) -> eyre::Result<&Team> {
        self.team
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing team in scenario world"))
    }
}

impl Default for TeamMembershipWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TeamMembershipWorld {
    TeamMembershipWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
