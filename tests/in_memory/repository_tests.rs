//! Contract tests for the in-memory repositories.

use eyre::ensure;
use mockable::DefaultClock;
use rstest::rstest;
use taskhive::{
    naming::Name,
    project::{
        adapters::memory::{InMemoryProjectRepository, InMemoryTaskRepository},
        domain::{Project, Task, TaskDraft, TaskStatus},
        ports::{ProjectRepository, ProjectRepositoryError, TaskRepository},
    },
    team::{
        adapters::memory::InMemoryTeamRepository,
        domain::{Team, TeamRole},
        ports::{TeamRepository, TeamRepositoryError},
    },
    user::{
        adapters::memory::InMemoryUserRepository,
        domain::{CredentialHash, EmailAddress, User, UserRole, Username},
        ports::{UserRepository, UserRepositoryError},
    },
};

fn user(username: &str) -> eyre::Result<User> {
    Ok(User::new(
        Username::new(username)?,
        EmailAddress::new(format!("{username}@example.com"))?,
        CredentialHash::new("hash")?,
        UserRole::Developer,
        &DefaultClock,
    ))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn user_repository_indexes_usernames() -> eyre::Result<()> {
    let repository = InMemoryUserRepository::new();
    let ada = user("ada")?;
    repository.store(&ada).await?;

    let found = repository.find_by_username(&Username::new("ADA")?).await?;
    ensure!(found.as_ref() == Some(&ada), "username lookup failed");

    let clash = repository.store(&user("ada")?).await;
    ensure!(
        matches!(clash, Err(UserRepositoryError::DuplicateUsername(_))),
        "duplicate username stored: {clash:?}"
    );

    repository.remove(ada.id()).await?;
    ensure!(repository.count().await? == 0, "user not removed");
    ensure!(
        repository.find_by_username(ada.username()).await?.is_none(),
        "username index not cleared"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn team_repository_finds_teams_by_member() -> eyre::Result<()> {
    let repository = InMemoryTeamRepository::new();
    let ada = user("ada")?;
    let mut first = Team::new(Name::new("First")?, None, &DefaultClock);
    first.add_member(&ada, TeamRole::Developer, 5, &DefaultClock)?;
    let second = Team::new(Name::new("Second")?, None, &DefaultClock);
    repository.store(&first).await?;
    repository.store(&second).await?;

    let teams = repository.find_by_member(ada.id()).await?;
    ensure!(teams == vec![first.clone()], "member lookup mismatch");

    let duplicate = repository.store(&first).await;
    ensure!(
        matches!(duplicate, Err(TeamRepositoryError::DuplicateTeam(id)) if id == first.id()),
        "duplicate team stored: {duplicate:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_repository_counts_open_assignments_per_project() -> eyre::Result<()> {
    let ada = user("ada")?;
    let mut team = Team::new(Name::new("Team")?, None, &DefaultClock);
    team.add_member(&ada, TeamRole::Developer, 5, &DefaultClock)?;
    let projects = InMemoryProjectRepository::new();
    let tasks = InMemoryTaskRepository::new();
    let inside = Project::new(team.id(), Name::new("Inside")?, None, &DefaultClock);
    let outside = Project::new(team.id(), Name::new("Outside")?, None, &DefaultClock);
    projects.store(&inside).await?;
    projects.store(&outside).await?;

    for (project, status) in [
        (&inside, TaskStatus::ToDo),
        (&inside, TaskStatus::Cancelled),
        (&outside, TaskStatus::ToDo),
    ] {
        let mut task = Task::new(project, TaskDraft::new(Name::new("Work")?), &DefaultClock)?;
        task.assign(&ada, &team, &DefaultClock)?;
        task.transition_to(status, &DefaultClock)?;
        tasks.store(&task).await?;
    }

    let open = tasks.count_open_assigned(ada.id(), &[inside.id()]).await?;
    ensure!(open == 1, "expected one open task, found {open}");
    let listed = projects.find_by_team(team.id()).await?;
    ensure!(listed.len() == 2, "expected two projects");

    let missing = tasks
        .update(&Task::new(&inside, TaskDraft::new(Name::new("Ghost")?), &DefaultClock)?)
        .await;
    ensure!(
        matches!(missing, Err(ProjectRepositoryError::TaskNotFound(_))),
        "update of unknown task succeeded: {missing:?}"
    );
    Ok(())
}
