//! Error types shared by the project and task services.

use crate::{
    project::{
        domain::{ProjectDomainError, ProjectId, TaskId},
        ports::ProjectRepositoryError,
    },
    rules::RuleViolation,
    team::{domain::TeamId, ports::TeamRepositoryError},
    user::{domain::UserId, ports::UserRepositoryError},
};
use thiserror::Error;

/// Service-level errors for project and task operations.
#[derive(Debug, Error)]
pub enum ProjectServiceError {
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),
    /// A business rule denied the operation.
    #[error(transparent)]
    Rule(#[from] RuleViolation),
    /// Project or task repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),
    /// Team lookup failed.
    #[error(transparent)]
    Teams(#[from] TeamRepositoryError),
    /// User lookup failed.
    #[error(transparent)]
    Users(#[from] UserRepositoryError),
    /// The acting user does not exist.
    #[error("acting user not found: {0}")]
    ActorNotFound(UserId),
    /// The targeted user does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),
    /// The team does not exist.
    #[error("team not found: {0}")]
    TeamNotFound(TeamId),
    /// The project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
}

/// Result type for project and task service operations.
pub type ProjectServiceResult<T> = Result<T, ProjectServiceError>;
