//! Port contracts for projects and tasks.

pub mod repository;

pub use repository::{
    ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult, TaskRepository,
};
