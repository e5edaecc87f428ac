//! In-memory adapters for project and task ports.

mod project;
mod task;

pub use project::InMemoryProjectRepository;
pub use task::InMemoryTaskRepository;

use crate::project::ports::ProjectRepositoryError;
use std::sync::PoisonError;

fn poisoned<T>(err: &PoisonError<T>) -> ProjectRepositoryError {
    ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
}
