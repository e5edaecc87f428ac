//! Application services for projects and tasks.

mod error;
mod project;
mod task;

pub use error::{ProjectServiceError, ProjectServiceResult};
pub use project::{CreateProjectRequest, ProjectService};
pub use task::{CreateTaskRequest, TaskService, UpdateTaskRequest};
