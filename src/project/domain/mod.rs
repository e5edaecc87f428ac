//! Domain model for projects and their tasks.
//!
//! Projects belong to a team and move through a planning-to-completion
//! lifecycle. Tasks are separate aggregates that reference their project and
//! optionally one parent task.

mod error;
mod ids;
mod project;
mod status;
mod task;

pub use error::{ParseProjectStatusError, ParseTaskStatusError, ProjectDomainError};
pub use ids::{ProjectId, TaskId};
pub use project::{PersistedProjectData, Project};
pub use status::{ProjectStatus, TaskPriority, TaskStatus};
pub use task::{PersistedTaskData, Task, TaskDraft};
