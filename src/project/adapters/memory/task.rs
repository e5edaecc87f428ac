//! In-memory repository for tasks.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::poisoned;
use crate::{
    project::{
        domain::{ProjectId, Task, TaskId},
        ports::{ProjectRepositoryError, ProjectRepositoryResult, TaskRepository},
    },
    user::domain::UserId,
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn collect_sorted(
        &self,
        predicate: impl Fn(&Task) -> bool,
    ) -> ProjectRepositoryResult<Vec<Task>> {
        let tasks = self.state.read().map_err(|err| poisoned(&err))?;
        let mut matching: Vec<Task> = tasks
            .values()
            .filter(|task| predicate(task))
            .cloned()
            .collect();
        matching.sort_by_key(Task::created_at);
        Ok(matching)
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> ProjectRepositoryResult<()> {
        let mut tasks = self.state.write().map_err(|err| poisoned(&err))?;
        if tasks.contains_key(&task.id()) {
            return Err(ProjectRepositoryError::DuplicateTask(task.id()));
        }
        tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> ProjectRepositoryResult<()> {
        let mut tasks = self.state.write().map_err(|err| poisoned(&err))?;
        let slot = tasks
            .get_mut(&task.id())
            .ok_or(ProjectRepositoryError::TaskNotFound(task.id()))?;
        *slot = task.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> ProjectRepositoryResult<Option<Task>> {
        let tasks = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(tasks.get(&id).cloned())
    }

    async fn find_by_project(&self, project_id: ProjectId) -> ProjectRepositoryResult<Vec<Task>> {
        self.collect_sorted(|task| task.project_id() == project_id)
    }

    async fn find_subtasks(&self, parent_id: TaskId) -> ProjectRepositoryResult<Vec<Task>> {
        self.collect_sorted(|task| task.parent_id() == Some(parent_id))
    }

    async fn count_open_assigned(
        &self,
        assignee: UserId,
        project_ids: &[ProjectId],
    ) -> ProjectRepositoryResult<usize> {
        let tasks = self.state.read().map_err(|err| poisoned(&err))?;
        let open = tasks
            .values()
            .filter(|task| task.assignee() == Some(assignee))
            .filter(|task| project_ids.contains(&task.project_id()))
            .filter(|task| !task.is_finalized())
            .count();
        Ok(open)
    }
}
