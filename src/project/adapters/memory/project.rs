//! In-memory repository for projects.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::poisoned;
use crate::{
    project::{
        domain::{Project, ProjectId},
        ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
    },
    team::domain::TeamId,
};

/// Thread-safe in-memory project repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectRepository {
    state: Arc<RwLock<HashMap<ProjectId, Project>>>,
}

impl InMemoryProjectRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut projects = self.state.write().map_err(|err| poisoned(&err))?;
        if projects.contains_key(&project.id()) {
            return Err(ProjectRepositoryError::DuplicateProject(project.id()));
        }
        projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut projects = self.state.write().map_err(|err| poisoned(&err))?;
        let slot = projects
            .get_mut(&project.id())
            .ok_or(ProjectRepositoryError::ProjectNotFound(project.id()))?;
        *slot = project.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        let projects = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(projects.get(&id).cloned())
    }

    async fn find_by_team(&self, team_id: TeamId) -> ProjectRepositoryResult<Vec<Project>> {
        let projects = self.state.read().map_err(|err| poisoned(&err))?;
        let mut owned: Vec<Project> = projects
            .values()
            .filter(|project| project.team_id() == team_id)
            .cloned()
            .collect();
        owned.sort_by_key(Project::created_at);
        Ok(owned)
    }
}
