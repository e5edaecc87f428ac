//! In-memory repository for teams.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::{
    team::{
        domain::{Team, TeamId},
        ports::{TeamRepository, TeamRepositoryError, TeamRepositoryResult},
    },
    user::domain::UserId,
};

/// Thread-safe in-memory team repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTeamRepository {
    state: Arc<RwLock<HashMap<TeamId, Team>>>,
}

impl InMemoryTeamRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(err: &PoisonError<T>) -> TeamRepositoryError {
    TeamRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn store(&self, team: &Team) -> TeamRepositoryResult<()> {
        let mut teams = self.state.write().map_err(|err| poisoned(&err))?;
        if teams.contains_key(&team.id()) {
            return Err(TeamRepositoryError::DuplicateTeam(team.id()));
        }
        teams.insert(team.id(), team.clone());
        Ok(())
    }

    async fn update(&self, team: &Team) -> TeamRepositoryResult<()> {
        let mut teams = self.state.write().map_err(|err| poisoned(&err))?;
        let slot = teams
            .get_mut(&team.id())
            .ok_or(TeamRepositoryError::NotFound(team.id()))?;
        *slot = team.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: TeamId) -> TeamRepositoryResult<Option<Team>> {
        let teams = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(teams.get(&id).cloned())
    }

    async fn find_by_member(&self, user_id: UserId) -> TeamRepositoryResult<Vec<Team>> {
        let teams = self.state.read().map_err(|err| poisoned(&err))?;
        let mut joined: Vec<Team> = teams
            .values()
            .filter(|team| team.is_member(user_id))
            .cloned()
            .collect();
        joined.sort_by_key(Team::created_at);
        Ok(joined)
    }
}
