//! Team storage

use super::objects::Team;
use crate::error::{CatalogError, Result};
use async_trait::async_trait;
use catalog_authz::TeamId;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Team storage trait
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Get a team by id
    async fn get(&self, id: TeamId) -> Result<Team>;

    /// List all teams
    async fn list(&self) -> Result<Vec<Team>>;

    /// Store a team, assigning an id when it has none
    async fn save(&self, team: Team) -> Result<Team>;

    /// Delete a team
    async fn delete(&self, id: TeamId) -> Result<TeamId>;
}

fn not_found(id: TeamId) -> CatalogError {
    CatalogError::not_found(format!("Team with id {} does not exist", id))
}

/// In-memory team repository
#[derive(Debug, Clone, Default)]
pub struct InMemoryTeamRepository {
    teams: Arc<RwLock<BTreeMap<TeamId, Team>>>,
}

impl InMemoryTeamRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-populated with stored teams; teams without an id get one
    pub async fn with_teams(teams: impl IntoIterator<Item = Team>) -> Result<Self> {
        let repository = Self::new();
        for team in teams {
            repository.save(team).await?;
        }
        Ok(repository)
    }
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn get(&self, id: TeamId) -> Result<Team> {
        let teams = self.teams.read().await;
        teams.get(&id).cloned().ok_or_else(|| not_found(id))
    }

    async fn list(&self) -> Result<Vec<Team>> {
        let teams = self.teams.read().await;
        Ok(teams.values().cloned().collect())
    }

    async fn save(&self, mut team: Team) -> Result<Team> {
        let mut teams = self.teams.write().await;
        let id = match team.id {
            Some(id) => id,
            None => teams.keys().next_back().map_or(1, |max| max + 1),
        };
        team.id = Some(id);
        teams.insert(id, team.clone());
        Ok(team)
    }

    async fn delete(&self, id: TeamId) -> Result<TeamId> {
        let mut teams = self.teams.write().await;
        teams.remove(&id).map(|_| id).ok_or_else(|| not_found(id))
    }
}
