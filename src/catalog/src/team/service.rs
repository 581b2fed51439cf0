//! Team service
//!
//! Reads are open. Creating and deleting teams is reserved to admins; a team
//! member may change the contact fields of their own team.

use super::objects::Team;
use super::repository::TeamRepository;
use crate::error::Result;
use crate::object::{self, Data};
use crate::ownership::refresh_after_write;
use catalog_authz::engine::rules::{CAN_UPDATE_TEAM, IS_ADMIN};
use catalog_authz::{AuthContext, Authorizer, Guard, Scopes, TeamId};
use std::sync::Arc;
use tracing::{debug, info};

pub struct TeamService {
    repository: Arc<dyn TeamRepository>,
    authorizer: Arc<Authorizer>,
    admin_guard: Guard,
    update_guard: Guard,
}

impl TeamService {
    /// Wire the service; fails when the authorizer lacks a rule it needs
    pub fn new(repository: Arc<dyn TeamRepository>, authorizer: Arc<Authorizer>) -> Result<Self> {
        let admin_guard = authorizer.guard(&[IS_ADMIN])?;
        let update_guard = authorizer.guard(&[IS_ADMIN, CAN_UPDATE_TEAM])?;

        Ok(Self {
            repository,
            authorizer,
            admin_guard,
            update_guard,
        })
    }

    pub async fn get_team(&self, team_id: TeamId) -> Result<Team> {
        self.repository.get(team_id).await
    }

    pub async fn get_teams(&self) -> Result<Vec<Team>> {
        self.repository.list().await
    }

    pub async fn create_team(&self, data: &Data, scopes: &Scopes) -> Result<Team> {
        let ctx = AuthContext::new(scopes).with_data(data);
        self.authorizer.enforce(&self.admin_guard, &ctx)?;

        object::reject_id(data)?;
        let team: Team = object::from_data(data)?;
        team.validate()?;

        let team = self.repository.save(team).await?;
        info!("Created team {:?} ({})", team.id, team.acronym);

        refresh_after_write(&self.authorizer, format!("Team {:?}", team.id)).await;
        Ok(team)
    }

    /// Partial update; only the submitted keys change
    pub async fn update_team(&self, team_id: TeamId, data: &Data, scopes: &Scopes) -> Result<Team> {
        let ctx = AuthContext::new(scopes).for_team(team_id).with_data(data);
        self.authorizer.enforce(&self.update_guard, &ctx)?;

        object::check_id(data, team_id, "team")?;
        let existing = self.repository.get(team_id).await?;
        let updated: Team = object::merge(&existing, data, Team::SKIP_KEYS)?;
        updated.validate()?;

        let scope_changed = updated.scope != existing.scope;
        let team = self.repository.save(updated).await?;
        debug!("Updated team {} fields {:?}", team_id, data.keys().collect::<Vec<_>>());

        if scope_changed {
            info!("Scope of team {} changed, refreshing authorization snapshot", team_id);
            refresh_after_write(&self.authorizer, format!("Team {}", team_id)).await;
        }
        Ok(team)
    }

    pub async fn delete_team(&self, team_id: TeamId, scopes: &Scopes) -> Result<TeamId> {
        let ctx = AuthContext::new(scopes).for_team(team_id);
        self.authorizer.enforce(&self.admin_guard, &ctx)?;

        let deleted = self.repository.delete(team_id).await?;
        info!("Deleted team {}", deleted);

        refresh_after_write(&self.authorizer, format!("Deletion of team {}", deleted)).await;
        Ok(deleted)
    }
}
