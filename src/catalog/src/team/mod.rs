//! Teams and the service managing them

mod objects;
mod repository;
mod service;

pub use objects::Team;
pub use repository::{InMemoryTeamRepository, TeamRepository};
pub use service::TeamService;
