//! Team response DTOs

use serde::Serialize;

use crate::models::TeamStanding;

#[derive(Debug, Serialize)]
pub struct TeamDashboardResponse {
    pub name: String,
    pub description: Option<String>,
    pub logo: Option<String>,
    pub users: Vec<TeamStanding>,
}
