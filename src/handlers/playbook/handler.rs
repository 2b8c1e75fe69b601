//! Playbook handler implementation

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{
    error::AppResult,
    middleware::auth::AuthenticatedUser,
    models::{PlaybookTree, User},
    services::{DiscoverService, UserService},
    state::AppState,
};

/// The caller's profile summary with their frozen assignments
#[derive(Debug, Serialize)]
pub struct PlaybookResponse {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: i16,
    pub activity: Option<String>,
    pub assignments: Vec<PlaybookTree>,
    pub total_points: i64,
}

impl PlaybookResponse {
    fn new(user: User, assignments: Vec<PlaybookTree>, total_points: i64) -> Self {
        Self {
            first_name: user.first_name,
            last_name: user.last_name,
            age: user.age,
            activity: user.activity,
            assignments,
            total_points,
        }
    }
}

/// The caller's completed assignments, newest first
pub async fn get_playbook(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<PlaybookResponse>> {
    let user = UserService::get_user_by_id(state.db(), &auth_user.id).await?;
    let (assignments, total_points) = DiscoverService::playbook(state.db(), &auth_user.id).await?;

    Ok(Json(PlaybookResponse::new(user, assignments, total_points)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixtures::user;

    #[test]
    fn test_response_carries_profile_summary() {
        let mut owner = user(17, Some("Female"), Some("Law Explorers"));
        owner.first_name = Some("Ada".to_string());
        owner.last_name = Some("King".to_string());

        let body = serde_json::to_value(PlaybookResponse::new(owner, Vec::new(), 0)).unwrap();

        assert_eq!(body["first_name"], "Ada");
        assert_eq!(body["last_name"], "King");
        assert_eq!(body["age"], 17);
        assert_eq!(body["activity"], "Law Explorers");
        assert_eq!(body["assignments"].as_array().map(Vec::len), Some(0));
        assert_eq!(body["total_points"], 0);
    }
}
