//! User response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::User;

/// Full user profile as seen by admins and by the user
#[derive(Debug, Serialize)]
pub struct UserProfileResponse {
    pub id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: i16,
    pub gender: Option<String>,
    pub guardian_email: Option<String>,
    pub activity: Option<String>,
    pub team_id: Option<Uuid>,
    pub total_points: i32,
    pub first_login: bool,
    pub accepted_terms_cond: bool,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfileResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
            age: u.age,
            gender: u.gender,
            guardian_email: u.guardian_email,
            activity: u.activity,
            team_id: u.team_id,
            total_points: u.total_points,
            first_login: u.first_login,
            accepted_terms_cond: u.accepted_terms_cond,
            is_admin: u.is_admin,
            created_at: u.created_at,
        }
    }
}

/// User list response
#[derive(Debug, Serialize)]
pub struct UsersListResponse {
    pub users: Vec<UserProfileResponse>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}
