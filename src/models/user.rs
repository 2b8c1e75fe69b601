//! User model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::constants::{activities, genders, roles};

/// User database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
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
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Parsed gender, `None` when unset or unrecognised
    pub fn gender(&self) -> Option<Gender> {
        self.gender.as_deref().and_then(Gender::from_str)
    }

    /// Parsed activity, `None` when unset or unrecognised
    pub fn activity(&self) -> Option<Activity> {
        self.activity.as_deref().and_then(Activity::from_str)
    }

    /// Role name carried in access tokens
    pub fn role(&self) -> &'static str {
        if self.is_admin { roles::ADMIN } else { roles::USER }
    }
}

/// Profile fields an administrator can set on a user
#[derive(Debug, Clone)]
pub struct UserFields {
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: i16,
    pub gender: Option<Gender>,
    pub guardian_email: Option<String>,
    pub activity: Option<Activity>,
    pub team_id: Option<Uuid>,
    pub is_admin: bool,
}

/// Profile fields a user may change on their own account
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileFields {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: i16,
    pub gender: Option<Gender>,
    pub guardian_email: Option<String>,
    pub activity: Option<Activity>,
}

impl From<&User> for ProfileFields {
    fn from(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            age: user.age,
            gender: user.gender(),
            guardian_email: user.guardian_email.clone(),
            activity: user.activity(),
        }
    }
}

/// Team a user belongs to
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub logo: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// User gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    NonBinary,
    Transgender,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => genders::MALE,
            Self::Female => genders::FEMALE,
            Self::NonBinary => genders::NON_BINARY,
            Self::Transgender => genders::TRANSGENDER,
            Self::Other => genders::OTHER,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            genders::MALE => Some(Self::Male),
            genders::FEMALE => Some(Self::Female),
            genders::NON_BINARY => Some(Self::NonBinary),
            genders::TRANSGENDER => Some(Self::Transgender),
            genders::OTHER => Some(Self::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Extracurricular activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Activity {
    LawExplorers,
}

impl Activity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LawExplorers => activities::LAW_EXPLORERS,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            activities::LAW_EXPLORERS => Some(Self::LawExplorers),
            _ => None,
        }
    }
}

impl std::fmt::Display for Activity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of a team's leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamStanding {
    pub rank: u32,
    pub name: String,
    pub total_points: i32,
}

/// Rank already-ordered team members; the caller is shown as "You"
pub fn rank_members(caller_id: &Uuid, members: &[User]) -> Vec<TeamStanding> {
    members
        .iter()
        .zip(1u32..)
        .map(|(member, rank)| TeamStanding {
            rank,
            name: if member.id == *caller_id {
                "You".to_string()
            } else {
                display_name(member)
            },
            total_points: member.total_points,
        })
        .collect()
}

/// "Last First", skipping whichever part is missing
fn display_name(user: &User) -> String {
    [user.last_name.as_deref(), user.first_name.as_deref()]
        .into_iter()
        .flatten()
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
