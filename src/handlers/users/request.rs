//! User request DTOs

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::{MAX_NAME_LENGTH, MAX_PASSWORD_LENGTH, MAX_USER_AGE, MIN_USER_AGE},
    error::AppResult,
    models::{ProfileFields, UserFields},
    utils::{parse_activity, parse_gender},
};

/// Profile fields shared by create and update
#[derive(Debug, Deserialize, Validate)]
pub struct UserProfile {
    #[validate(email)]
    pub email: String,

    #[validate(length(max = MAX_NAME_LENGTH))]
    pub first_name: Option<String>,

    #[validate(length(max = MAX_NAME_LENGTH))]
    pub last_name: Option<String>,

    #[validate(range(min = MIN_USER_AGE, max = MAX_USER_AGE))]
    pub age: i16,

    pub gender: Option<String>,

    #[validate(email)]
    pub guardian_email: Option<String>,

    pub activity: Option<String>,

    pub team_id: Option<Uuid>,

    #[serde(default)]
    pub is_admin: bool,
}

impl UserProfile {
    pub fn into_fields(self) -> AppResult<UserFields> {
        Ok(UserFields {
            gender: parse_gender(self.gender.as_deref())?,
            activity: parse_activity(self.activity.as_deref())?,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            age: self.age,
            guardian_email: self.guardian_email,
            team_id: self.team_id,
            is_admin: self.is_admin,
        })
    }
}

/// Create user request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub profile: UserProfile,

    #[validate(length(min = 8, max = MAX_PASSWORD_LENGTH))]
    pub password: String,
}

/// Update user request; the password is kept when omitted
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub profile: UserProfile,

    #[validate(length(min = 8, max = MAX_PASSWORD_LENGTH))]
    pub password: Option<String>,
}

/// A user's edit of their own profile; absent fields stay unchanged
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateOwnProfileRequest {
    #[validate(length(max = MAX_NAME_LENGTH))]
    pub first_name: Option<String>,

    #[validate(length(max = MAX_NAME_LENGTH))]
    pub last_name: Option<String>,

    #[validate(range(min = MIN_USER_AGE, max = MAX_USER_AGE))]
    pub age: Option<i16>,

    pub gender: Option<String>,

    #[validate(email)]
    pub guardian_email: Option<String>,

    pub activity: Option<String>,
}

impl UpdateOwnProfileRequest {
    pub fn apply(self, profile: &mut ProfileFields) -> AppResult<()> {
        if self.gender.is_some() {
            profile.gender = parse_gender(self.gender.as_deref())?;
        }
        if self.activity.is_some() {
            profile.activity = parse_activity(self.activity.as_deref())?;
        }
        if let Some(first_name) = self.first_name {
            profile.first_name = Some(first_name);
        }
        if let Some(last_name) = self.last_name {
            profile.last_name = Some(last_name);
        }
        if let Some(age) = self.age {
            profile.age = age;
        }
        if let Some(guardian_email) = self.guardian_email {
            profile.guardian_email = Some(guardian_email);
        }
        Ok(())
    }
}

/// List users query parameters
#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Activity, Gender};

    fn profile() -> ProfileFields {
        ProfileFields {
            first_name: Some("Sam".to_string()),
            last_name: Some("Vimes".to_string()),
            age: 16,
            gender: Some(Gender::Male),
            guardian_email: None,
            activity: None,
        }
    }

    #[test]
    fn test_own_profile_edit_keeps_absent_fields() {
        let mut current = profile();
        let edit: UpdateOwnProfileRequest =
            serde_json::from_str(r#"{"age": 17, "activity": "Law Explorers"}"#).unwrap();

        edit.apply(&mut current).unwrap();

        assert_eq!(current.age, 17);
        assert_eq!(current.activity, Some(Activity::LawExplorers));
        assert_eq!(current.first_name.as_deref(), Some("Sam"));
        assert_eq!(current.gender, Some(Gender::Male));
    }

    #[test]
    fn test_own_profile_edit_rejects_bad_values() {
        let edit = UpdateOwnProfileRequest { age: Some(5), ..Default::default() };
        assert!(edit.validate().is_err());

        let edit = UpdateOwnProfileRequest {
            gender: Some("robot".to_string()),
            ..Default::default()
        };
        let mut current = profile();
        assert!(edit.apply(&mut current).is_err());
    }
}
