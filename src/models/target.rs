//! Target model
//!
//! A target is a demographic matching rule attached to assignments. It is
//! not a user group: membership is computed by the targeting engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::constants::{MAX_USER_AGE, MIN_USER_AGE};

use super::user::{Activity, Gender};

/// Target database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Target {
    pub id: Uuid,
    pub name: String,
    pub min_age: i16,
    pub max_age: i16,
    pub male: bool,
    pub female: bool,
    pub non_binary: bool,
    pub transgender: bool,
    pub other: bool,
    pub law_explorer: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Editable fields of a target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRules {
    pub name: String,
    pub min_age: i16,
    pub max_age: i16,
    pub male: bool,
    pub female: bool,
    pub non_binary: bool,
    pub transgender: bool,
    pub other: bool,
    pub law_explorer: bool,
}

impl TargetRules {
    /// Check the age bounds of the rule
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.min_age < MIN_USER_AGE {
            return Err("Min age should be at least 13");
        }
        if self.max_age > MAX_USER_AGE {
            return Err("Max age should be at most 99");
        }
        if self.min_age > self.max_age {
            return Err("Min age should be less or equal to max age");
        }
        Ok(())
    }
}

impl Target {
    /// Genders whose flag is set on this target
    pub fn flagged_genders(&self) -> Vec<Gender> {
        [
            (self.male, Gender::Male),
            (self.female, Gender::Female),
            (self.non_binary, Gender::NonBinary),
            (self.transgender, Gender::Transgender),
            (self.other, Gender::Other),
        ]
        .into_iter()
        .filter_map(|(flagged, gender)| flagged.then_some(gender))
        .collect()
    }

    /// Activities a matching user may have.
    ///
    /// With no activity flag set the set is `{None}`: only users without an
    /// activity match.
    pub fn accepted_activities(&self) -> Vec<Option<Activity>> {
        let mut activities = Vec::new();
        if self.law_explorer {
            activities.push(Some(Activity::LawExplorers));
        }
        if activities.is_empty() {
            activities.push(None);
        }
        activities
    }

    pub fn rules(&self) -> TargetRules {
        TargetRules {
            name: self.name.clone(),
            min_age: self.min_age,
            max_age: self.max_age,
            male: self.male,
            female: self.female,
            non_binary: self.non_binary,
            transgender: self.transgender,
            other: self.other,
            law_explorer: self.law_explorer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(min_age: i16, max_age: i16) -> TargetRules {
        TargetRules {
            name: "Teens".to_string(),
            min_age,
            max_age,
            male: false,
            female: true,
            non_binary: false,
            transgender: false,
            other: false,
            law_explorer: true,
        }
    }

    #[test]
    fn test_age_range_validation() {
        assert!(rules(13, 17).validate().is_ok());
        assert!(rules(17, 17).validate().is_ok());
        assert!(rules(18, 17).validate().is_err());
        assert!(rules(12, 17).validate().is_err());
        assert!(rules(13, 100).validate().is_err());
    }

    #[test]
    fn test_activity_set_degenerates_to_none() {
        let now = Utc::now();
        let mut target = Target {
            id: Uuid::new_v4(),
            name: "All".to_string(),
            min_age: 13,
            max_age: 99,
            male: true,
            female: false,
            non_binary: false,
            transgender: false,
            other: true,
            law_explorer: true,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(target.accepted_activities(), vec![Some(Activity::LawExplorers)]);
        assert_eq!(target.flagged_genders(), vec![Gender::Male, Gender::Other]);

        target.law_explorer = false;
        assert_eq!(target.accepted_activities(), vec![None]);
    }
}
