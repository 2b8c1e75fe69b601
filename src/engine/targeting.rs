//! Targeting rule evaluation

use crate::models::{Target, User};

/// Whether `user` satisfies the demographic rule of `target`.
///
/// Age bounds are inclusive. A user without a gender never matches. When
/// the target flags no activity, only users without an activity match.
pub fn matches(target: &Target, user: &User) -> bool {
    if user.age < target.min_age || user.age > target.max_age {
        return false;
    }

    let Some(gender) = user.gender() else {
        return false;
    };
    if !target.flagged_genders().contains(&gender) {
        return false;
    }

    target.accepted_activities().contains(&user.activity())
}

/// Whether an assignment with the given target reaches `user`.
///
/// Untargeted assignments are never handed out by targeting.
pub fn assignment_matches(target: Option<&Target>, user: &User) -> bool {
    target.is_some_and(|target| matches(target, user))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::constants::{activities, genders};
    use crate::engine::fixtures::{target, user};

    fn teen_girls() -> Target {
        let mut t = target(13, 17);
        t.female = true;
        t
    }

    #[test]
    fn test_female_teen_scenario() {
        let t = teen_girls();
        assert!(matches(&t, &user(16, Some(genders::FEMALE), None)));
        assert!(!matches(&t, &user(18, Some(genders::FEMALE), None)));
        assert!(!matches(&t, &user(16, Some(genders::MALE), None)));
    }

    #[test]
    fn test_user_without_gender_never_matches() {
        let mut t = teen_girls();
        t.male = true;
        t.non_binary = true;
        t.transgender = true;
        t.other = true;
        assert!(!matches(&t, &user(15, None, None)));
    }

    #[test]
    fn test_activity_flag() {
        let mut t = teen_girls();
        let explorer = user(15, Some(genders::FEMALE), Some(activities::LAW_EXPLORERS));
        let plain = user(15, Some(genders::FEMALE), None);

        // Flag off: only users without an activity.
        assert!(!matches(&t, &explorer));
        assert!(matches(&t, &plain));

        t.law_explorer = true;
        assert!(matches(&t, &explorer));
        assert!(!matches(&t, &plain));
    }

    #[test]
    fn test_untargeted_assignment_matches_no_one() {
        assert!(!assignment_matches(None, &user(15, Some(genders::FEMALE), None)));
        assert!(assignment_matches(
            Some(&teen_girls()),
            &user(15, Some(genders::FEMALE), None)
        ));
    }

    proptest! {
        #[test]
        fn prop_age_bounds_are_inclusive(min in 13i16..=99, span in 0i16..=86) {
            let max = (min + span).min(99);
            let mut t = target(min, max);
            t.other = true;
            let at = |age: i16| matches(&t, &user(age, Some(genders::OTHER), None));

            prop_assert!(at(min));
            prop_assert!(at(max));
            prop_assert!(!at(min - 1));
            prop_assert!(!at(max + 1));
        }

        #[test]
        fn prop_gender_must_be_flagged(
            flags in proptest::array::uniform5(any::<bool>()),
            label in proptest::sample::select(genders::ALL.to_vec()),
        ) {
            let mut t = target(13, 99);
            t.male = flags[0];
            t.female = flags[1];
            t.non_binary = flags[2];
            t.transgender = flags[3];
            t.other = flags[4];

            let u = user(30, Some(label), None);
            let expected = u.gender().is_some_and(|g| t.flagged_genders().contains(&g));
            prop_assert_eq!(matches(&t, &u), expected);
        }
    }
}
