//! Terms and conditions service

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::{
    db::repositories::{TermsRepository, UserRepository},
    error::{AppError, AppResult},
    models::{ensure_acceptable, TermsAndConditions},
};

pub struct TermsService;

impl TermsService {
    pub async fn get(pool: &PgPool) -> AppResult<TermsAndConditions> {
        TermsRepository::find(pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Terms and Conditions not found".to_string()))
    }

    /// Replace the terms text; every user has to accept again
    pub async fn save(pool: &PgPool, text: &str) -> AppResult<TermsAndConditions> {
        let mut tx = pool.begin().await?;

        let terms = TermsRepository::save(&mut *tx, text).await?;
        let reset = UserRepository::reset_terms_acceptance(&mut *tx).await?;

        tx.commit().await?;

        info!(reset_users = reset, "Terms and conditions saved");
        Ok(terms)
    }

    /// Record the user's acceptance of the current terms
    pub async fn accept(pool: &PgPool, user_id: &Uuid, accepted: bool) -> AppResult<String> {
        let user = UserRepository::find_by_id(pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        ensure_acceptable(user.accepted_terms_cond, accepted)?;

        if !UserRepository::accept_terms(pool, user_id).await? {
            return Err(AppError::Validation(
                "Terms and Conditions already accepted".to_string(),
            ));
        }

        info!(user_id = %user_id, "Terms and conditions accepted");
        Ok(format!("Terms and Condition is accepted for {}", user.email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{services::UserService, test_utils};

    #[tokio::test]
    async fn test_missing_terms_are_not_found() {
        let pool = test_utils::test_pool().await;
        assert!(matches!(TermsService::get(&pool).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_accept_then_reject_repeat() {
        let pool = test_utils::test_pool().await;
        let user = test_utils::user(&pool, 15).await;
        TermsService::save(&pool, "Be kind.").await.unwrap();

        let declined = TermsService::accept(&pool, &user.id, false).await;
        assert!(matches!(declined, Err(AppError::Validation(_))));

        let message = TermsService::accept(&pool, &user.id, true).await.unwrap();
        assert!(message.ends_with(&user.email));
        assert!(UserService::get_user_by_id(&pool, &user.id).await.unwrap().accepted_terms_cond);

        let repeat = TermsService::accept(&pool, &user.id, true).await;
        assert!(matches!(repeat, Err(AppError::Validation(msg)) if msg.contains("already accepted")));
    }

    #[tokio::test]
    async fn test_saving_terms_resets_every_acceptance() {
        let pool = test_utils::test_pool().await;
        let first = test_utils::user(&pool, 15).await;
        let second = test_utils::user(&pool, 16).await;
        TermsService::save(&pool, "Version one").await.unwrap();
        TermsService::accept(&pool, &first.id, true).await.unwrap();
        TermsService::accept(&pool, &second.id, true).await.unwrap();

        let terms = TermsService::save(&pool, "Version two").await.unwrap();

        assert_eq!(terms.text, "Version two");
        assert_eq!(TermsService::get(&pool).await.unwrap().text, "Version two");
        for id in [first.id, second.id] {
            let user = UserService::get_user_by_id(&pool, &id).await.unwrap();
            assert!(!user.accepted_terms_cond);
        }
        TermsService::accept(&pool, &first.id, true).await.unwrap();
    }
}
