//! Terms and conditions repository

use sqlx::PgExecutor;

use crate::{error::AppResult, models::TermsAndConditions};

pub struct TermsRepository;

impl TermsRepository {
    pub async fn find<'e, E: PgExecutor<'e>>(executor: E) -> AppResult<Option<TermsAndConditions>> {
        let terms = sqlx::query_as::<_, TermsAndConditions>(
            r#"SELECT text, updated_at FROM terms_and_conditions WHERE id = 1"#,
        )
        .fetch_optional(executor)
        .await?;

        Ok(terms)
    }

    /// Insert or replace the single terms row
    pub async fn save<'e, E: PgExecutor<'e>>(executor: E, text: &str) -> AppResult<TermsAndConditions> {
        let terms = sqlx::query_as::<_, TermsAndConditions>(
            r#"
            INSERT INTO terms_and_conditions (id, text)
            VALUES (1, $1)
            ON CONFLICT (id) DO UPDATE SET text = EXCLUDED.text, updated_at = NOW()
            RETURNING text, updated_at
            "#,
        )
        .bind(text)
        .fetch_one(executor)
        .await?;

        Ok(terms)
    }
}
