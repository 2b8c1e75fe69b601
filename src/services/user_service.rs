//! User service

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::{
    db::repositories::{TeamRepository, UserRepository},
    engine::Trigger,
    error::{AppError, AppResult},
    models::{ProfileFields, User, UserFields},
    services::{AuthService, ReassignmentService},
    utils::Page,
};

/// User service for business logic
pub struct UserService;

impl UserService {
    /// Create a user and hand out the assignments targeting them
    pub async fn create(pool: &PgPool, fields: &UserFields, password: &str) -> AppResult<User> {
        let password_hash = AuthService::hash_password(password)?;

        let mut tx = pool.begin().await?;

        if UserRepository::find_by_email(&mut *tx, &fields.email).await?.is_some() {
            return Err(AppError::AlreadyExists("Email already registered".to_string()));
        }
        if let Some(team_id) = &fields.team_id {
            if TeamRepository::find_by_id(&mut *tx, team_id).await?.is_none() {
                return Err(AppError::NotFound("Team not found".to_string()));
            }
        }

        let user = UserRepository::create(&mut *tx, fields, &password_hash).await?;
        ReassignmentService::reevaluate(&mut tx, Trigger::UserSaved(user.id)).await?;

        tx.commit().await?;

        info!(user_id = %user.id, "User created");
        Ok(user)
    }

    /// Replace a user's profile and re-evaluate their incomplete links
    pub async fn update(
        pool: &PgPool,
        id: &Uuid,
        fields: &UserFields,
        password: Option<&str>,
    ) -> AppResult<User> {
        let password_hash = password.map(AuthService::hash_password).transpose()?;

        let mut tx = pool.begin().await?;

        if let Some(team_id) = &fields.team_id {
            if TeamRepository::find_by_id(&mut *tx, team_id).await?.is_none() {
                return Err(AppError::NotFound("Team not found".to_string()));
            }
        }

        let user = UserRepository::update(&mut *tx, id, fields, password_hash.as_deref())
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        ReassignmentService::reevaluate(&mut tx, Trigger::UserSaved(user.id)).await?;

        tx.commit().await?;

        info!(user_id = %user.id, "User updated");
        Ok(user)
    }

    /// Get user by ID
    pub async fn get_user_by_id(pool: &PgPool, id: &Uuid) -> AppResult<User> {
        UserRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// List users with pagination
    pub async fn list_users(
        pool: &PgPool,
        page: &Page,
        search: Option<&str>,
    ) -> AppResult<(Vec<User>, i64)> {
        UserRepository::list(pool, page.offset(), page.limit(), search).await
    }

    /// Apply a user's own profile edit; `edit` receives the current profile
    ///
    /// The first edit also ends onboarding (`first_login` becomes false).
    pub async fn update_own_profile<F>(pool: &PgPool, id: &Uuid, edit: F) -> AppResult<User>
    where
        F: FnOnce(&mut ProfileFields) -> AppResult<()>,
    {
        let mut tx = pool.begin().await?;

        let current = UserRepository::find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        let was_first_login = current.first_login;

        let mut profile = ProfileFields::from(&current);
        edit(&mut profile)?;

        let user = UserRepository::update_profile(&mut *tx, id, &profile)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        ReassignmentService::reevaluate(&mut tx, Trigger::UserSaved(user.id)).await?;

        tx.commit().await?;

        info!(user_id = %user.id, onboarded = was_first_login, "Profile updated");
        Ok(user)
    }

    /// Delete a user; their playbook entries stay without an owner
    pub async fn delete(pool: &PgPool, id: &Uuid) -> AppResult<()> {
        if !UserRepository::delete(pool, id).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        info!(user_id = %id, "User deleted");
        Ok(())
    }
}
