//! Terms and conditions handler implementations

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedUser,
    models::TermsAndConditions,
    services::TermsService,
    state::AppState,
};

use super::{
    request::{AcceptTermsRequest, SaveTermsRequest},
    response::AcceptTermsResponse,
};

pub async fn get_terms(State(state): State<AppState>) -> AppResult<Json<TermsAndConditions>> {
    Ok(Json(TermsService::get(state.db()).await?))
}

/// Replace the terms; all users must accept them again
pub async fn save_terms(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<SaveTermsRequest>,
) -> AppResult<Json<TermsAndConditions>> {
    auth_user.require_admin()?;
    payload.validate()?;

    if payload.text.trim().is_empty() {
        return Err(AppError::Validation("Terms text cannot be blank".to_string()));
    }

    Ok(Json(TermsService::save(state.db(), &payload.text).await?))
}

pub async fn accept_terms(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<AcceptTermsRequest>,
) -> AppResult<Json<AcceptTermsResponse>> {
    let message =
        TermsService::accept(state.db(), &auth_user.id, payload.accepted_terms_cond).await?;
    Ok(Json(AcceptTermsResponse { message }))
}
