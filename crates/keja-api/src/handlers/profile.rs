//! Profile settings handlers

use axum::{extract::State, Json};

use keja_core::domain::{Profile, ProfileUpdate};

use crate::auth::AuthSession;
use crate::dto::ValidatedJson;
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/profile
pub async fn get_profile(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
) -> Result<Json<ApiResponse<Profile>>, ApiError> {
    let profile = state.profiles.get_or_create(&session).await?;
    Ok(Json(ApiResponse::success(profile)))
}

/// PUT /api/v1/profile
pub async fn update_profile(
    State(state): State<AppState>,
    AuthSession(session): AuthSession,
    ValidatedJson(update): ValidatedJson<ProfileUpdate>,
) -> Result<Json<ApiResponse<Profile>>, ApiError> {
    let profile = state.profiles.update(&session, update).await?;
    Ok(Json(ApiResponse::success(profile)))
}
