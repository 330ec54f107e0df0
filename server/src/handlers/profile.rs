use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;

use super::cache_user;
use crate::models::{UpdateProfileRequest, UserDetails};
use crate::session::CurrentSession;
use crate::state::AppState;
use crate::utils::response::success;
use crate::utils::{AppError, AppResult};

pub async fn get_profile(
    State(state): State<AppState>,
    session: CurrentSession,
) -> AppResult<Response> {
    let user = reload_user(&state, &session).await?;
    Ok(success(user, "Profile retrieved"))
}

pub async fn update_profile(
    State(state): State<AppState>,
    session: CurrentSession,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> AppResult<Response> {
    let Json(mut request) = payload?;
    request.name = request.name.trim().to_string();
    request.email = request.email.trim().to_string();
    if request.name.is_empty() {
        return Err(AppError::ValidationError("Name is required.".to_string()));
    }
    if !request.email.contains('@') {
        return Err(AppError::ValidationError("Please enter a valid email.".to_string()));
    }

    state.backend.update_user(session.token(), &request).await?;
    let user = reload_user(&state, &session).await?;
    tracing::info!(session = %session.0.id, "Profile updated");

    Ok(success(user, "Profile updated successfully!"))
}

pub async fn public_profile(
    State(state): State<AppState>,
    user_id: Result<Path<i64>, PathRejection>,
) -> AppResult<Response> {
    let Path(user_id) = user_id?;
    let profile = state.backend.public_profile(user_id).await?;
    Ok(success(profile, "Profile retrieved"))
}

async fn reload_user(state: &AppState, session: &CurrentSession) -> AppResult<UserDetails> {
    let user = state.backend.user_details(session.token()).await?;
    cache_user(state, session, &user).await;
    Ok(user)
}
