use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Response;
use axum::Json;
use chrono::Utc;

use crate::models::{LoginRequest, SignupRequest};
use crate::session::{self, CurrentSession};
use crate::state::AppState;
use crate::utils::response::{empty_success, success};
use crate::utils::{AppError, AppResult};

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Response> {
    let Json(credentials) = payload?;
    if credentials.email.trim().is_empty() || credentials.password.is_empty() {
        return Err(AppError::ValidationError(
            "Email and password are required.".to_string(),
        ));
    }

    let session = session::login(
        state.backend.as_ref(),
        &state.sessions,
        state.config.session_ttl,
        &credentials,
        Utc::now(),
    )
    .await?;

    Ok(success(session.view(), "Login successful"))
}

pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> AppResult<Response> {
    let Json(request) = payload?;
    request.validate().map_err(AppError::ValidationError)?;

    state.backend.signup(&request.normalised()).await?;
    Ok(empty_success("Signup successful. Please log in."))
}

pub async fn current(session: CurrentSession) -> Response {
    success(session.0.view(), "Session active")
}

pub async fn refresh(State(state): State<AppState>, session: CurrentSession) -> AppResult<Response> {
    let refreshed = session::refresh(state.backend.as_ref(), &state.sessions, &session.0).await?;
    Ok(success(refreshed.view(), "Session refreshed"))
}

pub async fn logout(State(state): State<AppState>, session: Option<CurrentSession>) -> Response {
    if let Some(CurrentSession(current)) = session {
        session::logout(&state.sessions, current.id).await;
    }
    empty_success("Logged out")
}
