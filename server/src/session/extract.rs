use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use chrono::Utc;
use uuid::Uuid;

use super::AuthSession;
use crate::state::AppState;
use crate::utils::AppError;

/// The caller's live session, resolved from `Authorization: Bearer <id>`.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub AuthSession);

impl CurrentSession {
    pub fn token(&self) -> &str {
        &self.0.token
    }

    pub fn require_organizer(&self) -> Result<(), AppError> {
        if self.0.user.is_organizer() {
            Ok(())
        } else {
            Err(AppError::Forbidden("Only organizers can do this.".to_string()))
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let id = bearer_session_id(parts)?;
        state
            .sessions
            .get(id, Utc::now())
            .await
            .map(CurrentSession)
            .ok_or_else(|| AppError::AuthError("You are not logged in!".to_string()))
    }
}

fn bearer_session_id(parts: &Parts) -> Result<Uuid, AppError> {
    let value = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::AuthError("Missing authorization header".to_string()))?;

    let raw = value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .ok_or_else(|| {
            AppError::AuthError("Invalid authorization format. Expected 'Bearer <session>'".to_string())
        })?;

    Uuid::parse_str(raw).map_err(|_| AppError::AuthError("Unknown session".to_string()))
}
