use axum::response::Response;
use serde::Serialize;

use crate::models::UserDetails;
use crate::session::CurrentSession;
use crate::state::AppState;
use crate::utils::response::success;

pub mod auth;
pub mod checkout;
pub mod dashboard;
pub mod events;
pub mod locations;
pub mod profile;
pub mod receipts;
pub mod reviews;
pub mod vouchers;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "vibetribe-web",
    };

    success(payload, "Health check successful")
}

/// Keeps the session's copy of the user in step with a fresh upstream read.
pub(crate) async fn cache_user(state: &AppState, session: &CurrentSession, user: &UserDetails) {
    let cached = user.clone();
    state
        .sessions
        .update(session.0.id, move |stored| stored.user = cached)
        .await;
}
