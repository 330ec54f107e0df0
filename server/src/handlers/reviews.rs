use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;

use crate::models::review::ReviewForm;
use crate::models::ticket::holds_valid_ticket;
use crate::models::ReviewRequest;
use crate::session::CurrentSession;
use crate::state::AppState;
use crate::utils::response::{empty_success, success};
use crate::utils::{AppError, AppResult};

pub async fn submit_review(
    State(state): State<AppState>,
    session: CurrentSession,
    Path(slug): Path<String>,
    payload: Result<Json<ReviewForm>, JsonRejection>,
) -> AppResult<Response> {
    let Json(form) = payload?;
    let backend = state.backend.as_ref();
    let (event, tickets) = tokio::try_join!(backend.event(&slug), backend.past_tickets(session.token()))?;

    if !holds_valid_ticket(&tickets, event.id) {
        return Err(AppError::Forbidden(
            "You can only review events you have attended.".to_string(),
        ));
    }

    let request = ReviewRequest::from_form(event.id, form).map_err(AppError::ValidationError)?;
    backend.submit_review(session.token(), &request).await?;
    tracing::info!(event_id = event.id, rating = request.rating, "Review submitted");

    Ok(empty_success("Review submitted successfully!"))
}

/// The public review feed on the home page. The section is decorative, so an
/// unavailable upstream renders it empty.
pub async fn review_feed(State(state): State<AppState>) -> Response {
    let reviews = state.backend.review_feed().await.unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Review feed unavailable");
        Vec::new()
    });
    success(reviews, "Reviews retrieved")
}
