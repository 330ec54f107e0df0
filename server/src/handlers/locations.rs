use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Response;
use serde::Deserialize;

use crate::models::LocationSuggestion;
use crate::state::AppState;
use crate::utils::response::success;
use crate::utils::AppResult;

#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    #[serde(default)]
    pub search: String,
}

/// Suggestions for the header's location box. A blank query never reaches
/// the upstream.
pub async fn search_locations(
    State(state): State<AppState>,
    query: Result<Query<LocationQuery>, QueryRejection>,
) -> AppResult<Response> {
    let Query(query) = query?;
    let search = query.search.trim();
    if search.is_empty() {
        return Ok(success(Vec::<LocationSuggestion>::new(), "Locations retrieved"));
    }

    let locations = state.backend.locations(search).await.unwrap_or_else(|err| {
        tracing::warn!(error = %err, search, "Location search unavailable");
        Vec::new()
    });
    let suggestions: Vec<LocationSuggestion> = locations
        .into_iter()
        .filter(|location| location.matches(search))
        .map(LocationSuggestion::from)
        .collect();

    Ok(success(suggestions, "Locations retrieved"))
}
