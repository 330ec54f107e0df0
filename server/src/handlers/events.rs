use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::models::{
    CreateEventRequest, Event, EventListParams, EventQuery, PageRequest, PageWindow, PublicProfile,
};
use crate::session::CurrentSession;
use crate::state::AppState;
use crate::utils::response::{created, success};
use crate::utils::{AppError, AppResult};

/// Cards per page on the listing screens.
pub const EVENTS_PAGE_SIZE: u32 = 8;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventListing {
    pub events: Vec<Event>,
    #[serde(flatten)]
    pub window: PageWindow,
}

#[derive(Debug, Deserialize)]
pub struct MoreEventsQuery {
    pub location: Option<String>,
    pub page: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetail {
    pub event: Event,
    pub organizer: Option<PublicProfile>,
}

pub async fn list_events(
    State(state): State<AppState>,
    query: Result<Query<EventQuery>, QueryRejection>,
) -> AppResult<Response> {
    let Query(query) = query?;
    let request = PageRequest::new(query.page, EVENTS_PAGE_SIZE);
    let params = EventListParams {
        page: request.upstream_index(),
        size: request.size(),
        sort: query.sort,
        category: query.category,
        location: query.location,
        search: query.search,
    };

    let page = state.backend.list_events(&params).await?;
    let listing = EventListing {
        events: page.content,
        window: PageWindow::new(request.page(), page.total_pages),
    };

    Ok(success(listing, "Events retrieved"))
}

/// Events held outside `location`, paged like the main listing.
pub async fn more_events(
    State(state): State<AppState>,
    query: Result<Query<MoreEventsQuery>, QueryRejection>,
) -> AppResult<Response> {
    let Query(query) = query?;
    let location = query
        .location
        .as_deref()
        .map(str::trim)
        .filter(|location| !location.is_empty())
        .ok_or_else(|| AppError::ValidationError("Location is required.".to_string()))?;
    let request = PageRequest::new(query.page, EVENTS_PAGE_SIZE);

    let page = state
        .backend
        .events_outside(location, request.upstream_index(), request.size())
        .await?;
    let listing = EventListing {
        events: page.content,
        window: PageWindow::new(request.page(), page.total_pages),
    };

    Ok(success(listing, "Events retrieved"))
}

pub async fn upcoming_events(
    State(state): State<AppState>,
    session: CurrentSession,
) -> AppResult<Response> {
    let page = state.backend.upcoming_events(session.token()).await?;
    Ok(success(page.content, "Upcoming events retrieved"))
}

pub async fn event_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Response> {
    let event = state.backend.event(&slug).await?;

    // The page still renders without the organizer card.
    let organizer = match event.organizer_id {
        Some(organizer_id) => match state.backend.public_profile(organizer_id).await {
            Ok(profile) => Some(profile),
            Err(err) => {
                tracing::warn!(organizer_id, error = %err, "Organizer profile unavailable");
                None
            }
        },
        None => None,
    };

    Ok(success(EventDetail { event, organizer }, "Event retrieved"))
}

pub async fn create_event(
    State(state): State<AppState>,
    session: CurrentSession,
    payload: Result<Json<CreateEventRequest>, JsonRejection>,
) -> AppResult<Response> {
    session.require_organizer()?;
    let Json(request) = payload?;
    request.validate().map_err(AppError::ValidationError)?;

    state.backend.create_event(session.token(), &request).await?;
    tracing::info!(title = %request.title, "Event created");

    Ok(created(request, "Event created successfully!"))
}
