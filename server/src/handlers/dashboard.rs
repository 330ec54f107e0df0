use axum::extract::State;
use axum::response::Response;
use serde::Serialize;

use crate::models::{
    Event, EventStatistic, Review, StatisticsSummary, TransactionRecord, UserDetails, Voucher,
};
use crate::session::CurrentSession;
use crate::state::AppState;
use crate::upstream::{UpstreamError, UpstreamResult};
use crate::utils::response::success;
use crate::utils::AppResult;

/// The organizer's event table loads everything in one page.
pub const ORGANIZER_EVENTS_PAGE_SIZE: u32 = 100;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDashboard {
    pub profile: UserDetails,
    pub upcoming_events: Vec<Event>,
    pub past_events: Vec<Event>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizerDashboard {
    pub profile: UserDetails,
    pub events: Vec<Event>,
    pub statistics: Vec<EventStatistic>,
    pub summary: StatisticsSummary,
    pub transactions: Vec<TransactionRecord>,
    pub reviews: Vec<Review>,
    pub vouchers: Vec<Voucher>,
}

pub async fn customer_dashboard(
    State(state): State<AppState>,
    session: CurrentSession,
) -> AppResult<Response> {
    let backend = state.backend.as_ref();
    let token = session.token();
    let (upcoming, past, profile) = tokio::try_join!(
        backend.upcoming_events(token),
        backend.past_events(token),
        backend.user_details(token),
    )?;

    let dashboard = CustomerDashboard {
        profile,
        upcoming_events: upcoming.content,
        past_events: past.content,
    };
    Ok(success(dashboard, "Dashboard retrieved"))
}

pub async fn organizer_dashboard(
    State(state): State<AppState>,
    session: CurrentSession,
) -> AppResult<Response> {
    session.require_organizer()?;
    let backend = state.backend.as_ref();
    let token = session.token();

    let (profile, events, statistics, transactions, reviews, vouchers) = tokio::join!(
        backend.user_details(token),
        backend.organizer_events(token, ORGANIZER_EVENTS_PAGE_SIZE),
        backend.event_statistics(token),
        backend.transaction_history(token),
        backend.organizer_reviews(token),
        backend.upcoming_vouchers(token),
    );

    let profile = profile?;
    let events = section("events", events)?.map(|page| page.content).unwrap_or_default();
    let statistics = section("statistics", statistics)?.unwrap_or_default();
    let transactions = section("transactions", transactions)?.unwrap_or_default();
    let reviews = section("reviews", reviews)?.unwrap_or_default();
    let vouchers = section("vouchers", vouchers)?.unwrap_or_default();

    let dashboard = OrganizerDashboard {
        profile,
        summary: StatisticsSummary::from_statistics(&statistics),
        events,
        statistics,
        transactions,
        reviews,
        vouchers,
    };
    Ok(success(dashboard, "Dashboard retrieved"))
}

/// A dashboard widget that failed renders empty; a rejected token still
/// fails the whole page.
fn section<T>(name: &'static str, result: UpstreamResult<T>) -> UpstreamResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(UpstreamError::Unauthorized) => Err(UpstreamError::Unauthorized),
        Err(err) => {
            tracing::warn!(section = name, error = %err, "Dashboard section unavailable");
            Ok(None)
        }
    }
}
