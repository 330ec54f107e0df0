use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, create_security_headers_layer};
use crate::handlers::{
    auth, checkout, dashboard, events, health_check, locations, profile, receipts, reviews,
    vouchers,
};
use crate::state::AppState;

pub fn create_routes(state: AppState) -> Router {
    let production = state.config.production;
    let cors = create_cors_layer(&state.config.allowed_origins);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(create_security_headers_layer(production))
        .layer(cors)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/signup", post(auth::signup))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/session", get(auth::current))
        .route("/events", get(events::list_events).post(events::create_event))
        .route("/events/upcoming", get(events::upcoming_events))
        .route("/events/more", get(events::more_events))
        .route("/events/:slug", get(events::event_detail))
        .route("/events/:slug/checkout", get(checkout::checkout_page))
        .route("/events/:slug/checkout/quote", post(checkout::checkout_quote))
        .route("/events/:slug/checkout/confirm", post(checkout::checkout_confirm))
        .route("/events/:slug/reviews", post(reviews::submit_review))
        .route("/reviews", get(reviews::review_feed))
        .route("/locations", get(locations::search_locations))
        .route("/receipts/:id", get(receipts::receipt))
        .route("/dashboard/customer", get(dashboard::customer_dashboard))
        .route("/dashboard/organizer", get(dashboard::organizer_dashboard))
        .route("/vouchers", get(vouchers::my_vouchers).post(vouchers::create_voucher))
        .route("/profile", get(profile::get_profile).put(profile::update_profile))
        .route("/users/:id", get(profile::public_profile))
}
