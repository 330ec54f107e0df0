mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::{Method, StatusCode};
use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vibetribe_server::models::{
    CreateTransactionRequest, EventListParams, EventSort, LoginRequest, Role, VoucherScope,
};
use vibetribe_server::config::Config;
use vibetribe_server::routes::create_routes;
use vibetribe_server::state::AppState;
use vibetribe_server::upstream::{Backend, HttpBackend, UpstreamError};

fn backend(server: &MockServer) -> HttpBackend {
    HttpBackend::new(format!("{}/", server.uri()), Duration::from_secs(5)).unwrap()
}

fn listing(sort: EventSort) -> EventListParams {
    EventListParams {
        page: 1,
        size: 8,
        sort,
        category: Some("Music".to_string()),
        location: None,
        search: Some("  ".to_string()),
    }
}

#[tokio::test]
async fn test_login_posts_credentials_and_unwraps_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/login"))
        .and(body_json(json!({"email": "ayu@example.com", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Login successful",
            "data": {"accessToken": "jwt"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let token = backend(&server)
        .login(&LoginRequest {
            email: "ayu@example.com".to_string(),
            password: "secret".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(token.access_token, "jwt");
}

#[tokio::test]
async fn test_authenticated_calls_send_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/user/details"))
        .and(header("authorization", "Bearer jwt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "id": 1,
                "name": "Ayu",
                "email": "ayu@example.com",
                "role": "CUSTOMER",
                "pointsBalance": 20000
            }
        })))
        .mount(&server)
        .await;

    let user = backend(&server).user_details("jwt").await.unwrap();
    assert_eq!(user.role, Role::Customer);
    assert_eq!(user.points_balance, Decimal::from(20_000));
}

#[tokio::test]
async fn test_status_codes_map_to_upstream_errors() {
    let server = MockServer::start().await;
    Mock::given(path("/api/v1/user/details"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(path("/api/v1/events/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(path("/api/v1/transactions"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "message": "Not enough seats"
        })))
        .mount(&server)
        .await;
    Mock::given(path("/api/v1/events/broken"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let backend = backend(&server);
    assert!(matches!(
        backend.user_details("expired").await,
        Err(UpstreamError::Unauthorized)
    ));
    assert!(matches!(backend.event("missing").await, Err(UpstreamError::NotFound)));

    let request = CreateTransactionRequest {
        event_id: 7,
        voucher_code: None,
        quantity: 1,
        is_use_points: false,
    };
    match backend.create_transaction("jwt", &request).await {
        Err(UpstreamError::Rejected(message)) => assert_eq!(message, "Not enough seats"),
        other => panic!("unexpected result: {:?}", other),
    }

    match backend.event("broken").await {
        Err(UpstreamError::Status { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "maintenance");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_unsuccessful_envelope_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(path("/api/v1/events/jazz-night"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Event is archived"
        })))
        .mount(&server)
        .await;

    match backend(&server).event("jazz-night").await {
        Err(UpstreamError::Rejected(message)) => assert_eq!(message, "Event is archived"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_listing_sends_filters_and_sort() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/events"))
        .and(query_param("page", "1"))
        .and(query_param("size", "8"))
        .and(query_param("sortByNewest", "true"))
        .and(query_param("category", "Music"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "content": [{
                    "id": 7,
                    "title": "Jazz Night",
                    "dateTimeStart": "2026-12-01T19:00:00",
                    "fee": 100000
                }],
                "totalPages": 4,
                "totalElements": 30,
                "number": 1,
                "size": 8
            }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/events/hottest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend(&server);
    let page = backend.list_events(&listing(EventSort::Newest)).await.unwrap();
    assert_eq!(page.total_pages, 4);
    assert_eq!(page.content[0].fee, Decimal::from(100_000));

    let popular = backend.list_events(&listing(EventSort::Popular)).await.unwrap();
    assert!(popular.content.is_empty());
}

#[tokio::test]
async fn test_vouchers_are_tagged_with_their_scope() {
    let server = MockServer::start().await;
    Mock::given(path("/api/v1/vouchers/by-event"))
        .and(query_param("eventId", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"content": [{"voucherCode": "EARLY20", "voucherValue": 20}]}
        })))
        .mount(&server)
        .await;
    Mock::given(path("/api/v1/vouchers/my-vouchers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"content": [{"code": "LOYAL"}]}
        })))
        .mount(&server)
        .await;

    let backend = backend(&server);
    let event = backend.event_vouchers("jwt", 7).await.unwrap();
    assert_eq!(event[0].scope, VoucherScope::Event);
    assert_eq!(event[0].value, Some(Decimal::from(20)));

    let customer = backend.customer_vouchers("jwt").await.unwrap();
    assert_eq!(customer[0].scope, VoucherScope::Customer);
    assert_eq!(customer[0].code, "LOYAL");
}

fn event_body() -> serde_json::Value {
    json!({
        "success": true,
        "data": {"id": 7, "title": "Jazz Night", "dateTimeStart": "2026-12-01T19:00:00", "fee": 0}
    })
}

#[tokio::test]
async fn test_slug_stays_inside_its_path_segment() {
    let server = MockServer::start().await;
    Mock::given(path("/api/v1/user/details"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/events/..%2Fuser%2Fdetails"))
        .respond_with(ResponseTemplate::new(200).set_body_json(event_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/events/jazz%3Fadmin=1%23top"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend(&server);
    assert_eq!(backend.event("../user/details").await.unwrap().id, 7);
    assert!(matches!(
        backend.event("jazz?admin=1#top").await,
        Err(UpstreamError::NotFound)
    ));

    let requests = server.received_requests().await.unwrap();
    assert!(requests.iter().all(|request| request.url.query().is_none()));
}

#[tokio::test]
async fn test_dot_slugs_never_reach_upstream() {
    let server = MockServer::start().await;
    let backend = backend(&server);

    for slug in [".", ".."] {
        assert!(matches!(backend.event(slug).await, Err(UpstreamError::NotFound)));
    }
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_encoded_slug_from_the_router_is_forwarded_as_one_segment() {
    let server = MockServer::start().await;
    Mock::given(path("/api/v1/user/details"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(path("/api/v1/events/..%2Fuser%2Fdetails"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let state = AppState::new(Config::default(), Arc::new(backend(&server)));
    let app = create_routes(state);
    let (status, body) = common::send(&app, Method::GET, "/api/events/..%2Fuser%2Fdetails", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_home_page_feeds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/reviews"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"content": [{
                "eventName": "Jazz Night",
                "customerName": "Ayu",
                "rating": 5,
                "review": "Wonderful",
                "userId": 1
            }]}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/locations"))
        .and(query_param("search", "south jak"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{"id": 4, "cityName": "South Jakarta"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/events/exclude-location"))
        .and(query_param("location", "Bandung"))
        .and(query_param("page", "0"))
        .and(query_param("size", "8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"content": [], "totalPages": 3}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend(&server);
    let reviews = backend.review_feed().await.unwrap();
    assert_eq!(reviews[0].user_id, Some(1));

    let locations = backend.locations("south jak").await.unwrap();
    assert_eq!(locations[0].slug(), "south-jakarta");

    let page = backend.events_outside("Bandung", 0, 8).await.unwrap();
    assert_eq!(page.total_pages, 3);
}
