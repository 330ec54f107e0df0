#![allow(dead_code)]

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

use vibetribe_server::config::Config;
use vibetribe_server::models::{
    CreateEventRequest, CreateTransactionRequest, CreateVoucherRequest, Event, EventListParams,
    EventStatistic, Location, LoginRequest, LoginToken, Page, PaymentDetails, PublicProfile, Review,
    ReviewRequest, Role, SignupRequest, Ticket, TicketStatus, TransactionRecord,
    UpdateProfileRequest, UserDetails, Voucher, VoucherScope,
};
use vibetribe_server::routes::create_routes;
use vibetribe_server::state::AppState;
use vibetribe_server::upstream::{Backend, UpstreamError, UpstreamResult};

pub const CUSTOMER_EMAIL: &str = "ayu@example.com";
pub const ORGANIZER_EMAIL: &str = "budi@example.com";
pub const PASSWORD: &str = "secret";

pub const CUSTOMER_TOKEN: &str = "customer-token";
pub const ORGANIZER_TOKEN: &str = "organizer-token";

pub const PAID_TRANSACTION: i64 = 501;

/// In-memory upstream with one customer, one organizer and two events.
pub struct MockBackend {
    users: Mutex<HashMap<String, UserDetails>>,
    events: Vec<Event>,
    event_vouchers: HashMap<i64, Vec<Voucher>>,
    customer_vouchers: Vec<Voucher>,
    tickets: Vec<Ticket>,
    pub reviews_down: AtomicBool,
    pub omit_transaction_id: AtomicBool,
    pub list_calls: Mutex<Vec<EventListParams>>,
    pub outside_calls: Mutex<Vec<(String, u32, u32)>>,
    pub location_searches: Mutex<Vec<String>>,
    pub transactions: Mutex<Vec<CreateTransactionRequest>>,
    pub reviews: Mutex<Vec<ReviewRequest>>,
    pub created_events: Mutex<Vec<CreateEventRequest>>,
    pub created_vouchers: Mutex<Vec<CreateVoucherRequest>>,
}

impl MockBackend {
    pub fn seeded() -> Arc<Self> {
        let mut users = HashMap::new();
        users.insert(
            CUSTOMER_TOKEN.to_string(),
            user(1, "Ayu", CUSTOMER_EMAIL, Role::Customer, 20_000),
        );
        users.insert(
            ORGANIZER_TOKEN.to_string(),
            user(2, "Budi", ORGANIZER_EMAIL, Role::Organizer, 0),
        );

        let mut event_vouchers = HashMap::new();
        event_vouchers.insert(
            7,
            vec![
                voucher("EARLY20", Some(20), VoucherScope::Event),
                voucher("ZERO", Some(0), VoucherScope::Event),
                Voucher {
                    value: Some(Decimal::MAX),
                    ..voucher("HUGE", None, VoucherScope::Event)
                },
            ],
        );

        Arc::new(Self {
            users: Mutex::new(users),
            events: vec![
                event(7, "jazz-night", "Jazz Night", 100_000, Some(2)),
                event(8, "free-workshop", "Free Workshop", 0, Some(99)),
            ],
            event_vouchers,
            customer_vouchers: vec![
                voucher("LOYAL", None, VoucherScope::Customer),
                voucher("ZERO", None, VoucherScope::Customer),
            ],
            tickets: vec![
                Ticket {
                    id: Some(1),
                    event_id: 7,
                    status: TicketStatus::Valid,
                },
                Ticket {
                    id: Some(2),
                    event_id: 8,
                    status: TicketStatus::Other,
                },
            ],
            reviews_down: AtomicBool::new(false),
            omit_transaction_id: AtomicBool::new(false),
            list_calls: Mutex::new(Vec::new()),
            outside_calls: Mutex::new(Vec::new()),
            location_searches: Mutex::new(Vec::new()),
            transactions: Mutex::new(Vec::new()),
            reviews: Mutex::new(Vec::new()),
            created_events: Mutex::new(Vec::new()),
            created_vouchers: Mutex::new(Vec::new()),
        })
    }

    /// Makes the upstream stop accepting `token`.
    pub fn revoke(&self, token: &str) {
        self.users.lock().unwrap().remove(token);
    }

    pub fn set_points(&self, token: &str, points: i64) {
        if let Some(user) = self.users.lock().unwrap().get_mut(token) {
            user.points_balance = Decimal::from(points);
        }
    }

    fn authorize(&self, token: &str) -> UpstreamResult<UserDetails> {
        self.users
            .lock()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or(UpstreamError::Unauthorized)
    }

    fn find_event(&self, slug: &str) -> UpstreamResult<Event> {
        self.events
            .iter()
            .find(|event| event.slug.as_deref() == Some(slug))
            .cloned()
            .ok_or(UpstreamError::NotFound)
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn login(&self, request: &LoginRequest) -> UpstreamResult<LoginToken> {
        let token = match (request.email.as_str(), request.password.as_str()) {
            (CUSTOMER_EMAIL, PASSWORD) => CUSTOMER_TOKEN,
            (ORGANIZER_EMAIL, PASSWORD) => ORGANIZER_TOKEN,
            _ => return Err(UpstreamError::Unauthorized),
        };
        Ok(LoginToken {
            access_token: token.to_string(),
        })
    }

    async fn signup(&self, request: &SignupRequest) -> UpstreamResult<()> {
        let taken = self
            .users
            .lock()
            .unwrap()
            .values()
            .any(|user| user.email == request.email);
        if taken {
            return Err(UpstreamError::Rejected("Email is already registered".to_string()));
        }
        Ok(())
    }

    async fn user_details(&self, token: &str) -> UpstreamResult<UserDetails> {
        self.authorize(token)
    }

    async fn update_user(&self, token: &str, request: &UpdateProfileRequest) -> UpstreamResult<()> {
        let mut users = self.users.lock().unwrap();
        let user = users.get_mut(token).ok_or(UpstreamError::Unauthorized)?;
        user.name = request.name.clone();
        user.email = request.email.clone();
        user.website = Some(request.website.clone());
        Ok(())
    }

    async fn public_profile(&self, user_id: i64) -> UpstreamResult<PublicProfile> {
        if user_id != 2 {
            return Err(UpstreamError::NotFound);
        }
        Ok(PublicProfile {
            id: Some(2),
            name: Some("Budi".to_string()),
            email: Some(ORGANIZER_EMAIL.to_string()),
            website: Some("https://budi.example.com".to_string()),
            photo_profile_url: None,
            bio: Some("Live music promoter".to_string()),
        })
    }

    async fn list_events(&self, params: &EventListParams) -> UpstreamResult<Page<Event>> {
        self.list_calls.lock().unwrap().push(params.clone());
        let mut page = Page::of(self.events.clone());
        page.total_pages = 3;
        page.number = params.page;
        Ok(page)
    }

    async fn event(&self, slug: &str) -> UpstreamResult<Event> {
        self.find_event(slug)
    }

    async fn events_outside(
        &self,
        location: &str,
        page: u32,
        size: u32,
    ) -> UpstreamResult<Page<Event>> {
        self.outside_calls
            .lock()
            .unwrap()
            .push((location.to_string(), page, size));
        let mut page = Page::of(vec![self.events[1].clone()]);
        page.total_pages = 2;
        Ok(page)
    }

    async fn locations(&self, search: &str) -> UpstreamResult<Vec<Location>> {
        self.location_searches.lock().unwrap().push(search.to_string());
        Ok(["Jakarta", "South Jakarta", "Bandung"]
            .iter()
            .zip(1..)
            .map(|(name, id)| Location {
                id: Some(id),
                city_name: name.to_string(),
            })
            .collect())
    }

    async fn upcoming_events(&self, token: &str) -> UpstreamResult<Page<Event>> {
        self.authorize(token)?;
        Ok(Page::of(vec![self.events[0].clone()]))
    }

    async fn past_events(&self, token: &str) -> UpstreamResult<Page<Event>> {
        self.authorize(token)?;
        Ok(Page::of(vec![self.events[1].clone()]))
    }

    async fn organizer_events(&self, token: &str, size: u32) -> UpstreamResult<Page<Event>> {
        self.authorize(token)?;
        let mut page = Page::of(self.events.clone());
        page.size = size;
        Ok(page)
    }

    async fn create_event(&self, token: &str, request: &CreateEventRequest) -> UpstreamResult<()> {
        self.authorize(token)?;
        self.created_events.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn event_statistics(&self, token: &str) -> UpstreamResult<Vec<EventStatistic>> {
        self.authorize(token)?;
        Ok(vec![
            EventStatistic {
                event_name: "Jazz Night".to_string(),
                total_attendees: 40,
                average_rating: Some(Decimal::new(45, 1)),
                total_revenue: Some(Decimal::from(4_000_000)),
            },
            EventStatistic {
                event_name: "Free Workshop".to_string(),
                total_attendees: 12,
                average_rating: None,
                total_revenue: None,
            },
        ])
    }

    async fn transaction_history(&self, token: &str) -> UpstreamResult<Vec<TransactionRecord>> {
        self.authorize(token)?;
        Ok(vec![transaction(PAID_TRANSACTION, 7, 2)])
    }

    async fn submit_review(&self, token: &str, request: &ReviewRequest) -> UpstreamResult<()> {
        self.authorize(token)?;
        self.reviews.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn organizer_reviews(&self, token: &str) -> UpstreamResult<Vec<Review>> {
        self.authorize(token)?;
        if self.reviews_down.load(Ordering::SeqCst) {
            return Err(UpstreamError::Status {
                status: 500,
                message: "reviews service down".to_string(),
            });
        }
        Ok(vec![Review {
            id: Some(1),
            event_name: Some("Jazz Night".to_string()),
            customer_name: Some("Ayu".to_string()),
            rating: 5,
            review: "Wonderful".to_string(),
            photo_profile_url: None,
            user_id: Some(1),
        }])
    }

    async fn review_feed(&self) -> UpstreamResult<Vec<Review>> {
        if self.reviews_down.load(Ordering::SeqCst) {
            return Err(UpstreamError::Status {
                status: 500,
                message: "reviews service down".to_string(),
            });
        }
        Ok(vec![Review {
            id: Some(3),
            event_name: Some("Free Workshop".to_string()),
            customer_name: Some("Citra".to_string()),
            rating: 4,
            review: "Learned a lot".to_string(),
            photo_profile_url: None,
            user_id: Some(3),
        }])
    }

    async fn past_tickets(&self, token: &str) -> UpstreamResult<Vec<Ticket>> {
        self.authorize(token)?;
        Ok(self.tickets.clone())
    }

    async fn event_vouchers(&self, token: &str, event_id: i64) -> UpstreamResult<Vec<Voucher>> {
        self.authorize(token)?;
        Ok(self.event_vouchers.get(&event_id).cloned().unwrap_or_default())
    }

    async fn customer_vouchers(&self, token: &str) -> UpstreamResult<Vec<Voucher>> {
        self.authorize(token)?;
        Ok(self.customer_vouchers.clone())
    }

    async fn upcoming_vouchers(&self, token: &str) -> UpstreamResult<Vec<Voucher>> {
        self.authorize(token)?;
        Ok(self.event_vouchers.get(&7).cloned().unwrap_or_default())
    }

    async fn create_voucher(&self, token: &str, request: &CreateVoucherRequest) -> UpstreamResult<()> {
        self.authorize(token)?;
        self.created_vouchers.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn create_transaction(
        &self,
        token: &str,
        request: &CreateTransactionRequest,
    ) -> UpstreamResult<TransactionRecord> {
        self.authorize(token)?;
        self.transactions.lock().unwrap().push(request.clone());
        // The upstream only takes a flag, so points go in full.
        if request.is_use_points {
            self.set_points(token, 0);
        }
        let mut record = transaction(PAID_TRANSACTION, request.event_id, request.quantity);
        if self.omit_transaction_id.load(Ordering::SeqCst) {
            record.id = None;
        }
        Ok(record)
    }

    async fn payment(&self, token: &str, transaction_id: i64) -> UpstreamResult<PaymentDetails> {
        self.authorize(token)?;
        if transaction_id != PAID_TRANSACTION {
            return Err(UpstreamError::NotFound);
        }
        Ok(PaymentDetails {
            status: "PAID".to_string(),
            method: Some("BANK_TRANSFER".to_string()),
            amount_paid: Some(Decimal::from(160_000)),
            payment_date: Some(Utc::now()),
        })
    }
}

fn user(id: i64, name: &str, email: &str, role: Role, points: i64) -> UserDetails {
    UserDetails {
        id: Some(id),
        name: name.to_string(),
        email: email.to_string(),
        role,
        points_balance: Decimal::from(points),
        address: None,
        phone_number: None,
        website: None,
        photo_profile_url: None,
        referral_code: None,
    }
}

fn event(id: i64, slug: &str, title: &str, fee: i64, organizer_id: Option<i64>) -> Event {
    let start = Utc::now() + Duration::days(14);
    Event {
        id,
        slug: Some(slug.to_string()),
        title: title.to_string(),
        description: None,
        category: Some("Music".to_string()),
        location: Some("Jakarta".to_string()),
        location_details: None,
        date_time_start: start,
        date_time_end: Some(start + Duration::hours(3)),
        fee: Decimal::from(fee),
        available_seats: Some(100),
        booked_seats: Some(40),
        image_url: None,
        organizer_id,
    }
}

fn voucher(code: &str, value: Option<i64>, scope: VoucherScope) -> Voucher {
    Voucher {
        code: code.to_string(),
        value: value.map(Decimal::from),
        scope,
        status: Some("ACTIVE".to_string()),
        event_name: None,
        description: None,
    }
}

fn transaction(id: i64, event_id: i64, quantity: u32) -> TransactionRecord {
    TransactionRecord {
        id: Some(id),
        event_id: Some(event_id),
        quantity: Some(quantity),
        total_price: None,
        points_applied: None,
        status: Some("PAID".to_string()),
        created_at: Some(Utc::now()),
    }
}

pub fn app(backend: Arc<MockBackend>) -> Router {
    app_with(backend, Config::default())
}

pub fn app_with(backend: Arc<MockBackend>, config: Config) -> Router {
    create_routes(AppState::new(config, backend))
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    session: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(id) = session {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", id));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Logs in through the router and returns the session id.
pub async fn login(app: &Router, email: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(serde_json::json!({"email": email, "password": PASSWORD})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["data"]["sessionId"].as_str().unwrap().to_string()
}

/// Reads a money amount whether it was serialized as a string or a number.
pub fn decimal(value: &Value) -> Decimal {
    match value {
        Value::String(raw) => Decimal::from_str(raw).unwrap(),
        other => Decimal::from_str(&other.to_string()).unwrap(),
    }
}
