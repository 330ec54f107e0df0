//! Typed access to the upstream VibeTribe REST backend.
//!
//! Handlers only ever see [`Backend`]; [`HttpBackend`] is the production
//! implementation and tests substitute an in-memory one.

pub mod envelope;
pub mod error;
pub mod http;

use async_trait::async_trait;

use crate::models::{
    CreateEventRequest, CreateTransactionRequest, CreateVoucherRequest, Event, EventListParams,
    EventStatistic, Location, LoginRequest, LoginToken, Page, PaymentDetails, PublicProfile, Review,
    ReviewRequest, SignupRequest, Ticket, TransactionRecord, UpdateProfileRequest, UserDetails,
    Voucher,
};

pub use error::{UpstreamError, UpstreamResult};
pub use http::HttpBackend;

#[async_trait]
pub trait Backend: Send + Sync {
    // Accounts
    async fn login(&self, request: &LoginRequest) -> UpstreamResult<LoginToken>;
    async fn signup(&self, request: &SignupRequest) -> UpstreamResult<()>;
    async fn user_details(&self, token: &str) -> UpstreamResult<UserDetails>;
    async fn update_user(&self, token: &str, request: &UpdateProfileRequest) -> UpstreamResult<()>;
    async fn public_profile(&self, user_id: i64) -> UpstreamResult<PublicProfile>;

    // Events
    async fn list_events(&self, params: &EventListParams) -> UpstreamResult<Page<Event>>;
    async fn event(&self, slug: &str) -> UpstreamResult<Event>;
    /// One page of events held anywhere but `location`.
    async fn events_outside(
        &self,
        location: &str,
        page: u32,
        size: u32,
    ) -> UpstreamResult<Page<Event>>;
    async fn locations(&self, search: &str) -> UpstreamResult<Vec<Location>>;
    async fn upcoming_events(&self, token: &str) -> UpstreamResult<Page<Event>>;
    async fn past_events(&self, token: &str) -> UpstreamResult<Page<Event>>;
    async fn organizer_events(&self, token: &str, size: u32) -> UpstreamResult<Page<Event>>;
    async fn create_event(&self, token: &str, request: &CreateEventRequest) -> UpstreamResult<()>;
    async fn event_statistics(&self, token: &str) -> UpstreamResult<Vec<EventStatistic>>;
    async fn transaction_history(&self, token: &str) -> UpstreamResult<Vec<TransactionRecord>>;

    // Reviews and tickets
    async fn submit_review(&self, token: &str, request: &ReviewRequest) -> UpstreamResult<()>;
    async fn organizer_reviews(&self, token: &str) -> UpstreamResult<Vec<Review>>;
    async fn review_feed(&self) -> UpstreamResult<Vec<Review>>;
    async fn past_tickets(&self, token: &str) -> UpstreamResult<Vec<Ticket>>;

    // Vouchers
    async fn event_vouchers(&self, token: &str, event_id: i64) -> UpstreamResult<Vec<Voucher>>;
    async fn customer_vouchers(&self, token: &str) -> UpstreamResult<Vec<Voucher>>;
    async fn upcoming_vouchers(&self, token: &str) -> UpstreamResult<Vec<Voucher>>;
    async fn create_voucher(&self, token: &str, request: &CreateVoucherRequest) -> UpstreamResult<()>;

    // Payments
    async fn create_transaction(
        &self,
        token: &str,
        request: &CreateTransactionRequest,
    ) -> UpstreamResult<TransactionRecord>;
    async fn payment(&self, token: &str, transaction_id: i64) -> UpstreamResult<PaymentDetails>;
}
