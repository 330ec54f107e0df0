use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use tracing::{debug, warn};

use super::envelope::{decode, decode_optional};
use super::error::{UpstreamError, UpstreamResult};
use super::Backend;
use crate::models::{
    CreateEventRequest, CreateTransactionRequest, CreateVoucherRequest, CustomerVoucherRecord,
    Event, EventListParams, EventSort, EventStatistic, EventVoucherRecord, Location, LoginRequest,
    LoginToken, Page, PaymentDetails, PublicProfile, Review, ReviewRequest, SignupRequest,
    Ticket, TransactionRecord, UpdateProfileRequest, UserDetails, Voucher,
};

const API_PREFIX: [&str; 2] = ["api", "v1"];

/// [`Backend`] over HTTP with reqwest.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> UpstreamResult<Self> {
        let base_url = Url::parse(base_url.as_ref().trim_end_matches('/'))
            .map_err(|e| UpstreamError::InvalidBaseUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::InvalidBaseUrl(format!(
                "{} cannot carry a path",
                base_url
            )));
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// Joins path segments under the API prefix. Each segment is
    /// percent-encoded on its own, so `/`, `?` and `#` stay inside it.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(API_PREFIX)
                .extend(segments.iter().copied());
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str], token: Option<&str>) -> RequestBuilder {
        let url = self.url(segments);
        debug!(%method, path = url.path(), "Calling upstream");
        let builder = self.client.request(method, url);
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn fetch<T>(&self, builder: RequestBuilder) -> UpstreamResult<T>
    where
        T: DeserializeOwned,
    {
        let (status, body) = Self::execute(builder).await?;
        decode(status, &body).inspect_err(log_failure)
    }

    async fn acknowledge(&self, builder: RequestBuilder) -> UpstreamResult<()> {
        let (status, body) = Self::execute(builder).await?;
        decode_optional::<IgnoredAny>(status, &body)
            .map(|_| ())
            .inspect_err(log_failure)
    }

    async fn fetch_page<T>(&self, builder: RequestBuilder) -> UpstreamResult<Page<T>>
    where
        T: DeserializeOwned,
    {
        let (status, body) = Self::execute(builder).await?;
        decode_optional::<Page<T>>(status, &body)
            .map(|page| page.unwrap_or_else(Page::empty))
            .inspect_err(log_failure)
    }

    async fn execute(builder: RequestBuilder) -> UpstreamResult<(reqwest::StatusCode, Vec<u8>)> {
        let response = builder.send().await.inspect_err(|e| {
            warn!(error = %e, "Upstream request failed");
        })?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "Upstream responded");
        Ok((status, body.to_vec()))
    }

    async fn fetch_list<T>(&self, builder: RequestBuilder) -> UpstreamResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let (status, body) = Self::execute(builder).await?;
        decode_optional::<Vec<T>>(status, &body)
            .map(Option::unwrap_or_default)
            .inspect_err(log_failure)
    }

    fn get(&self, segments: &[&str], token: Option<&str>) -> RequestBuilder {
        self.request(Method::GET, segments, token)
    }

    fn send_json<B>(
        &self,
        method: Method,
        segments: &[&str],
        token: Option<&str>,
        body: &B,
    ) -> RequestBuilder
    where
        B: Serialize + ?Sized,
    {
        self.request(method, segments, token).json(body)
    }
}

/// A caller-supplied path segment. Dot segments would be dropped or resolved
/// by URL normalisation and address a different resource, so they never
/// leave this process.
fn resource_segment(raw: &str) -> UpstreamResult<&str> {
    match raw {
        "" | "." | ".." => Err(UpstreamError::NotFound),
        segment => Ok(segment),
    }
}

fn log_failure(error: &UpstreamError) {
    match error {
        UpstreamError::Unauthorized | UpstreamError::NotFound => {
            debug!(error = %error, "Upstream call unsuccessful")
        }
        _ => warn!(error = %error, "Upstream call unsuccessful"),
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn login(&self, request: &LoginRequest) -> UpstreamResult<LoginToken> {
        self.fetch(self.send_json(Method::POST, &["login"], None, request))
            .await
    }

    async fn signup(&self, request: &SignupRequest) -> UpstreamResult<()> {
        self.acknowledge(self.send_json(Method::POST, &["signup"], None, request))
            .await
    }

    async fn user_details(&self, token: &str) -> UpstreamResult<UserDetails> {
        self.fetch(self.get(&["user", "details"], Some(token))).await
    }

    async fn update_user(&self, token: &str, request: &UpdateProfileRequest) -> UpstreamResult<()> {
        self.acknowledge(self.send_json(Method::PUT, &["user", "update"], Some(token), request))
            .await
    }

    async fn public_profile(&self, user_id: i64) -> UpstreamResult<PublicProfile> {
        let user_id = user_id.to_string();
        self.fetch(self.get(&["users", user_id.as_str(), "details"], None))
            .await
    }

    async fn list_events(&self, params: &EventListParams) -> UpstreamResult<Page<Event>> {
        let path: &[&str] = match params.sort {
            EventSort::Popular => &["events", "hottest"],
            EventSort::Newest | EventSort::HighestRating => &["events"],
        };
        self.fetch_page(self.get(path, None).query(&params.query_pairs()))
            .await
    }

    async fn events_outside(
        &self,
        location: &str,
        page: u32,
        size: u32,
    ) -> UpstreamResult<Page<Event>> {
        let builder = self.get(&["events", "exclude-location"], None).query(&[
            ("location", location.to_string()),
            ("page", page.to_string()),
            ("size", size.to_string()),
        ]);
        self.fetch_page(builder).await
    }

    async fn locations(&self, search: &str) -> UpstreamResult<Vec<Location>> {
        self.fetch_list(self.get(&["locations"], None).query(&[("search", search)]))
            .await
    }

    async fn event(&self, slug: &str) -> UpstreamResult<Event> {
        let slug = resource_segment(slug)?;
        self.fetch(self.get(&["events", slug], None)).await
    }

    async fn upcoming_events(&self, token: &str) -> UpstreamResult<Page<Event>> {
        self.fetch_page(self.get(&["events", "upcoming"], Some(token)))
            .await
    }

    async fn past_events(&self, token: &str) -> UpstreamResult<Page<Event>> {
        self.fetch_page(self.get(&["events", "past"], Some(token))).await
    }

    async fn organizer_events(&self, token: &str, size: u32) -> UpstreamResult<Page<Event>> {
        let builder = self
            .get(&["events", "organizer"], Some(token))
            .query(&[("size", size)]);
        self.fetch_page(builder).await
    }

    async fn create_event(&self, token: &str, request: &CreateEventRequest) -> UpstreamResult<()> {
        self.acknowledge(self.send_json(Method::POST, &["events", "create"], Some(token), request))
            .await
    }

    async fn event_statistics(&self, token: &str) -> UpstreamResult<Vec<EventStatistic>> {
        self.fetch_page(self.get(&["events", "statistics"], Some(token)))
            .await
            .map(|page| page.content)
    }

    async fn transaction_history(&self, token: &str) -> UpstreamResult<Vec<TransactionRecord>> {
        self.fetch_page(self.get(&["events", "transaction-history"], Some(token)))
            .await
            .map(|page| page.content)
    }

    async fn submit_review(&self, token: &str, request: &ReviewRequest) -> UpstreamResult<()> {
        self.acknowledge(self.send_json(Method::POST, &["events", "review"], Some(token), request))
            .await
    }

    async fn organizer_reviews(&self, token: &str) -> UpstreamResult<Vec<Review>> {
        self.fetch_page(self.get(&["reviews", "by-organizer"], Some(token)))
            .await
            .map(|page| page.content)
    }

    async fn review_feed(&self) -> UpstreamResult<Vec<Review>> {
        self.fetch_page(self.get(&["reviews"], None))
            .await
            .map(|page| page.content)
    }

    async fn past_tickets(&self, token: &str) -> UpstreamResult<Vec<Ticket>> {
        self.fetch_page(self.get(&["tickets", "past"], Some(token)))
            .await
            .map(|page| page.content)
    }

    async fn event_vouchers(&self, token: &str, event_id: i64) -> UpstreamResult<Vec<Voucher>> {
        let builder = self
            .get(&["vouchers", "by-event"], Some(token))
            .query(&[("eventId", event_id)]);
        let page: Page<EventVoucherRecord> = self.fetch_page(builder).await?;
        Ok(page.content.into_iter().map(Voucher::from).collect())
    }

    async fn customer_vouchers(&self, token: &str) -> UpstreamResult<Vec<Voucher>> {
        let page: Page<CustomerVoucherRecord> = self
            .fetch_page(self.get(&["vouchers", "my-vouchers"], Some(token)))
            .await?;
        Ok(page.content.into_iter().map(Voucher::from).collect())
    }

    async fn upcoming_vouchers(&self, token: &str) -> UpstreamResult<Vec<Voucher>> {
        let page: Page<EventVoucherRecord> = self
            .fetch_page(self.get(&["vouchers", "upcoming"], Some(token)))
            .await?;
        Ok(page.content.into_iter().map(Voucher::from).collect())
    }

    async fn create_voucher(&self, token: &str, request: &CreateVoucherRequest) -> UpstreamResult<()> {
        self.acknowledge(self.send_json(Method::POST, &["vouchers", "create"], Some(token), request))
            .await
    }

    async fn create_transaction(
        &self,
        token: &str,
        request: &CreateTransactionRequest,
    ) -> UpstreamResult<TransactionRecord> {
        self.fetch(self.send_json(Method::POST, &["transactions"], Some(token), request))
            .await
    }

    async fn payment(&self, token: &str, transaction_id: i64) -> UpstreamResult<PaymentDetails> {
        let transaction_id = transaction_id.to_string();
        self.fetch(self.get(&["payment", transaction_id.as_str()], Some(token)))
            .await
    }
}
