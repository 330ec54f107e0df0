//! The payment page: what the customer may redeem, the live price while
//! they pick, and the final confirmation.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use rust_decimal::Decimal;
use serde::Serialize;
use vibetribe_pricing::{quote, CheckoutInput, Quote, VoucherBook, CUSTOMER_VOUCHER_RATE};

use super::cache_user;
use crate::config::PointsPolicy;
use crate::models::{CheckoutRequest, CreateTransactionRequest, Event, TransactionRecord, UserDetails, Voucher};
use crate::session::CurrentSession;
use crate::state::AppState;
use crate::utils::response::success;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPage {
    pub event: Event,
    pub user: UserDetails,
    pub points_balance: Decimal,
    pub event_vouchers: Vec<Voucher>,
    pub customer_vouchers: Vec<Voucher>,
    pub customer_voucher_rate: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutConfirmation {
    pub transaction_id: i64,
    pub quote: Quote,
    pub transaction: TransactionRecord,
}

struct CheckoutContext {
    event: Event,
    user: UserDetails,
    event_vouchers: Vec<Voucher>,
    customer_vouchers: Vec<Voucher>,
}

impl CheckoutContext {
    async fn load(state: &AppState, token: &str, slug: &str) -> AppResult<Self> {
        let backend = state.backend.as_ref();
        let (event, user, customer_vouchers) = tokio::try_join!(
            backend.event(slug),
            backend.user_details(token),
            backend.customer_vouchers(token),
        )?;
        let event_vouchers = backend.event_vouchers(token, event.id).await?;

        Ok(Self {
            event,
            user,
            event_vouchers,
            customer_vouchers,
        })
    }

    fn book(&self) -> VoucherBook {
        let all: Vec<Voucher> = self
            .event_vouchers
            .iter()
            .chain(self.customer_vouchers.iter())
            .cloned()
            .collect();
        Voucher::book(&all)
    }

    fn price(&self, request: &CheckoutRequest) -> AppResult<Quote> {
        let mut input = CheckoutInput::new(self.event.fee, request.quantity)
            .map_err(|e| AppError::ValidationError(e.to_string()))?
            .with_points(request.points, self.user.points_balance);
        if let Some(code) = request.voucher() {
            input = input.with_voucher(code);
        }
        quote(&input, &self.book()).map_err(|e| AppError::ValidationError(e.to_string()))
    }
}

/// Rules a confirmation must pass before anything is sent upstream.
pub fn validate_checkout(
    request: &CheckoutRequest,
    points_balance: Decimal,
    book: &VoucherBook,
    policy: PointsPolicy,
) -> Result<(), String> {
    if request.quantity == 0 {
        return Err("Quantity must be greater than 0.".to_string());
    }
    if request.points < Decimal::ZERO {
        return Err("Points cannot be negative.".to_string());
    }
    if request.points > points_balance {
        return Err("Insufficient points balance.".to_string());
    }

    let event_voucher_selected = request.voucher().is_some_and(|code| book.is_event_code(code));
    if policy == PointsPolicy::ExclusiveWithEventVoucher && event_voucher_selected && request.uses_points() {
        return Err(
            "You cannot use both event voucher and individual points at the same time.".to_string(),
        );
    }

    Ok(())
}

pub async fn checkout_page(
    State(state): State<AppState>,
    session: CurrentSession,
    Path(slug): Path<String>,
) -> AppResult<Response> {
    let context = CheckoutContext::load(&state, session.token(), &slug).await?;

    let page = CheckoutPage {
        points_balance: context.user.points_balance,
        event: context.event,
        user: context.user,
        event_vouchers: context.event_vouchers,
        customer_vouchers: context.customer_vouchers,
        customer_voucher_rate: CUSTOMER_VOUCHER_RATE,
    };
    Ok(success(page, "Checkout ready"))
}

pub async fn checkout_quote(
    State(state): State<AppState>,
    session: CurrentSession,
    Path(slug): Path<String>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> AppResult<Response> {
    let Json(request) = payload?;
    let context = CheckoutContext::load(&state, session.token(), &slug).await?;

    let quote = context.price(&request)?;
    Ok(success(quote, "Checkout priced"))
}

pub async fn checkout_confirm(
    State(state): State<AppState>,
    session: CurrentSession,
    Path(slug): Path<String>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> AppResult<Response> {
    let Json(request) = payload?;
    let context = CheckoutContext::load(&state, session.token(), &slug).await?;

    validate_checkout(
        &request,
        context.user.points_balance,
        &context.book(),
        state.config.points_policy,
    )
    .map_err(AppError::ValidationError)?;

    let quote = context.price(&request)?;
    let body = CreateTransactionRequest {
        event_id: context.event.id,
        voucher_code: request.voucher().map(String::from),
        quantity: request.quantity,
        is_use_points: request.uses_points(),
    };

    let transaction = state
        .backend
        .create_transaction(session.token(), &body)
        .await?;
    let transaction_id = transaction.id.ok_or_else(|| {
        AppError::InternalServerError("transaction created without an id".to_string())
    })?;

    tracing::info!(
        transaction_id,
        event_id = context.event.id,
        quantity = request.quantity,
        total = %quote.total,
        "Transaction created"
    );

    // The transaction stands even when the refresh fails.
    match state.backend.user_details(session.token()).await {
        Ok(user) => cache_user(&state, &session, &user).await,
        Err(err) => tracing::warn!(error = %err, "Could not refresh user after checkout"),
    }

    let confirmation = CheckoutConfirmation {
        transaction_id,
        quote,
        transaction,
    };
    Ok(success(confirmation, "Payment Successful!"))
}
