use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::Response;
use serde::{Deserialize, Serialize};

use super::cache_user;
use crate::models::{Event, PaymentDetails, UserDetails};
use crate::session::CurrentSession;
use crate::state::AppState;
use crate::utils::response::success;
use crate::utils::AppResult;

#[derive(Debug, Deserialize)]
pub struct ReceiptQuery {
    pub event: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub transaction_id: i64,
    pub payment: PaymentDetails,
    pub event: Option<Event>,
    pub customer: UserDetails,
}

pub async fn receipt(
    State(state): State<AppState>,
    session: CurrentSession,
    transaction_id: Result<Path<i64>, PathRejection>,
    query: Result<Query<ReceiptQuery>, QueryRejection>,
) -> AppResult<Response> {
    let Path(transaction_id) = transaction_id?;
    let Query(query) = query?;
    let backend = state.backend.as_ref();
    let (payment, customer) = tokio::try_join!(
        backend.payment(session.token(), transaction_id),
        backend.user_details(session.token()),
    )?;
    cache_user(&state, &session, &customer).await;

    let event = match query.event.as_deref().map(str::trim).filter(|slug| !slug.is_empty()) {
        Some(slug) => Some(backend.event(slug).await?),
        None => None,
    };

    let receipt = Receipt {
        transaction_id,
        payment,
        event,
        customer,
    };
    Ok(success(receipt, "Receipt retrieved"))
}
