use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Response;
use axum::Json;

use crate::models::CreateVoucherRequest;
use crate::session::CurrentSession;
use crate::state::AppState;
use crate::utils::response::{created, success};
use crate::utils::{AppError, AppResult};

pub async fn create_voucher(
    State(state): State<AppState>,
    session: CurrentSession,
    payload: Result<Json<CreateVoucherRequest>, JsonRejection>,
) -> AppResult<Response> {
    session.require_organizer()?;
    let Json(request) = payload?;
    request.validate().map_err(AppError::ValidationError)?;

    state.backend.create_voucher(session.token(), &request).await?;
    tracing::info!(event_id = request.event_id, code = %request.voucher_code, "Voucher created");

    Ok(created(request, "Voucher created successfully!"))
}

/// Vouchers the signed-in customer holds.
pub async fn my_vouchers(
    State(state): State<AppState>,
    session: CurrentSession,
) -> AppResult<Response> {
    let vouchers = state.backend.customer_vouchers(session.token()).await?;
    Ok(success(vouchers, "Vouchers retrieved"))
}
