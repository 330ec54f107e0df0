use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::PricingError;
use crate::types::{CheckoutInput, Quote, VoucherBook, VoucherMatch};

/// Flat rate applied by any customer-scoped voucher (10%).
pub const CUSTOMER_VOUCHER_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Prices a checkout draft.
///
/// Points are a flat deduction (1 point = 1 currency unit) and stack with the
/// voucher. At most one voucher rule applies: an event voucher with a
/// positive percentage, else a customer voucher at [`CUSTOMER_VOUCHER_RATE`].
/// The total never drops below zero. Amounts too large for a `Decimal` are
/// reported as [`PricingError::Overflow`].
pub fn quote(input: &CheckoutInput, book: &VoucherBook) -> Result<Quote, PricingError> {
    let code = input.voucher_code().unwrap_or_default();
    price(input.fee(), input.quantity(), input.points(), code, book)
}

/// Total payable for `quantity` tickets at `fee`, after `points` and the
/// voucher `code` (empty for none).
pub fn total(
    fee: Decimal,
    quantity: u32,
    points: Decimal,
    code: &str,
    book: &VoucherBook,
) -> Result<Decimal, PricingError> {
    price(fee, quantity, points, code.trim(), book).map(|quote| quote.total)
}

fn price(
    fee: Decimal,
    quantity: u32,
    points: Decimal,
    code: &str,
    book: &VoucherBook,
) -> Result<Quote, PricingError> {
    let subtotal = fee
        .checked_mul(Decimal::from(quantity))
        .ok_or(PricingError::Overflow)?;
    let points_discount = points.max(Decimal::ZERO);

    if book.overlaps(code) {
        warn!(code, "Voucher code is both an event and a customer voucher, applying the event rate");
    }

    let voucher = book.lookup(code);
    let voucher_discount = match voucher {
        VoucherMatch::Event { percent } => subtotal
            .checked_mul(percent)
            .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED)),
        VoucherMatch::Customer => subtotal.checked_mul(CUSTOMER_VOUCHER_RATE),
        VoucherMatch::None => Some(Decimal::ZERO),
    }
    .ok_or(PricingError::Overflow)?;

    // Only a result far below zero can overflow here, and it floors to zero.
    let total = subtotal
        .checked_sub(points_discount)
        .and_then(|rest| rest.checked_sub(voucher_discount))
        .map_or(Decimal::ZERO, |rest| rest.max(Decimal::ZERO));

    debug!(
        %subtotal,
        %points_discount,
        %voucher_discount,
        %total,
        "Checkout priced"
    );

    Ok(Quote {
        unit_fee: fee,
        quantity,
        subtotal,
        points_discount,
        voucher_discount,
        voucher,
        total,
    })
}
