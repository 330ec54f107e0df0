//! Checkout arithmetic for the VibeTribe payment page.
//!
//! Everything here is pure: no I/O, no clocks. The server feeds in the event
//! fee, the quantity the customer picked, the points they chose to redeem and
//! the voucher code they selected, together with the voucher lists that were
//! live for that event and customer, and gets back a [`Quote`].

mod error;
mod quote;
mod types;

pub use error::PricingError;
pub use quote::{quote, total, CUSTOMER_VOUCHER_RATE};
pub use types::{CheckoutInput, EventVoucher, Quote, VoucherBook, VoucherMatch};
