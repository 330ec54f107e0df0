use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("Fee cannot be negative: {0}")]
    NegativeFee(Decimal),

    #[error("Quantity must be greater than 0.")]
    ZeroQuantity,

    #[error("Amount is too large to price.")]
    Overflow,
}
