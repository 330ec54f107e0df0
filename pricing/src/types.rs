use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PricingError;

/// A draft purchase as it stands on the payment page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutInput {
    fee: Decimal,
    quantity: u32,
    points: Decimal,
    voucher_code: Option<String>,
}

impl CheckoutInput {
    pub fn new(fee: Decimal, quantity: u32) -> Result<Self, PricingError> {
        if fee < Decimal::ZERO {
            return Err(PricingError::NegativeFee(fee));
        }
        if quantity == 0 {
            return Err(PricingError::ZeroQuantity);
        }

        Ok(Self {
            fee,
            quantity,
            points: Decimal::ZERO,
            voucher_code: None,
        })
    }

    /// Redeems `points`, clamped to `[0, balance]`.
    pub fn with_points(mut self, points: Decimal, balance: Decimal) -> Self {
        let ceiling = balance.max(Decimal::ZERO);
        self.points = points.max(Decimal::ZERO).min(ceiling);
        self
    }

    /// Selects a voucher code. A blank code means no voucher.
    pub fn with_voucher(mut self, code: impl Into<String>) -> Self {
        let code = code.into();
        let trimmed = code.trim();
        self.voucher_code = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    pub fn fee(&self) -> Decimal {
        self.fee
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn points(&self) -> Decimal {
        self.points
    }

    pub fn voucher_code(&self) -> Option<&str> {
        self.voucher_code.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventVoucher {
    pub code: String,
    pub percent: Decimal,
}

impl EventVoucher {
    pub fn new(code: impl Into<String>, percent: Decimal) -> Self {
        Self {
            code: code.into(),
            percent,
        }
    }
}

/// Which voucher rule a code resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum VoucherMatch {
    None,
    Event { percent: Decimal },
    Customer,
}

/// The voucher codes that are live for one event and one customer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoucherBook {
    event: Vec<EventVoucher>,
    customer: Vec<String>,
}

impl VoucherBook {
    pub fn new(event: Vec<EventVoucher>, customer: Vec<String>) -> Self {
        Self { event, customer }
    }

    pub fn event_vouchers(&self) -> &[EventVoucher] {
        &self.event
    }

    pub fn customer_codes(&self) -> &[String] {
        &self.customer
    }

    /// Resolves a code. Event vouchers with a positive percentage win over
    /// customer vouchers carrying the same code.
    pub fn lookup(&self, code: &str) -> VoucherMatch {
        if code.is_empty() {
            return VoucherMatch::None;
        }

        let event_percent = self
            .event
            .iter()
            .find(|voucher| voucher.code == code)
            .map(|voucher| voucher.percent)
            .filter(|percent| *percent > Decimal::ZERO);

        if let Some(percent) = event_percent {
            VoucherMatch::Event { percent }
        } else if self.customer.iter().any(|c| c == code) {
            VoucherMatch::Customer
        } else {
            VoucherMatch::None
        }
    }

    pub fn is_event_code(&self, code: &str) -> bool {
        self.event.iter().any(|voucher| voucher.code == code)
    }

    /// True when the code is issued both for the event and for the customer.
    pub fn overlaps(&self, code: &str) -> bool {
        self.is_event_code(code) && self.customer.iter().any(|c| c == code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub unit_fee: Decimal,
    pub quantity: u32,
    pub subtotal: Decimal,
    pub points_discount: Decimal,
    pub voucher_discount: Decimal,
    pub voucher: VoucherMatch,
    pub total: Decimal,
}

impl Quote {
    pub fn discount(&self) -> Decimal {
        self.points_discount + self.voucher_discount
    }
}
