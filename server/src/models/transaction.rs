use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::timestamp;

/// Payment form as the browser submits it for a quote or a confirmation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub quantity: u32,
    #[serde(default)]
    pub points: Decimal,
    #[serde(default)]
    pub voucher_code: Option<String>,
}

impl CheckoutRequest {
    /// The selected code with blanks normalised away.
    pub fn voucher(&self) -> Option<&str> {
        self.voucher_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }

    pub fn uses_points(&self) -> bool {
        self.points > Decimal::ZERO
    }
}

/// Transaction body for the upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    pub event_id: i64,
    pub voucher_code: Option<String>,
    pub quantity: u32,
    pub is_use_points: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub event_id: Option<i64>,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub total_price: Option<Decimal>,
    #[serde(default)]
    pub points_applied: Option<Decimal>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "timestamp::option::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub status: String,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub amount_paid: Option<Decimal>,
    #[serde(default, deserialize_with = "timestamp::option::deserialize")]
    pub payment_date: Option<DateTime<Utc>>,
}
