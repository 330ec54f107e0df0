use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vibetribe_pricing::{EventVoucher, VoucherBook};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VoucherScope {
    Event,
    Customer,
}

/// A voucher as the rest of the server sees it, whichever endpoint it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voucher {
    pub code: String,
    /// Percentage for event vouchers. Customer vouchers carry no value of
    /// their own; they are priced at the flat customer rate.
    pub value: Option<Decimal>,
    pub scope: VoucherScope,
    pub status: Option<String>,
    pub event_name: Option<String>,
    pub description: Option<String>,
}

/// Event voucher as `/vouchers/by-event` and `/vouchers/upcoming` return it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventVoucherRecord {
    #[serde(default)]
    pub voucher_id: Option<i64>,
    #[serde(alias = "code")]
    pub voucher_code: String,
    #[serde(default)]
    pub voucher_value: Decimal,
    #[serde(default)]
    pub event_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Customer voucher as `/vouchers/my-vouchers` returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerVoucherRecord {
    #[serde(alias = "voucherCode")]
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl From<EventVoucherRecord> for Voucher {
    fn from(record: EventVoucherRecord) -> Self {
        Self {
            code: record.voucher_code,
            value: Some(record.voucher_value),
            scope: VoucherScope::Event,
            status: record.status,
            event_name: record.event_name,
            description: record.description,
        }
    }
}

impl From<CustomerVoucherRecord> for Voucher {
    fn from(record: CustomerVoucherRecord) -> Self {
        Self {
            code: record.code,
            value: None,
            scope: VoucherScope::Customer,
            status: record.status,
            event_name: None,
            description: record.description,
        }
    }
}

impl Voucher {
    /// Splits vouchers by scope into the lists the checkout prices against.
    pub fn book(vouchers: &[Voucher]) -> VoucherBook {
        let mut event = Vec::new();
        let mut customer = Vec::new();

        for voucher in vouchers {
            match voucher.scope {
                VoucherScope::Event => event.push(EventVoucher::new(
                    voucher.code.clone(),
                    voucher.value.unwrap_or_default(),
                )),
                VoucherScope::Customer => customer.push(voucher.code.clone()),
            }
        }

        VoucherBook::new(event, customer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityLimit {
    pub quantity_limit: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// How a new voucher's availability is bounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "voucherType")]
pub enum VoucherRule {
    #[serde(rename = "quantity", rename_all = "camelCase")]
    Quantity { quantity_based_voucher: QuantityLimit },
    #[serde(rename = "dateRange", rename_all = "camelCase")]
    DateRange { date_range_based_voucher: DateRange },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVoucherRequest {
    pub event_id: i64,
    pub voucher_code: String,
    pub voucher_value: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub rule: VoucherRule,
}

impl CreateVoucherRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.voucher_code.trim().is_empty() {
            return Err("Voucher code is required.".to_string());
        }
        if self.voucher_value < Decimal::ZERO || self.voucher_value > Decimal::ONE_HUNDRED {
            return Err("Voucher value must be between 0 and 100.".to_string());
        }
        match &self.rule {
            VoucherRule::Quantity {
                quantity_based_voucher,
            } if quantity_based_voucher.quantity_limit == 0 => {
                Err("Quantity limit must be greater than 0.".to_string())
            }
            VoucherRule::DateRange {
                date_range_based_voucher,
            } if date_range_based_voucher.end_date < date_range_based_voucher.start_date => {
                Err("Voucher end date cannot be before its start date.".to_string())
            }
            _ => Ok(()),
        }
    }
}
