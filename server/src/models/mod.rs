pub mod event;
pub mod location;
pub mod page;
pub mod review;
pub mod statistics;
pub mod ticket;
pub mod transaction;
pub mod user;
pub mod voucher;

pub use event::{CreateEventRequest, Event, EventListParams, EventQuery, EventSort};
pub use location::{Location, LocationSuggestion};
pub use page::{Page, PageRequest, PageWindow};
pub use review::{Review, ReviewRequest};
pub use statistics::{EventStatistic, StatisticsSummary};
pub use ticket::{Ticket, TicketStatus};
pub use transaction::{CheckoutRequest, CreateTransactionRequest, PaymentDetails, TransactionRecord};
pub use user::{
    LoginRequest, LoginToken, PublicProfile, Role, SignupRequest, UpdateProfileRequest, UserDetails,
};
pub use voucher::{
    CreateVoucherRequest, CustomerVoucherRecord, EventVoucherRecord, Voucher, VoucherRule, VoucherScope,
};

/// Upstream timestamps arrive either as RFC 3339 or as zone-less local
/// date-times; the latter are read as UTC.
pub(crate) mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{de::Error, Deserialize, Deserializer};

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .map(|naive| naive.and_utc())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid timestamp '{}'", raw)))
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{de::Error, Deserialize, Deserializer};

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            match Option::<String>::deserialize(deserializer)? {
                None => Ok(None),
                Some(raw) if raw.trim().is_empty() => Ok(None),
                Some(raw) => super::parse(&raw)
                    .map(Some)
                    .ok_or_else(|| D::Error::custom(format!("invalid timestamp '{}'", raw))),
            }
        }
    }

}
