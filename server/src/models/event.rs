use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::timestamp;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    #[serde(default)]
    pub slug: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub location_details: Option<String>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub date_time_start: DateTime<Utc>,
    #[serde(default, deserialize_with = "timestamp::option::deserialize")]
    pub date_time_end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fee: Decimal,
    #[serde(default)]
    pub available_seats: Option<i64>,
    #[serde(default)]
    pub booked_seats: Option<i64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub organizer_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventSort {
    #[default]
    Newest,
    Popular,
    HighestRating,
}

/// Listing filters as the browser sends them. `page` is 1-based.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventQuery {
    pub page: Option<u32>,
    #[serde(default)]
    pub sort: EventSort,
    pub category: Option<String>,
    pub location: Option<String>,
    pub search: Option<String>,
}

/// Listing filters as the upstream expects them. `page` is 0-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventListParams {
    pub page: u32,
    pub size: u32,
    pub sort: EventSort,
    pub category: Option<String>,
    pub location: Option<String>,
    pub search: Option<String>,
}

impl EventListParams {
    /// Query pairs for the upstream listing call. Blank filters are dropped.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string()), ("size", self.size.to_string())];

        match self.sort {
            EventSort::Newest => pairs.push(("sortByNewest", "true".to_string())),
            EventSort::HighestRating => pairs.push(("sortByHighestRating", "true".to_string())),
            EventSort::Popular => {}
        }

        let filters = [
            ("category", &self.category),
            ("location", &self.location),
            ("search", &self.search),
        ];
        for (key, value) in filters {
            if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                pairs.push((key, value.to_string()));
            }
        }

        pairs
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date_time_start: DateTime<Utc>,
    pub date_time_end: DateTime<Utc>,
    pub location: String,
    #[serde(default)]
    pub location_details: String,
    #[serde(default)]
    pub category: String,
    pub fee: Decimal,
    pub available_seats: i64,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl CreateEventRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Event title is required.".to_string());
        }
        if self.location.trim().is_empty() {
            return Err("Event location is required.".to_string());
        }
        if self.fee < Decimal::ZERO {
            return Err("Fee cannot be negative.".to_string());
        }
        if self.available_seats <= 0 {
            return Err("Available seats must be greater than 0.".to_string());
        }
        if self.date_time_end < self.date_time_start {
            return Err("Event cannot end before it starts.".to_string());
        }
        Ok(())
    }
}
