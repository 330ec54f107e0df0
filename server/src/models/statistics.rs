use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventStatistic {
    pub event_name: String,
    #[serde(default)]
    pub total_attendees: u64,
    #[serde(default)]
    pub average_rating: Option<Decimal>,
    #[serde(default)]
    pub total_revenue: Option<Decimal>,
}

/// Organizer-wide totals across all event statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSummary {
    pub total_attendees: u64,
    pub total_revenue: Decimal,
    /// Mean over rated events only, two decimal places.
    pub average_rating: Option<Decimal>,
}

impl StatisticsSummary {
    pub fn from_statistics(statistics: &[EventStatistic]) -> Self {
        let total_attendees = statistics.iter().map(|s| s.total_attendees).sum();
        let total_revenue = statistics
            .iter()
            .filter_map(|s| s.total_revenue)
            .sum();

        let ratings: Vec<Decimal> = statistics.iter().filter_map(|s| s.average_rating).collect();
        let average_rating = if ratings.is_empty() {
            None
        } else {
            let mean = ratings.iter().sum::<Decimal>() / Decimal::from(ratings.len());
            Some(mean.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        };

        Self {
            total_attendees,
            total_revenue,
            average_rating,
        }
    }
}
