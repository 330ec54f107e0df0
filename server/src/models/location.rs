use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default)]
    pub id: Option<i64>,
    pub city_name: String,
}

impl Location {
    /// Path slug for the location page: lowercase, whitespace runs as `-`.
    pub fn slug(&self) -> String {
        self.city_name
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Case-insensitive substring match on the city name.
    pub fn matches(&self, query: &str) -> bool {
        self.city_name
            .to_lowercase()
            .contains(&query.trim().to_lowercase())
    }
}

/// A location suggestion as the search box renders it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSuggestion {
    pub id: Option<i64>,
    pub city_name: String,
    pub slug: String,
}

impl From<Location> for LocationSuggestion {
    fn from(location: Location) -> Self {
        Self {
            slug: location.slug(),
            id: location.id,
            city_name: location.city_name,
        }
    }
}
