use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub event_name: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    pub rating: u8,
    #[serde(default)]
    pub review: String,
    #[serde(default)]
    pub photo_profile_url: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
}

/// Review form as the browser submits it.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewForm {
    pub review: String,
    pub rating: u8,
    #[serde(default)]
    pub feedback: String,
}

/// Review body for the upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub event_id: i64,
    pub review: String,
    pub rating: u8,
    pub feedback: String,
}

impl ReviewRequest {
    pub fn from_form(event_id: i64, form: ReviewForm) -> Result<Self, String> {
        let review = form.review.trim();
        if review.is_empty() || !(1..=5).contains(&form.rating) {
            return Err("Please provide a valid review and rating.".to_string());
        }

        Ok(Self {
            event_id,
            review: review.to_string(),
            rating: form.rating,
            feedback: form.feedback.trim().to_string(),
        })
    }
}
