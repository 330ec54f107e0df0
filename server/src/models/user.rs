use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Organizer,
}

impl Role {
    /// Where the browser lands after signing in.
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Role::Customer => "/dashboard/customer",
            Role::Organizer => "/dashboard/organizer",
        }
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        match raw.trim().to_lowercase().as_str() {
            "customer" => Ok(Role::Customer),
            "organizer" => Ok(Role::Organizer),
            other => Err(serde::de::Error::unknown_variant(other, &["customer", "organizer"])),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub points_balance: Decimal,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub photo_profile_url: Option<String>,
    #[serde(default)]
    pub referral_code: Option<String>,
}

impl UserDetails {
    pub fn is_organizer(&self) -> bool {
        self.role == Role::Organizer
    }
}

/// Another user's profile as shown on public pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, alias = "fullName")]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub photo_profile_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginToken {
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referral_code: Option<String>,
}

impl SignupRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Name is required.".to_string());
        }
        if !self.email.contains('@') {
            return Err("A valid email is required.".to_string());
        }
        if self.password.is_empty() {
            return Err("Password is required.".to_string());
        }
        Ok(())
    }

    /// Blank referral codes are not sent.
    pub fn normalised(mut self) -> Self {
        self.referral_code = self
            .referral_code
            .map(|code| code.trim().to_string())
            .filter(|code| !code.is_empty());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub photo_profile_url: Option<String>,
}
