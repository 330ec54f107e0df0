use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::create_security_headers_layer;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3001";
const DEFAULT_UPSTREAM_URL: &str = "http://localhost:8080";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;
const DEFAULT_SESSION_TTL_SECS: u32 = 3600;
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Whether redeeming points may be combined with an event voucher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PointsPolicy {
    /// Points and any voucher stack.
    #[default]
    Stackable,
    /// Points are refused when the selected code is an event voucher.
    ExclusiveWithEventVoucher,
}

impl FromStr for PointsPolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stackable" => Ok(PointsPolicy::Stackable),
            "exclusive-event-voucher" => Ok(PointsPolicy::ExclusiveWithEventVoucher),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub upstream_base_url: String,
    pub upstream_timeout: Duration,
    pub session_ttl: chrono::Duration,
    pub points_policy: PointsPolicy,
    pub allowed_origins: Vec<String>,
    pub production: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; missing keys take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let bind_addr = parse("BIND_ADDR", read("BIND_ADDR", DEFAULT_BIND_ADDR))?;
        let upstream_timeout_secs: u64 = parse(
            "UPSTREAM_TIMEOUT_SECS",
            read("UPSTREAM_TIMEOUT_SECS", &DEFAULT_UPSTREAM_TIMEOUT_SECS.to_string()),
        )?;
        let session_ttl_secs: u32 = parse(
            "SESSION_TTL_SECS",
            read("SESSION_TTL_SECS", &DEFAULT_SESSION_TTL_SECS.to_string()),
        )?;
        let points_policy = parse("CHECKOUT_POINTS_POLICY", read("CHECKOUT_POINTS_POLICY", "stackable"))?;

        let upstream_base_url = read("UPSTREAM_API_BASE_URL", DEFAULT_UPSTREAM_URL);
        if !upstream_base_url.starts_with("http://") && !upstream_base_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                key: "UPSTREAM_API_BASE_URL",
                value: upstream_base_url,
            });
        }

        let allowed_origins = read("CORS_ALLOWED_ORIGINS", DEFAULT_ALLOWED_ORIGINS)
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        let production = lookup("RUST_ENV")
            .map(|v| v.to_lowercase() == "production")
            .unwrap_or(false);

        Ok(Self {
            bind_addr,
            upstream_base_url,
            upstream_timeout: Duration::from_secs(upstream_timeout_secs),
            session_ttl: chrono::Duration::seconds(i64::from(session_ttl_secs)),
            points_policy,
            allowed_origins,
            production,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3001)),
            upstream_base_url: DEFAULT_UPSTREAM_URL.to_string(),
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            session_ttl: chrono::Duration::seconds(i64::from(DEFAULT_SESSION_TTL_SECS)),
            points_policy: PointsPolicy::default(),
            allowed_origins: Vec::new(),
            production: false,
        }
    }
}

fn parse<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}
