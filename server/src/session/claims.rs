use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ExpiryClaim {
    exp: Option<i64>,
}

/// Reads the `exp` claim of an upstream JWT without verifying it. The
/// upstream verifies its own tokens; this only tells us how long to keep
/// the session around.
pub fn token_expiry(token: &str) -> Option<DateTime<Utc>> {
    let mut parts = token.split('.');
    let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => {
            tracing::debug!("Access token is not a JWT, falling back to session TTL");
            return None;
        }
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|err| tracing::debug!("Failed to base64 decode JWT payload: {:?}", err))
        .ok()?;
    let claim: ExpiryClaim = serde_json::from_slice(&bytes)
        .map_err(|err| tracing::debug!("Failed to parse JWT claims: {:?}", err))
        .ok()?;

    DateTime::from_timestamp(claim.exp?, 0)
}

#[cfg(test)]
pub(crate) fn jwt_with_exp(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"ayu@example.com","exp":{}}}"#, exp));
    format!("{}.{}.signature", header, payload)
}
