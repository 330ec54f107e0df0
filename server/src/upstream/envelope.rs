use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::error::{UpstreamError, UpstreamResult};

/// The `{success, data, message}` wrapper every upstream response uses.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    fn into_result(self) -> UpstreamResult<Option<T>> {
        if self.success {
            Ok(self.data)
        } else {
            Err(UpstreamError::Rejected(
                self.message.unwrap_or_else(|| "Request was not successful".to_string()),
            ))
        }
    }
}

/// Decodes a response body that must carry `data`.
pub fn decode<T>(status: StatusCode, body: &[u8]) -> UpstreamResult<T>
where
    T: DeserializeOwned,
{
    decode_optional(status, body)?
        .ok_or_else(|| UpstreamError::Decode("response has no data".to_string()))
}

/// Decodes a response body whose `data` may be absent.
pub fn decode_optional<T>(status: StatusCode, body: &[u8]) -> UpstreamResult<Option<T>>
where
    T: DeserializeOwned,
{
    if !status.is_success() {
        return Err(status_error(status, body));
    }
    if body.is_empty() {
        return Err(UpstreamError::Decode("empty response body".to_string()));
    }

    let envelope: Envelope<T> =
        serde_json::from_slice(body).map_err(|e| UpstreamError::Decode(e.to_string()))?;
    envelope.into_result()
}

fn status_error(status: StatusCode, body: &[u8]) -> UpstreamError {
    match status {
        StatusCode::UNAUTHORIZED => UpstreamError::Unauthorized,
        StatusCode::NOT_FOUND => UpstreamError::NotFound,
        _ => {
            let message = serde_json::from_slice::<Envelope<serde_json::Value>>(body)
                .ok()
                .and_then(|envelope| envelope.message)
                .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string());

            if status == StatusCode::BAD_REQUEST && !message.is_empty() {
                UpstreamError::Rejected(message)
            } else {
                UpstreamError::Status {
                    status: status.as_u16(),
                    message,
                }
            }
        }
    }
}
