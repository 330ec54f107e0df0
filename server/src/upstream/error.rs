use thiserror::Error;

/// Everything that can go wrong talking to the upstream backend, decided at
/// the network boundary so handlers never inspect raw responses.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Upstream rejected the token")]
    Unauthorized,

    #[error("Upstream resource not found")]
    NotFound,

    #[error("Upstream rejected the request: {0}")]
    Rejected(String),

    #[error("Upstream returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Upstream response could not be decoded: {0}")]
    Decode(String),

    #[error("Upstream base URL is invalid: {0}")]
    InvalidBaseUrl(String),

    #[error("Upstream unreachable: {0}")]
    Transport(#[from] reqwest::Error),
}

pub type UpstreamResult<T> = Result<T, UpstreamError>;
