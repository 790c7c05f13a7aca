use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
    #[error("session expired or not logged in")]
    Unauthorized,
    #[error("unexpected status {0}")]
    UnexpectedStatus(StatusCode),
    #[error("{status}: {message}")]
    Backend { status: StatusCode, message: String },
}
