//! Errors raised while building, validating or persisting filters.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("invalid value \"{value}\" for filter \"{key}\"")]
    InvalidValue { key: String, value: String },
    #[error("\"{0}\" is not a known filter")]
    UnknownKey(String),
    #[error("Invalid date format: {0}")]
    Date(String),
    #[error("asset lookup failed: {0}")]
    Asset(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PartialEq for FilterError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::InvalidValue { key: a, value: b },
                Self::InvalidValue { key: c, value: d },
            ) => a == c && b == d,
            (Self::UnknownKey(a), Self::UnknownKey(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a == b,
            (Self::Asset(a), Self::Asset(b)) => a == b,
            (Self::Io(a), Self::Io(b)) => a.kind() == b.kind(),
            (Self::Json(a), Self::Json(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
