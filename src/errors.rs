//! Error types shared by the resource clients and controllers.

use std::collections::HashMap;

use http::StatusCode;

/// A failed call against the photoshare API.
///
/// Every non-2xx response is turned into one of these after the response
/// interceptors have run, so callers can still handle a failure locally.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 401: the session is missing or expired.
    #[error("authentication required")]
    Unauthorized,

    /// 404: the resource does not exist.
    #[error("not found")]
    NotFound,

    /// 403: the current user may not perform this action.
    #[error("not allowed: {message}")]
    Forbidden { message: String },

    /// 400 carrying a structured `errors` map.
    #[error("validation failed: {errors:?}")]
    Validation { errors: HashMap<String, String> },

    /// 413: the uploaded file was rejected by the backend.
    #[error("payload too large")]
    PayloadTooLarge,

    /// Any other non-success status.
    #[error("unexpected status {status}: {message}")]
    Status { status: u16, message: String },

    /// The request never produced a response.
    #[error("error sending request: {0}")]
    Request(String),

    /// The response body could not be decoded.
    #[error("error decoding response: {0}")]
    Decode(String),

    /// A URL template could not be expanded.
    #[error("invalid url template: {0}")]
    Template(String),
}

impl ApiError {
    /// Status code behind the error, if the backend answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        let code = match self {
            Self::Unauthorized => 401,
            Self::NotFound => 404,
            Self::Forbidden { .. } => 403,
            Self::Validation { .. } => 400,
            Self::PayloadTooLarge => 413,
            Self::Status { status, .. } => *status,
            Self::Request(_) | Self::Decode(_) | Self::Template(_) => return None,
        };
        StatusCode::from_u16(code).ok()
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Request(e.to_string())
        }
    }
}

/// Configuration could not be loaded or is inconsistent.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("error loading configuration: {0}")]
    Load(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
