use http::{HeaderMap, StatusCode};
use serde_json::Value;

/// Header carrying the auth token on requests, and a rotated one on responses.
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// A response body, decoded just far enough for the interceptors.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Empty,
    Text(String),
    Json(Value),
}

impl ResponseBody {
    /// Classify a raw body by its content type. JSON that fails to parse is
    /// kept as text.
    pub fn from_raw(content_type: Option<&str>, raw: String) -> Self {
        if raw.is_empty() {
            return ResponseBody::Empty;
        }
        let is_json = content_type
            .map(|ct| ct.to_ascii_lowercase().contains("application/json"))
            .unwrap_or(false);
        if is_json {
            if let Ok(value) = serde_json::from_str(&raw) {
                return ResponseBody::Json(value);
            }
        }
        ResponseBody::Text(raw)
    }

    /// Non-empty plain text body, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            ResponseBody::Text(s) if !s.trim().is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    /// The structured `errors` object of a validation failure.
    pub fn validation_errors(&self) -> Option<&serde_json::Map<String, Value>> {
        match self {
            ResponseBody::Json(value) => value.get("errors").and_then(Value::as_object),
            _ => None,
        }
    }
}

/// The parts of a response an interceptor may inspect.
#[derive(Debug)]
pub struct ResponseParts<'a> {
    pub status: StatusCode,
    pub headers: &'a HeaderMap,
    pub body: &'a ResponseBody,
}

/// What an error hook did with a failed response. The failure is returned
/// to the caller in every case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorOutcome {
    /// The hook took no action.
    Ignored,
    /// The user was sent to the login view.
    RedirectedToLogin,
    /// Left for the caller to handle.
    Suppressed,
    /// The user was shown this message.
    Notified(String),
}

/// A hook point for all outgoing and incoming API traffic.
pub trait Interceptor: Send + Sync {
    /// A descriptive name for the interceptor (for logs/debug).
    fn get_name(&self) -> &str;

    fn request(&self, _headers: &mut HeaderMap) {}

    fn response(&self, _response: &ResponseParts<'_>) {}

    fn response_error(&self, _response: &ResponseParts<'_>) -> ErrorOutcome {
        ErrorOutcome::Ignored
    }
}
