use http::StatusCode;
use tracing::{debug, info};

use super::base::{ErrorOutcome, Interceptor, ResponseParts};
use crate::alert::Alerts;
use crate::navigation::Navigator;

pub const GENERIC_ERROR_MESSAGE: &str = "Sorry, an error has occurred";
pub const FORBIDDEN_MESSAGE: &str = "Sorry, you're not allowed to do this";
pub const FORM_ERRORS_MESSAGE: &str = "Sorry, your form contains errors, please try again";
pub const TOO_LARGE_MESSAGE: &str = "The file was too large!";

/// Turns failed responses into a login redirect or a danger alert.
pub struct ErrorInterceptor {
    navigator: Navigator,
    alerts: Alerts,
}

impl ErrorInterceptor {
    pub fn new(navigator: Navigator, alerts: Alerts) -> Self {
        Self { navigator, alerts }
    }
}

/// The message shown for a failed response, or `None` when the failure is
/// not shown to the user at all.
pub fn error_message(response: &ResponseParts<'_>) -> Option<String> {
    let status = response.status;
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::NOT_FOUND {
        return None;
    }

    let mut msg = GENERIC_ERROR_MESSAGE;
    if status == StatusCode::FORBIDDEN {
        msg = FORBIDDEN_MESSAGE;
    }
    if status == StatusCode::BAD_REQUEST && response.body.validation_errors().is_some() {
        msg = FORM_ERRORS_MESSAGE;
    }
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        msg = TOO_LARGE_MESSAGE;
    }
    // A plain-text body from the backend is the most specific message.
    if let Some(text) = response.body.text() {
        msg = text;
    }
    Some(msg.trim().to_string())
}

impl Interceptor for ErrorInterceptor {
    fn get_name(&self) -> &str {
        "error"
    }

    fn response_error(&self, response: &ResponseParts<'_>) -> ErrorOutcome {
        match response.status {
            StatusCode::UNAUTHORIZED => {
                info!("Request was unauthorized; redirecting to login");
                self.navigator.redirect_to_login();
                ErrorOutcome::RedirectedToLogin
            }
            StatusCode::NOT_FOUND => {
                debug!("Not found; leaving it to the caller");
                ErrorOutcome::Suppressed
            }
            _ => match error_message(response) {
                Some(msg) => {
                    self.alerts.danger(msg.clone());
                    ErrorOutcome::Notified(msg)
                }
                None => ErrorOutcome::Suppressed,
            },
        }
    }
}
