use std::sync::Arc;

use http::{HeaderMap, HeaderValue};
use tracing::{debug, info, warn};

use super::base::{Interceptor, ResponseParts, AUTH_TOKEN_HEADER};
use crate::store::TokenStore;

/// Attaches the stored token to every request and keeps the store current.
pub struct AuthInterceptor {
    storage: Arc<dyn TokenStore>,
    cookies: Arc<dyn TokenStore>,
}

impl AuthInterceptor {
    /// `cookies` holds a token handed over by an OAuth redirect; it is moved
    /// into `storage` on the next request.
    pub fn new(storage: Arc<dyn TokenStore>, cookies: Arc<dyn TokenStore>) -> Self {
        Self { storage, cookies }
    }

    fn migrate_cookie(&self) {
        if let Some(token) = self.cookies.get() {
            info!("Moving token from OAuth cookie into persistent storage");
            self.storage.set(&token);
            self.cookies.delete();
        }
    }
}

impl Interceptor for AuthInterceptor {
    fn get_name(&self) -> &str {
        "auth"
    }

    fn request(&self, headers: &mut HeaderMap) {
        self.migrate_cookie();

        headers.remove(AUTH_TOKEN_HEADER);
        let token = match self.storage.get() {
            Some(token) if !token.is_empty() => token,
            _ => return,
        };
        match HeaderValue::from_str(&token) {
            Ok(value) => {
                headers.insert(AUTH_TOKEN_HEADER, value);
            }
            Err(e) => warn!("Stored token is not a valid header value: {}", e),
        }
    }

    fn response(&self, response: &ResponseParts<'_>) {
        let rotated = response
            .headers
            .get(AUTH_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|token| !token.is_empty());
        if let Some(token) = rotated {
            if self.storage.get().as_deref() != Some(token) {
                debug!("Backend rotated the auth token");
                self.storage.set(token);
            }
        }
    }
}
