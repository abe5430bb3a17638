use tracing::warn;

use crate::auth::Authenticator;
use crate::errors::ApiError;
use crate::models::Session;
use crate::navigation::Route;
use crate::state::AppState;

/// The application shell: session bootstrap, login/logout and the search box.
pub struct AppController {
    state: AppState,
    authenticator: Authenticator,
    pub search_query: String,
}

impl AppController {
    pub fn new(state: &AppState) -> Self {
        Self {
            state: state.clone(),
            authenticator: Authenticator::new(state),
            search_query: String::new(),
        }
    }

    /// Load the session from the backend.
    pub async fn init(&self) -> Result<Session, ApiError> {
        self.authenticator.init().await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        let result = self.authenticator.logout().await;
        if let Err(e) = &result {
            warn!("Logout did not reach the backend: {}", e);
        }
        self.state.navigator.go(Route::Front);
        result
    }

    pub fn login(&self) {
        self.state.navigator.set_last_login_url();
        self.state.navigator.go(Route::Login);
    }

    /// Search for whatever is in the search box, then clear it.
    pub fn do_search(&mut self) {
        let q = std::mem::take(&mut self.search_query);
        self.state.navigator.go(Route::Search(q));
    }
}
