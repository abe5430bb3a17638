use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::api::{AuthClient, AuthResponse};
use crate::errors::ApiError;
use crate::models::Session;
use crate::state::{AppState, SharedSession};
use crate::store::TokenStore;

/// Keeps the session and the stored token in step with the backend.
pub struct Authenticator {
    client: Arc<AuthClient>,
    session: SharedSession,
    token_store: Arc<dyn TokenStore>,
}

impl Authenticator {
    pub fn new(state: &AppState) -> Self {
        Self {
            client: state.auth.clone(),
            session: state.session.clone(),
            token_store: state.token_store.clone(),
        }
    }

    /// Load the current session from the backend.
    pub async fn init(&self) -> Result<Session, ApiError> {
        let info = self.client.session_info().await?;
        self.session.set(&info);
        let session = self.session.get();
        debug!("Session initialised: logged_in={}", session.logged_in);
        Ok(session)
    }

    /// Adopt a successful login or signup.
    pub fn login(&self, response: &AuthResponse) {
        self.session.set(&response.info);
        if let Some(token) = response.token.as_deref() {
            self.token_store.set(token);
        }
        info!(
            "Logged in as '{}'",
            response.info.name.as_deref().unwrap_or_default()
        );
    }

    /// Log out on the backend, then drop the token and reset the session.
    /// The local state is cleared even when the backend call fails.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let result = self.client.logout().await;
        if let Err(e) = &result {
            warn!("Backend logout failed: {}", e);
        }
        self.token_store.delete();
        self.session.clear();
        info!("Logged out");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigV1;
    use crate::interceptors::AUTH_TOKEN_HEADER;
    use crate::store::MemoryStore;
    use mockito::Server;

    fn state(url: String, token: Option<&str>) -> AppState {
        let store = Arc::new(token.map(MemoryStore::with_token).unwrap_or_default());
        AppState::new(ConfigV1::for_base_url(url), store).unwrap()
    }

    #[tokio::test]
    async fn test_init_sets_session() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/auth/")
            .match_header(AUTH_TOKEN_HEADER, "tok")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": 4, "name": "dee", "isAdmin": true, "loggedIn": true}"#)
            .create_async()
            .await;

        let state = state(server.url(), Some("tok"));
        let session = Authenticator::new(&state).init().await.unwrap();
        assert!(session.logged_in);
        assert!(session.is_admin);
        assert_eq!(state.session.get().id, Some(4));
    }

    #[tokio::test]
    async fn test_logout_clears_even_when_backend_fails() {
        let mut server = Server::new_async().await;
        server
            .mock("DELETE", "/api/auth/")
            .with_status(500)
            .create_async()
            .await;

        let state = state(server.url(), Some("tok"));
        let authenticator = Authenticator::new(&state);
        authenticator.login(&AuthResponse {
            info: crate::models::SessionInfo {
                id: Some(1),
                name: Some("ann".into()),
                is_admin: false,
                logged_in: true,
            },
            token: Some("tok".into()),
        });

        assert!(authenticator.logout().await.is_err());
        assert_eq!(state.token_store.get(), None);
        assert_eq!(state.session.get(), Session::default());
    }
}
