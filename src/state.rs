//! Shared application state.
//!
//! Built once at start-up and handed to every controller. Controllers are
//! created per view and dropped when the user navigates away; the state
//! outlives them.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::alert::Alerts;
use crate::api::{ApiClient, AuthClient, PhotosClient, TagsClient, UsersClient};
use crate::config::ConfigV1;
use crate::errors::ApiError;
use crate::interceptors::{AuthInterceptor, ErrorInterceptor, Interceptor};
use crate::models::{Session, SessionInfo};
use crate::navigation::{Navigator, Route};
use crate::store::{MemoryStore, TokenStore};

/// The current session, shared between controllers and interceptors.
#[derive(Clone, Default)]
pub struct SharedSession(Arc<RwLock<Session>>);

impl SharedSession {
    /// A snapshot of the session.
    pub fn get(&self) -> Session {
        self.0.read().unwrap_or_else(|p| p.into_inner()).clone()
    }

    pub fn set(&self, info: &SessionInfo) {
        self.0.write().unwrap_or_else(|p| p.into_inner()).set(info);
    }

    pub fn clear(&self) {
        self.0.write().unwrap_or_else(|p| p.into_inner()).clear();
    }

    /// For login-required views: sends anonymous users to the login page and
    /// reports whether the view may continue.
    pub fn check(&self, navigator: &Navigator) -> bool {
        if self.get().logged_in {
            return true;
        }
        navigator.redirect_to_login();
        false
    }
}

/// Application state shared across all controllers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    pub session: SharedSession,
    pub alerts: Alerts,
    pub navigator: Navigator,
    /// Persistent home of the auth token.
    pub token_store: Arc<dyn TokenStore>,
    /// Where an OAuth redirect drops a fresh token.
    pub cookies: Arc<dyn TokenStore>,
    pub photos: Arc<PhotosClient>,
    pub tags: Arc<TagsClient>,
    pub users: Arc<UsersClient>,
    pub auth: Arc<AuthClient>,
}

impl AppState {
    /// Wire the interceptor chain and resource clients around `token_store`.
    pub fn new(config: ConfigV1, token_store: Arc<dyn TokenStore>) -> Result<Self, ApiError> {
        Self::with_cookies(config, token_store, Arc::new(MemoryStore::new()))
    }

    pub fn with_cookies(
        config: ConfigV1,
        token_store: Arc<dyn TokenStore>,
        cookies: Arc<dyn TokenStore>,
    ) -> Result<Self, ApiError> {
        let navigator = Navigator::new();
        let alerts = Alerts::new(Duration::from_millis(config.alerts.dismiss_after_ms));

        let interceptors: Vec<Arc<dyn Interceptor>> = vec![
            Arc::new(AuthInterceptor::new(token_store.clone(), cookies.clone())),
            Arc::new(ErrorInterceptor::new(navigator.clone(), alerts.clone())),
        ];
        let api = Arc::new(ApiClient::new(&config.api, interceptors)?);

        Ok(Self {
            config: Arc::new(config),
            session: SharedSession::default(),
            alerts,
            navigator,
            token_store,
            cookies,
            photos: Arc::new(PhotosClient::new(api.clone())),
            tags: Arc::new(TagsClient::new(api.clone())),
            users: Arc::new(UsersClient::new(api.clone())),
            auth: Arc::new(AuthClient::new(api)),
        })
    }

    /// Navigate to `route`. Login-required routes send anonymous users to
    /// the login page instead. Returns whether the route was entered.
    pub fn enter(&self, route: Route) -> bool {
        let guarded = route.login_required();
        self.navigator.go(route);
        !guarded || self.session.check(&self.navigator)
    }

    pub fn page_size(&self) -> usize {
        self.config.api.page_size
    }
}
