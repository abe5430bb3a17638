use crate::api::NewUser;
use crate::auth::Authenticator;
use crate::errors::ApiError;
use crate::navigation::Route;
use crate::state::AppState;

/// The login form.
pub struct LoginController {
    state: AppState,
    authenticator: Authenticator,
}

impl LoginController {
    pub fn new(state: &AppState) -> Self {
        Self {
            state: state.clone(),
            authenticator: Authenticator::new(state),
        }
    }

    /// Log in with a user name or email address. Returns whether the backend
    /// accepted the credentials.
    ///
    /// On success the user goes back to wherever they were sent to login
    /// from, or to the front page.
    pub async fn login(&self, identifier: &str, password: &str) -> Result<bool, ApiError> {
        let response = self.state.auth.login(identifier, password).await?;
        if !response.info.logged_in {
            return Ok(false);
        }

        self.authenticator.login(&response);
        self.state.alerts.success(format!(
            "Welcome back, {}",
            response.info.name.as_deref().unwrap_or_default()
        ));

        let navigator = &self.state.navigator;
        let mut route = navigator.last_login_url().unwrap_or(Route::Front);
        if route == navigator.current() {
            route = Route::Front;
        }
        navigator.go(route);
        Ok(true)
    }
}

/// The signup form. A new account is logged in straight away.
pub struct SignupController {
    state: AppState,
    authenticator: Authenticator,
}

impl SignupController {
    pub fn new(state: &AppState) -> Self {
        Self {
            state: state.clone(),
            authenticator: Authenticator::new(state),
        }
    }

    pub async fn signup(&self, user: &NewUser) -> Result<(), ApiError> {
        let response = self.state.users.signup(user).await?;
        self.authenticator.login(&response);
        self.state.alerts.success(format!(
            "Welcome, {}",
            response.info.name.as_deref().unwrap_or_default()
        ));
        self.state.navigator.go(Route::Front);
        Ok(())
    }
}
