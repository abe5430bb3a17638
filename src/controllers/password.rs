use crate::errors::ApiError;
use crate::navigation::Route;
use crate::state::AppState;

pub const RECOVER_MESSAGE: &str =
    "Please check your email for a link to reset your password";
pub const PASSWORD_CHANGED_MESSAGE: &str = "Your password has been updated";

/// Asks the backend to mail a password recovery code.
pub struct RecoverPassController {
    state: AppState,
}

impl RecoverPassController {
    pub fn new(state: &AppState) -> Self {
        Self {
            state: state.clone(),
        }
    }

    pub async fn recover(&self, email: &str) -> Result<(), ApiError> {
        self.state.auth.recover_password(email).await?;
        self.state.alerts.info(RECOVER_MESSAGE);
        self.state.navigator.go(Route::Front);
        Ok(())
    }
}

/// Changes the password, either for the logged-in user or with the code from
/// a recovery mail.
pub struct ChangePassController {
    state: AppState,
    code: Option<String>,
}

impl ChangePassController {
    /// Enter the view. Without a recovery code the user must be logged in.
    pub fn new(state: &AppState, code: Option<String>) -> Self {
        let code = code.filter(|c| !c.is_empty());
        if code.is_none() {
            state.session.check(&state.navigator);
        }
        Self {
            state: state.clone(),
            code,
        }
    }

    pub async fn change_password(&self, password: &str) -> Result<(), ApiError> {
        self.state
            .auth
            .change_password(password, self.code.as_deref())
            .await?;
        self.state.alerts.success(PASSWORD_CHANGED_MESSAGE);
        let route = if self.state.session.get().logged_in {
            Route::Front
        } else {
            Route::Login
        };
        self.state.navigator.go(route);
        Ok(())
    }
}
