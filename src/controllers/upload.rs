use crate::errors::ApiError;
use crate::models::{NewPhoto, Photo};
use crate::navigation::Route;
use crate::state::AppState;

pub const UPLOADED_MESSAGE: &str = "Your photo has been uploaded";

/// The upload form. Only logged-in users get to see it.
pub struct UploadController {
    state: AppState,
    form_disabled: bool,
}

impl UploadController {
    /// Enter the upload view, bouncing anonymous users to the login page.
    pub fn new(state: &AppState) -> Self {
        state.enter(Route::Upload);
        Self {
            state: state.clone(),
            form_disabled: false,
        }
    }

    /// Upload the photo. The form stays disabled while the upload runs and
    /// is enabled again if it fails.
    pub async fn upload(&mut self, photo: &NewPhoto) -> Result<Photo, ApiError> {
        if !self.state.session.check(&self.state.navigator) {
            return Err(ApiError::Unauthorized);
        }

        self.form_disabled = true;
        match self.state.photos.create(photo).await {
            Ok(created) => {
                self.state.alerts.success(UPLOADED_MESSAGE);
                self.state.navigator.go(Route::Latest);
                Ok(created)
            }
            Err(e) => {
                self.form_disabled = false;
                Err(e)
            }
        }
    }

    pub fn form_disabled(&self) -> bool {
        self.form_disabled
    }
}
