use tracing::debug;

use crate::errors::ApiError;
use crate::models::photo::split_taglist;
use crate::models::Photo;
use crate::navigation::Route;
use crate::state::AppState;

pub const DELETED_MESSAGE: &str = "Your photo has been deleted";

/// A single photo with its vote, edit and delete actions.
///
/// Actions are gated on the permissions the backend sent with the photo.
pub struct DetailController {
    state: AppState,
    id: i64,
    photo: Option<Photo>,
    /// The photo's tags as one editable, space-separated string.
    pub taglist: String,
    edit_title: bool,
    edit_tags: bool,
    page_loaded: bool,
    not_found: bool,
}

impl DetailController {
    pub fn new(state: &AppState, id: i64) -> Self {
        Self {
            state: state.clone(),
            id,
            photo: None,
            taglist: String::new(),
            edit_title: false,
            edit_tags: false,
            page_loaded: false,
            not_found: false,
        }
    }

    /// Fetch the photo. A missing photo leaves the view empty rather than
    /// failing.
    pub async fn load(&mut self) -> Result<(), ApiError> {
        match self.state.photos.get(self.id).await {
            Ok(photo) => {
                self.taglist = photo.tags.join(" ");
                self.photo = Some(photo);
                self.page_loaded = true;
                Ok(())
            }
            Err(e) if e.is_not_found() => {
                debug!("Photo {} not found", self.id);
                self.not_found = true;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Vote the photo up. Returns whether a vote was sent.
    pub async fn vote_up(&mut self) -> Result<bool, ApiError> {
        if !self.take_vote() {
            return Ok(false);
        }
        self.state.photos.vote_up(self.id).await?;
        Ok(true)
    }

    /// Vote the photo down. Returns whether a vote was sent.
    pub async fn vote_down(&mut self) -> Result<bool, ApiError> {
        if !self.take_vote() {
            return Ok(false);
        }
        self.state.photos.vote_down(self.id).await?;
        Ok(true)
    }

    // One vote per view: the flag drops before the request goes out.
    fn take_vote(&mut self) -> bool {
        match self.photo.as_mut() {
            Some(photo) if photo.perms.vote => {
                photo.perms.vote = false;
                true
            }
            _ => false,
        }
    }

    /// Delete the photo once the user has confirmed. Returns whether the
    /// photo was deleted.
    pub async fn delete(&mut self, confirmed: bool) -> Result<bool, ApiError> {
        let session = self.state.session.get();
        let allowed = self
            .photo
            .as_ref()
            .is_some_and(|p| p.perms.delete && session.can_delete(p));
        if !allowed || !confirmed {
            return Ok(false);
        }
        self.state.photos.delete(self.id).await?;
        self.state.alerts.warning(DELETED_MESSAGE);
        self.state.navigator.go(Route::Front);
        Ok(true)
    }

    // Both the backend's permissions and the local session must agree.
    fn can_edit(&self) -> bool {
        let session = self.state.session.get();
        self.photo
            .as_ref()
            .is_some_and(|p| p.perms.edit && session.can_edit(p))
    }

    pub fn show_edit_form(&mut self) {
        if self.can_edit() {
            self.edit_title = true;
        }
    }

    pub fn hide_edit_form(&mut self) {
        self.edit_title = false;
    }

    pub fn show_edit_tags_form(&mut self) {
        if self.can_edit() {
            self.edit_tags = true;
        }
    }

    pub fn hide_edit_tags_form(&mut self) {
        self.edit_tags = false;
    }

    pub async fn update_title(&mut self, title: &str) -> Result<(), ApiError> {
        if let Some(photo) = self.photo.as_mut() {
            photo.title = title.to_string();
        }
        self.edit_title = false;
        self.state.photos.update_title(self.id, title).await
    }

    /// Save the tags typed into [`taglist`](Self::taglist).
    pub async fn update_tags(&mut self) -> Result<(), ApiError> {
        let tags = split_taglist(&self.taglist);
        if let Some(photo) = self.photo.as_mut() {
            photo.tags = tags.clone();
        }
        self.edit_tags = false;
        self.state.photos.update_tags(self.id, &tags).await
    }

    pub fn photo(&self) -> Option<&Photo> {
        self.photo.as_ref()
    }

    pub fn editing_title(&self) -> bool {
        self.edit_title
    }

    pub fn editing_tags(&self) -> bool {
        self.edit_tags
    }

    pub fn page_loaded(&self) -> bool {
        self.page_loaded
    }

    pub fn not_found(&self) -> bool {
        self.not_found
    }
}
