use serde::{Deserialize, Serialize};

use super::photo::Photo;

/// Session info as returned by the auth endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub logged_in: bool,
}

/// The client-side view of the current user.
///
/// A logged-out session never carries an id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub logged_in: bool,
    pub id: Option<i64>,
    pub name: Option<String>,
    pub is_admin: bool,
}

impl Session {
    /// Reset to the logged-out defaults.
    pub fn clear(&mut self) {
        *self = Session::default();
    }

    /// Copy the server-provided fields.
    pub fn set(&mut self, info: &SessionInfo) {
        // Anonymous users come back with loggedIn false and a zero id.
        if !info.logged_in || info.id.is_none() {
            self.clear();
            return;
        }
        self.logged_in = true;
        self.id = info.id;
        self.name = info.name.clone();
        self.is_admin = info.is_admin;
    }

    pub fn can_edit(&self, photo: &Photo) -> bool {
        self.logged_in && self.id == Some(photo.owner_id)
    }

    pub fn can_delete(&self, photo: &Photo) -> bool {
        self.logged_in && (self.can_edit(photo) || self.is_admin)
    }
}
