//! View controllers.
//!
//! Each controller mediates between one view and the resource clients. A
//! controller is built when its view is entered and dropped when the user
//! navigates away; shared state lives in [`AppState`](crate::state::AppState).

pub mod app;
pub mod detail;
pub mod list;
pub mod login;
pub mod password;
pub mod tags;
pub mod upload;

pub use app::AppController;
pub use detail::DetailController;
pub use list::ListController;
pub use login::{LoginController, SignupController};
pub use password::{ChangePassController, RecoverPassController};
pub use tags::TagsController;
pub use upload::UploadController;

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use serde_json::{json, Value};

    use crate::config::ConfigV1;
    use crate::models::SessionInfo;
    use crate::state::AppState;
    use crate::store::MemoryStore;

    pub fn state(url: String) -> AppState {
        AppState::new(ConfigV1::for_base_url(url), Arc::new(MemoryStore::new())).unwrap()
    }

    pub fn logged_in_state(url: String, id: i64) -> AppState {
        let state = AppState::new(
            ConfigV1::for_base_url(url),
            Arc::new(MemoryStore::with_token("tok")),
        )
        .unwrap();
        state.session.set(&SessionInfo {
            id: Some(id),
            name: Some("ann".into()),
            is_admin: false,
            logged_in: true,
        });
        state
    }

    pub fn photo_json(id: i64, vote: bool, edit: bool, delete: bool) -> Value {
        json!({
            "id": id,
            "title": format!("photo {}", id),
            "photo": format!("{}.jpg", id),
            "ownerId": 1,
            "ownerName": "ann",
            "tags": ["beach", "sun"],
            "votes": 3,
            "perms": {"vote": vote, "edit": edit, "delete": delete}
        })
    }
}
