use serde::{Deserialize, Serialize};

/// What the current user may do with a photo, computed by the backend.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Permissions {
    #[serde(default)]
    pub vote: bool,
    #[serde(default)]
    pub edit: bool,
    #[serde(default)]
    pub delete: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    /// Stored file name of the image.
    #[serde(default)]
    pub photo: String,
    #[serde(default, alias = "ownerID")]
    pub owner_id: i64,
    #[serde(default)]
    pub owner_name: String,
    #[serde(default, deserialize_with = "nullable_tags")]
    pub tags: Vec<String>,
    #[serde(default, alias = "votes")]
    pub vote_count: i64,
    #[serde(default)]
    pub perms: Permissions,
}

fn nullable_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A page of photos. The backend answers either a bare array or an envelope.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum PhotoPage {
    List(Vec<Photo>),
    #[serde(rename_all = "camelCase")]
    Paged {
        #[serde(default, deserialize_with = "nullable_photos")]
        photos: Vec<Photo>,
        #[serde(default)]
        total: i64,
        #[serde(default)]
        current_page: i64,
        #[serde(default)]
        num_pages: i64,
    },
}

fn nullable_photos<'de, D>(deserializer: D) -> Result<Vec<Photo>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Photo>>::deserialize(deserializer)?.unwrap_or_default())
}

impl PhotoPage {
    pub fn into_photos(self) -> Vec<Photo> {
        match self {
            PhotoPage::List(photos) => photos,
            PhotoPage::Paged { photos, .. } => photos,
        }
    }
}

/// A photo about to be uploaded.
#[derive(Debug, Clone, Default)]
pub struct NewPhoto {
    pub title: String,
    /// Space-separated tags as typed by the user.
    pub taglist: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Split a user-typed, space-separated tag list.
pub fn split_taglist(taglist: &str) -> Vec<String> {
    taglist.split_whitespace().map(str::to_string).collect()
}
