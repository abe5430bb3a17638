use serde::{Deserialize, Serialize};

/// A tag with the number of photos carrying it.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub name: String,
    #[serde(default)]
    pub num_photos: i64,
    /// File name of a representative photo, if the backend sends one.
    #[serde(default)]
    pub photo: Option<String>,
}
