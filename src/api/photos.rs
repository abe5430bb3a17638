use std::sync::Arc;

use http::Method;
use tracing::info;

use super::client::ApiClient;
use super::endpoint::Endpoint;
use super::form::{FileData, FormData};
use crate::errors::ApiError;
use crate::models::photo::split_taglist;
use crate::models::{NewPhoto, Photo, PhotoPage};

const LIST: Endpoint = Endpoint::new(Method::GET, "/api/photos/");
const GET: Endpoint = Endpoint::new(Method::GET, "/api/photos/{id}");
const CREATE: Endpoint = Endpoint::new(Method::POST, "/api/photos/");
const DELETE: Endpoint = Endpoint::new(Method::DELETE, "/api/photos/{id}");
const UPDATE_TITLE: Endpoint = Endpoint::new(Method::PATCH, "/api/photos/{id}/title");
const UPDATE_TAGS: Endpoint = Endpoint::new(Method::PATCH, "/api/photos/{id}/tags");
const VOTE_UP: Endpoint = Endpoint::new(Method::PATCH, "/api/photos/{id}/vote-up");
const VOTE_DOWN: Endpoint = Endpoint::new(Method::PATCH, "/api/photos/{id}/vote-down");

/// Filters for a page of photos. Empty filters are left off the URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhotoQuery {
    pub page: u32,
    pub q: String,
    pub owner_id: Option<i64>,
    pub order_by: String,
}

impl PhotoQuery {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page.max(1).to_string()),
            ("q", self.q.clone()),
            (
                "ownerID",
                self.owner_id.map(|id| id.to_string()).unwrap_or_default(),
            ),
            ("orderBy", self.order_by.clone()),
        ]
    }
}

pub struct PhotosClient {
    api: Arc<ApiClient>,
}

impl PhotosClient {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn list(&self, query: &PhotoQuery) -> Result<Vec<Photo>, ApiError> {
        let page: PhotoPage = self
            .api
            .call_json(&LIST, &[], &query.to_query(), None)
            .await?;
        Ok(page.into_photos())
    }

    pub async fn get(&self, id: i64) -> Result<Photo, ApiError> {
        let id = id.to_string();
        self.api.call_json(&GET, &[("id", &id)], &[], None).await
    }

    /// Upload a new photo as a multipart form.
    pub async fn create(&self, photo: &NewPhoto) -> Result<Photo, ApiError> {
        let tags = split_taglist(&photo.taglist);
        let payload = FormData::new()
            .field("title", photo.title.clone())
            .field("taglist", tags.join(" "))
            .file(
                "photo",
                FileData {
                    file_name: photo.file_name.clone(),
                    content_type: photo.content_type.clone(),
                    bytes: photo.bytes.clone(),
                },
            );
        let created: Photo = self.api.call_json(&CREATE, &[], &[], Some(payload)).await?;
        info!("Uploaded photo {} ('{}')", created.id, created.title);
        Ok(created)
    }

    pub async fn update_title(&self, id: i64, title: &str) -> Result<(), ApiError> {
        let id = id.to_string();
        let payload = FormData::new().field("title", title);
        self.api
            .call(&UPDATE_TITLE, &[("id", &id)], &[], Some(payload))
            .await?;
        Ok(())
    }

    pub async fn update_tags(&self, id: i64, tags: &[String]) -> Result<(), ApiError> {
        let id = id.to_string();
        let payload = FormData::new().field("tags", tags.to_vec());
        self.api
            .call(&UPDATE_TAGS, &[("id", &id)], &[], Some(payload))
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let id = id.to_string();
        self.api.call(&DELETE, &[("id", &id)], &[], None).await?;
        info!("Deleted photo {}", id);
        Ok(())
    }

    pub async fn vote_up(&self, id: i64) -> Result<(), ApiError> {
        let id = id.to_string();
        self.api.call(&VOTE_UP, &[("id", &id)], &[], None).await?;
        Ok(())
    }

    pub async fn vote_down(&self, id: i64) -> Result<(), ApiError> {
        let id = id.to_string();
        self.api.call(&VOTE_DOWN, &[("id", &id)], &[], None).await?;
        Ok(())
    }
}
