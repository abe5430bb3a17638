use std::sync::Arc;

use http::Method;

use super::client::ApiClient;
use super::endpoint::Endpoint;
use crate::errors::ApiError;
use crate::models::Tag;

const LIST: Endpoint = Endpoint::new(Method::GET, "/api/tags/");

pub struct TagsClient {
    api: Arc<ApiClient>,
}

impl TagsClient {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Tag>, ApiError> {
        let tags: Option<Vec<Tag>> = self.api.call_json(&LIST, &[], &[], None).await?;
        Ok(tags.unwrap_or_default())
    }
}
