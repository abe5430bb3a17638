use std::cmp::Ordering;

use crate::errors::ApiError;
use crate::models::Tag;
use crate::navigation::Route;
use crate::state::AppState;

pub const DEFAULT_ORDER_FIELD: &str = "-numPhotos";

/// The tag cloud. Tags can be ordered by `name` or `numPhotos`; a leading `-`
/// sorts descending.
pub struct TagsController {
    state: AppState,
    tags: Vec<Tag>,
    order_field: String,
    page_loaded: bool,
}

impl TagsController {
    pub fn new(state: &AppState) -> Self {
        Self {
            state: state.clone(),
            tags: Vec::new(),
            order_field: DEFAULT_ORDER_FIELD.to_string(),
            page_loaded: false,
        }
    }

    pub async fn load(&mut self) -> Result<(), ApiError> {
        self.tags = self.state.tags.list().await?;
        self.page_loaded = true;
        Ok(())
    }

    pub fn order_tags(&mut self, field: &str) {
        self.order_field = field.to_string();
    }

    pub fn order_field(&self) -> &str {
        &self.order_field
    }

    /// The tags in the current order. Unknown fields keep the backend order.
    pub fn tags(&self) -> Vec<&Tag> {
        let (descending, field) = match self.order_field.strip_prefix('-') {
            Some(field) => (true, field),
            None => (false, self.order_field.as_str()),
        };

        let mut tags: Vec<&Tag> = self.tags.iter().collect();
        tags.sort_by(|a, b| {
            let ordering = match field {
                "name" => a.name.cmp(&b.name),
                "numPhotos" => a.num_photos.cmp(&b.num_photos),
                _ => Ordering::Equal,
            };
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
        tags
    }

    pub fn do_search(&self, tag: &str) {
        self.state.navigator.go(Route::Search(tag.to_string()));
    }

    pub fn page_loaded(&self) -> bool {
        self.page_loaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::testing;
    use mockito::Server;

    async fn loaded(server: &mut mockito::ServerGuard) -> (AppState, TagsController) {
        server
            .mock("GET", "/api/tags/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"name": "beach", "numPhotos": 2},
                    {"name": "sun", "numPhotos": 9},
                    {"name": "alps", "numPhotos": 4}]"#,
            )
            .create_async()
            .await;
        let state = testing::state(server.url());
        let mut controller = TagsController::new(&state);
        controller.load().await.unwrap();
        (state, controller)
    }

    fn names(controller: &TagsController) -> Vec<&str> {
        controller.tags().iter().map(|t| t.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_default_order_is_most_photos_first() {
        let mut server = Server::new_async().await;
        let (_, controller) = loaded(&mut server).await;
        assert!(controller.page_loaded());
        assert_eq!(names(&controller), vec!["sun", "alps", "beach"]);
    }

    #[tokio::test]
    async fn test_order_by_name() {
        let mut server = Server::new_async().await;
        let (_, mut controller) = loaded(&mut server).await;
        controller.order_tags("name");
        assert_eq!(names(&controller), vec!["alps", "beach", "sun"]);
        controller.order_tags("-name");
        assert_eq!(names(&controller), vec!["sun", "beach", "alps"]);
    }

    #[tokio::test]
    async fn test_search_by_tag() {
        let mut server = Server::new_async().await;
        let (state, controller) = loaded(&mut server).await;
        controller.do_search("alps");
        assert_eq!(state.navigator.current(), Route::Search("alps".into()));
    }
}
