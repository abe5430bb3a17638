use tracing::debug;

use crate::api::PhotoQuery;
use crate::errors::ApiError;
use crate::models::Photo;
use crate::navigation::Route;
use crate::state::AppState;

/// A photo list with infinite scroll.
///
/// Pages are requested one at a time. The first page shorter than the
/// configured page size ends the list and no further requests are made.
pub struct ListController {
    state: AppState,
    query: PhotoQuery,
    owner_name: Option<String>,
    photos: Vec<Photo>,
    stop_scrolling: bool,
    search_complete: bool,
    page_loaded: bool,
}

impl ListController {
    pub fn new(state: &AppState, route: &Route) -> Self {
        let mut query = PhotoQuery {
            page: 1,
            ..Default::default()
        };
        let mut owner_name = None;
        match route {
            Route::Front | Route::Popular => query.order_by = "votes".to_string(),
            Route::Tag(q) | Route::Search(q) => query.q = q.clone(),
            Route::Owner { id, name } => {
                query.owner_id = Some(*id);
                owner_name = Some(name.clone());
            }
            _ => {}
        }

        Self {
            state: state.clone(),
            query,
            owner_name,
            photos: Vec::new(),
            stop_scrolling: false,
            search_complete: false,
            page_loaded: false,
        }
    }

    /// Fetch the next page and append it. Returns how many photos arrived.
    ///
    /// The page counter only moves forward on success, so a failed page is
    /// requested again on the next call.
    pub async fn next_page(&mut self) -> Result<usize, ApiError> {
        if self.stop_scrolling {
            return Ok(0);
        }

        let photos = self.state.photos.list(&self.query).await?;
        let count = photos.len();
        debug!("Page {} returned {} photos", self.query.page, count);

        self.search_complete = true;
        self.page_loaded = true;
        if count < self.state.page_size() {
            self.stop_scrolling = true;
        }
        self.query.page += 1;
        self.photos.extend(photos);
        Ok(count)
    }

    pub fn get_detail(&self, photo: &Photo) {
        self.state.navigator.go(Route::Detail(photo.id));
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn search_query(&self) -> &str {
        &self.query.q
    }

    pub fn owner_name(&self) -> Option<&str> {
        self.owner_name.as_deref()
    }

    pub fn is_exhausted(&self) -> bool {
        self.stop_scrolling
    }

    pub fn search_complete(&self) -> bool {
        self.search_complete
    }

    pub fn page_loaded(&self) -> bool {
        self.page_loaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::testing;
    use mockito::{Matcher, Server};
    use serde_json::Value;

    fn page(start: i64, count: i64) -> String {
        let photos: Vec<Value> = (start..start + count)
            .map(|id| testing::photo_json(id, true, false, false))
            .collect();
        Value::Array(photos).to_string()
    }

    #[tokio::test]
    async fn test_scrolling_stops_after_short_page() {
        let mut server = Server::new_async().await;
        let first = server
            .mock("GET", "/api/photos/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("page".into(), "1".into()),
                Matcher::UrlEncoded("orderBy".into(), "votes".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(page(1, 20))
            .expect(1)
            .create_async()
            .await;
        let second = server
            .mock("GET", "/api/photos/")
            .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(page(21, 5))
            .expect(1)
            .create_async()
            .await;

        let state = testing::state(server.url());
        let mut controller = ListController::new(&state, &Route::Front);

        assert_eq!(controller.next_page().await.unwrap(), 20);
        assert!(!controller.is_exhausted());
        assert_eq!(controller.next_page().await.unwrap(), 5);
        assert!(controller.is_exhausted());

        // Exhausted: no more requests go out.
        assert_eq!(controller.next_page().await.unwrap(), 0);
        first.assert_async().await;
        second.assert_async().await;
        assert_eq!(controller.photos().len(), 25);
        assert!(controller.search_complete());
    }

    #[tokio::test]
    async fn test_owner_route_filters_by_owner() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/api/photos/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("page".into(), "1".into()),
                Matcher::UrlEncoded("ownerID".into(), "9".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"photos": [], "total": 0, "currentPage": 1, "numPages": 0}"#)
            .create_async()
            .await;

        let state = testing::state(server.url());
        let route = Route::Owner {
            id: 9,
            name: "zed".into(),
        };
        let mut controller = ListController::new(&state, &route);
        assert_eq!(controller.owner_name(), Some("zed"));

        controller.next_page().await.unwrap();
        m.assert_async().await;
        assert!(controller.is_exhausted());
        assert!(controller.photos().is_empty());
    }

    #[tokio::test]
    async fn test_failed_page_is_retried() {
        let mut server = Server::new_async().await;
        let failing = server
            .mock("GET", "/api/photos/")
            .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
            .with_status(500)
            .expect(1)
            .create_async()
            .await;

        let state = testing::state(server.url());
        let mut controller = ListController::new(&state, &Route::Search("sun".into()));
        assert_eq!(controller.search_query(), "sun");

        assert!(controller.next_page().await.is_err());
        failing.assert_async().await;
        assert!(!controller.page_loaded());

        failing.remove_async().await;
        let ok = server
            .mock("GET", "/api/photos/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("page".into(), "1".into()),
                Matcher::UrlEncoded("q".into(), "sun".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(page(1, 2))
            .create_async()
            .await;
        assert_eq!(controller.next_page().await.unwrap(), 2);
        ok.assert_async().await;
    }

    #[test]
    fn test_get_detail_navigates() {
        let state = testing::state("http://localhost:1".into());
        let controller = ListController::new(&state, &Route::Latest);
        controller.get_detail(&Photo {
            id: 12,
            ..Default::default()
        });
        assert_eq!(state.navigator.current(), Route::Detail(12));
    }
}
