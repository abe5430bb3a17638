use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use http::{header, HeaderMap, HeaderValue, StatusCode};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::endpoint::Endpoint;
use super::form::{EncodedBody, FormData};
use crate::config::ApiConfig;
use crate::errors::ApiError;
use crate::interceptors::error_interceptor::{FORBIDDEN_MESSAGE, GENERIC_ERROR_MESSAGE};
use crate::interceptors::{ErrorOutcome, Interceptor, ResponseBody, ResponseParts};

/// A successful response, with the body already read.
#[derive(Debug)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: ResponseBody,
}

impl ApiResponse {
    /// Decode the body as JSON. An empty body decodes as `null`, which lets
    /// callers ask for `()` or `Option<T>`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        let value = match &self.body {
            ResponseBody::Empty => Value::Null,
            ResponseBody::Json(value) => value.clone(),
            ResponseBody::Text(text) => serde_json::from_str(text)
                .map_err(|e| ApiError::Decode(format!("expected JSON body: {}", e)))?,
        };
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    pub fn text(&self) -> String {
        match &self.body {
            ResponseBody::Empty => String::new(),
            ResponseBody::Text(text) => text.clone(),
            ResponseBody::Json(value) => value.to_string(),
        }
    }
}

/// Sends requests through the interceptor chain.
///
/// Request hooks run in registration order, response hooks in reverse.
/// Every non-2xx answer comes back as an `ApiError` once the error hooks
/// have had their say. Nothing is retried.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl ApiClient {
    pub fn new(
        config: &ApiConfig,
        interceptors: Vec<Arc<dyn Interceptor>>,
    ) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::Template(format!("invalid base url: {}", e)))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_in_ms))
            .build()
            .map_err(|e| ApiError::Request(format!("HTTP client build failed: {}", e)))?;
        Ok(Self {
            http,
            base_url,
            interceptors,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn call(
        &self,
        endpoint: &Endpoint,
        params: &[(&str, &str)],
        query: &[(&str, String)],
        payload: Option<FormData>,
    ) -> Result<ApiResponse, ApiError> {
        let url = endpoint.url(&self.base_url, params, query)?;

        let mut headers = HeaderMap::new();
        for interceptor in &self.interceptors {
            interceptor.request(&mut headers);
        }

        let mut request = self.http.request(endpoint.method.clone(), url.clone());
        if let Some(payload) = payload {
            request = match payload.encode()? {
                EncodedBody::Json(value) => {
                    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
                    request.json(&value)
                }
                EncodedBody::Multipart(form) => request.multipart(form),
            };
        }

        debug!("{} {}", endpoint.method, url);
        let response = request.headers(headers).send().await?;

        let status = response.status();
        let headers = response.headers().clone();
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let raw = response.text().await?;
        let body = ResponseBody::from_raw(content_type.as_deref(), raw);

        let parts = ResponseParts {
            status,
            headers: &headers,
            body: &body,
        };
        for interceptor in self.interceptors.iter().rev() {
            interceptor.response(&parts);
        }

        if status.is_success() {
            return Ok(ApiResponse {
                status,
                headers,
                body,
            });
        }

        for interceptor in self.interceptors.iter().rev() {
            match interceptor.response_error(&parts) {
                ErrorOutcome::Ignored => {}
                outcome => debug!(
                    "Interceptor '{}' handled {} from {}: {:?}",
                    interceptor.get_name(),
                    status,
                    url,
                    outcome
                ),
            }
        }
        warn!("{} {} failed with status {}", endpoint.method, url, status);
        Err(error_from_response(&parts))
    }

    pub async fn call_json<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        params: &[(&str, &str)],
        query: &[(&str, String)],
        payload: Option<FormData>,
    ) -> Result<T, ApiError> {
        self.call(endpoint, params, query, payload).await?.json()
    }
}

/// Map a failed response onto the error taxonomy.
pub fn error_from_response(response: &ResponseParts<'_>) -> ApiError {
    let text = response.body.text().map(|t| t.trim().to_string());
    match response.status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
        StatusCode::NOT_FOUND => ApiError::NotFound,
        StatusCode::FORBIDDEN => ApiError::Forbidden {
            message: text.unwrap_or_else(|| FORBIDDEN_MESSAGE.to_string()),
        },
        StatusCode::PAYLOAD_TOO_LARGE => ApiError::PayloadTooLarge,
        StatusCode::BAD_REQUEST if response.body.validation_errors().is_some() => {
            let errors: HashMap<String, String> = response
                .body
                .validation_errors()
                .into_iter()
                .flatten()
                .map(|(field, reason)| {
                    let reason = reason
                        .as_str()
                        .map(str::to_string)
                        .unwrap_or_else(|| reason.to_string());
                    (field.clone(), reason)
                })
                .collect();
            ApiError::Validation { errors }
        }
        status => ApiError::Status {
            status: status.as_u16(),
            message: text.unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::Alerts;
    use crate::interceptors::{AuthInterceptor, ErrorInterceptor, AUTH_TOKEN_HEADER};
    use crate::navigation::{Navigator, Route};
    use crate::store::{MemoryStore, TokenStore};
    use http::Method;
    use mockito::{Matcher, Server};

    const PHOTO: Endpoint = Endpoint::new(Method::GET, "/api/photos/{id}");

    struct Harness {
        client: ApiClient,
        storage: Arc<MemoryStore>,
        navigator: Navigator,
        alerts: Alerts,
    }

    fn harness(url: String, token: Option<&str>) -> Harness {
        let storage = Arc::new(token.map(MemoryStore::with_token).unwrap_or_default());
        let navigator = Navigator::new();
        let alerts = Alerts::new(Duration::from_secs(3));
        let interceptors: Vec<Arc<dyn Interceptor>> = vec![
            Arc::new(AuthInterceptor::new(
                storage.clone(),
                Arc::new(MemoryStore::new()),
            )),
            Arc::new(ErrorInterceptor::new(navigator.clone(), alerts.clone())),
        ];
        let client = ApiClient::new(&ApiConfig::new(url), interceptors).unwrap();
        Harness {
            client,
            storage,
            navigator,
            alerts,
        }
    }

    #[tokio::test]
    async fn test_token_header_is_sent() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/api/photos/1")
            .match_header(AUTH_TOKEN_HEADER, "secret")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": 1, "title": "t"}"#)
            .create_async()
            .await;

        let h = harness(server.url(), Some("secret"));
        let photo: crate::models::Photo = h
            .client
            .call_json(&PHOTO, &[("id", "1")], &[], None)
            .await
            .unwrap();
        m.assert_async().await;
        assert_eq!(photo.id, 1);
    }

    #[tokio::test]
    async fn test_no_token_header_without_token() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/api/photos/1")
            .match_header(AUTH_TOKEN_HEADER, Matcher::Missing)
            .with_status(200)
            .with_body(r#"{"id": 1}"#)
            .create_async()
            .await;

        let h = harness(server.url(), None);
        let result = h.client.call(&PHOTO, &[("id", "1")], &[], None).await;
        m.assert_async().await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_unauthorized_redirects_and_rejects() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/photos/1")
            .with_status(401)
            .create_async()
            .await;

        let h = harness(server.url(), None);
        h.navigator.go(Route::Detail(1));
        let result = h.client.call(&PHOTO, &[("id", "1")], &[], None).await;
        assert!(matches!(result, Err(ApiError::Unauthorized)));
        assert_eq!(h.navigator.current(), Route::Login);
        assert_eq!(h.navigator.last_login_url(), Some(Route::Detail(1)));
        assert_eq!(h.alerts.current(), None);
    }

    #[tokio::test]
    async fn test_not_found_rejects_silently() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/photos/9")
            .with_status(404)
            .with_body("Not Found")
            .create_async()
            .await;

        let h = harness(server.url(), None);
        let result = h.client.call(&PHOTO, &[("id", "9")], &[], None).await;
        assert!(matches!(result, Err(ApiError::NotFound)));
        assert_eq!(h.alerts.current(), None);
        assert_eq!(h.navigator.current(), Route::Front);
    }

    #[tokio::test]
    async fn test_validation_errors_are_collected() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/photos/1")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"errors": {"title": "Title is required"}}"#)
            .create_async()
            .await;

        let h = harness(server.url(), None);
        match h.client.call(&PHOTO, &[("id", "1")], &[], None).await {
            Err(ApiError::Validation { errors }) => {
                assert_eq!(errors.get("title").map(String::as_str), Some("Title is required"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(h.alerts.current().is_some());
    }

    #[tokio::test]
    async fn test_server_error_message_from_text_body() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/photos/1")
            .with_status(500)
            .with_header("content-type", "text/plain")
            .with_body("database is down")
            .create_async()
            .await;

        let h = harness(server.url(), None);
        let result = h.client.call(&PHOTO, &[("id", "1")], &[], None).await;
        match result {
            Err(ApiError::Status { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "database is down");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(h.alerts.current().unwrap().message, "database is down");
    }

    #[tokio::test]
    async fn test_rotated_token_is_stored() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/photos/1")
            .with_status(200)
            .with_header(AUTH_TOKEN_HEADER, "rotated")
            .with_body(r#"{"id": 1}"#)
            .create_async()
            .await;

        let h = harness(server.url(), Some("old"));
        h.client.call(&PHOTO, &[("id", "1")], &[], None).await.unwrap();
        assert_eq!(h.storage.get().as_deref(), Some("rotated"));
    }

    #[tokio::test]
    async fn test_json_payload_content_type() {
        let mut server = Server::new_async().await;
        let endpoint = Endpoint::new(Method::PATCH, "/api/photos/{id}/title");
        let m = server
            .mock("PATCH", "/api/photos/3/title")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(serde_json::json!({"title": "New"})))
            .with_status(200)
            .create_async()
            .await;

        let h = harness(server.url(), None);
        let payload = FormData::new().field("title", "New");
        h.client
            .call(&endpoint, &[("id", "3")], &[], Some(payload))
            .await
            .unwrap();
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_transport_failure_is_request_error() {
        // Nothing listens on port 9 locally.
        let h = harness("http://127.0.0.1:9".to_string(), None);
        let result = h.client.call(&PHOTO, &[("id", "1")], &[], None).await;
        assert!(matches!(result, Err(ApiError::Request(_))));
    }
}
