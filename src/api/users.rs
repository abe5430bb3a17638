use std::sync::Arc;

use http::Method;

use super::auth::AuthResponse;
use super::client::ApiClient;
use super::endpoint::Endpoint;
use super::form::FormData;
use crate::errors::ApiError;

const SIGNUP: Endpoint = Endpoint::new(Method::POST, "/api/auth/signup");

#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub struct UsersClient {
    api: Arc<ApiClient>,
}

impl UsersClient {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Register a new account. The backend logs the new user in straight away.
    pub async fn signup(&self, user: &NewUser) -> Result<AuthResponse, ApiError> {
        let payload = FormData::new()
            .field("name", user.name.clone())
            .field("email", user.email.clone())
            .field("password", user.password.clone());
        let response = self.api.call(&SIGNUP, &[], &[], Some(payload)).await?;
        AuthResponse::from_response(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::interceptors::AUTH_TOKEN_HEADER;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_signup_posts_json() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/api/auth/signup")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(serde_json::json!({
                "name": "bo",
                "email": "bo@example.com",
                "password": "pw"
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_header(AUTH_TOKEN_HEADER, "tok-bo")
            .with_body(r#"{"id": 2, "name": "bo", "isAdmin": false, "loggedIn": true}"#)
            .create_async()
            .await;

        let api = Arc::new(ApiClient::new(&ApiConfig::new(server.url()), vec![]).unwrap());
        let user = NewUser {
            name: "bo".into(),
            email: "bo@example.com".into(),
            password: "pw".into(),
        };
        let response = UsersClient::new(api).signup(&user).await.unwrap();
        m.assert_async().await;
        assert_eq!(response.info.id, Some(2));
        assert_eq!(response.token.as_deref(), Some("tok-bo"));
    }
}
