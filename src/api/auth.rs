use std::sync::Arc;

use http::Method;

use super::client::{ApiClient, ApiResponse};
use super::endpoint::Endpoint;
use super::form::FormData;
use crate::errors::ApiError;
use crate::interceptors::AUTH_TOKEN_HEADER;
use crate::models::SessionInfo;

const SESSION: Endpoint = Endpoint::new(Method::GET, "/api/auth/");
const LOGIN: Endpoint = Endpoint::new(Method::POST, "/api/auth/");
const LOGOUT: Endpoint = Endpoint::new(Method::DELETE, "/api/auth/");
const RECOVER_PASSWORD: Endpoint = Endpoint::new(Method::PUT, "/api/auth/recoverpass");
const CHANGE_PASSWORD: Endpoint = Endpoint::new(Method::PUT, "/api/auth/changepass");

/// Session info plus the token the backend issued with it, if any.
#[derive(Debug, Clone)]
pub struct AuthResponse {
    pub info: SessionInfo,
    pub token: Option<String>,
}

impl AuthResponse {
    pub(crate) fn from_response(response: &ApiResponse) -> Result<Self, ApiError> {
        let info: Option<SessionInfo> = response.json()?;
        Ok(Self {
            info: info.unwrap_or_default(),
            token: response.header(AUTH_TOKEN_HEADER),
        })
    }
}

pub struct AuthClient {
    api: Arc<ApiClient>,
}

impl AuthClient {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Who the backend thinks we are.
    pub async fn session_info(&self) -> Result<SessionInfo, ApiError> {
        let info: Option<SessionInfo> = self.api.call_json(&SESSION, &[], &[], None).await?;
        Ok(info.unwrap_or_default())
    }

    pub async fn login(&self, identifier: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let payload = FormData::new()
            .field("identifier", identifier)
            .field("password", password);
        let response = self.api.call(&LOGIN, &[], &[], Some(payload)).await?;
        AuthResponse::from_response(&response)
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        self.api.call(&LOGOUT, &[], &[], None).await?;
        Ok(())
    }

    /// Ask the backend to mail a recovery code. Returns the backend's message.
    pub async fn recover_password(&self, email: &str) -> Result<String, ApiError> {
        let payload = FormData::new().field("email", email);
        let response = self
            .api
            .call(&RECOVER_PASSWORD, &[], &[], Some(payload))
            .await?;
        Ok(response.text())
    }

    /// Change the password, either as the logged-in user or with a recovery
    /// code from the reset mail.
    pub async fn change_password(
        &self,
        password: &str,
        code: Option<&str>,
    ) -> Result<String, ApiError> {
        let payload = FormData::new()
            .field("password", password)
            .field("code", code.unwrap_or_default());
        let response = self
            .api
            .call(&CHANGE_PASSWORD, &[], &[], Some(payload))
            .await?;
        Ok(response.text())
    }
}
