use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Backend location and paging behaviour.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ApiConfig {
    /// Base URL of the backend, e.g. "http://localhost:5000".
    pub base_url: String,
    /// Number of photos the backend returns for a full page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Whole-request timeout handed to the HTTP client.
    #[serde(default = "default_timeout_in_ms")]
    pub timeout_in_ms: u64,
}

/// Alert display settings.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct AlertConfig {
    #[serde(default = "default_dismiss_after_ms")]
    pub dismiss_after_ms: u64,
}

fn default_page_size() -> usize {
    20
}

fn default_timeout_in_ms() -> u64 {
    30_000
}

fn default_dismiss_after_ms() -> u64 {
    3000
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            page_size: default_page_size(),
            timeout_in_ms: default_timeout_in_ms(),
        }
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            dismiss_after_ms: default_dismiss_after_ms(),
        }
    }
}
