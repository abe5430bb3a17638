use std::path::Path;

use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::api::{AlertConfig, ApiConfig};
use super::logging::LoggingConfig;
use super::store::StoreConfig;
use crate::errors::ConfigError;

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0: backend, token store, alerts and logging.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ConfigV1 {
    pub api: ApiConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub alerts: AlertConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConfigV1 {
    /// A config pointing at `base_url` with every other section defaulted.
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiConfig::new(base_url),
            store: StoreConfig::default(),
            alerts: AlertConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.api.page_size == 0 {
            return Err(ConfigError::Invalid("api.page_size must be > 0".into()));
        }
        reqwest::Url::parse(&self.api.base_url)
            .map_err(|e| ConfigError::Invalid(format!("api.base_url: {}", e)))?;
        Ok(self)
    }
}

/// Load config from a YAML file, with `PHOTOSHARE_`-prefixed environment
/// variables overriding it (nested keys split on `__`).
pub fn load_config(path: &Path) -> Result<ConfigV1, ConfigError> {
    let figment = Figment::new()
        .merge(Yaml::file(path))
        .merge(Env::prefixed("PHOTOSHARE_").split("__"));
    extract(figment)
}

/// Parse config from an in-memory YAML document.
pub fn parse_config(yaml: &str) -> Result<ConfigV1, ConfigError> {
    extract(Figment::new().merge(Yaml::string(yaml)))
}

fn extract(figment: Figment) -> Result<ConfigV1, ConfigError> {
    let config = figment
        .extract::<Config>()
        .map_err(|e| ConfigError::Load(e.to_string()))?;
    match config {
        Config::ConfigV1(c) => c.validate(),
    }
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() -> Result<(), ConfigError> {
    let schema = schema_for!(Config);
    let rendered =
        serde_json::to_string_pretty(&schema).map_err(|e| ConfigError::Load(e.to_string()))?;
    println!("{}", rendered);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_CONFIG: &str = r#"
version: "1.0.0"
api:
  base_url: "http://localhost:5000"
  page_size: 10
store:
  type: file
  path: /tmp/photoshare.json
logging:
  level: debug
  format: json
"#;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(TEST_CONFIG).expect("config should parse");
        assert_eq!(config.api.page_size, 10);
        assert_eq!(config.api.timeout_in_ms, 30_000);
        assert_eq!(config.alerts.dismiss_after_ms, 3000);
        assert_eq!(config.logging.level, "debug");
        match config.store {
            StoreConfig::File(f) => assert_eq!(f.path.to_str(), Some("/tmp/photoshare.json")),
            StoreConfig::Memory => panic!("expected a file store"),
        }
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = parse_config(
            r#"
version: "1.0.0"
api:
  base_url: "http://localhost:5000"
"#,
        )
        .expect("config should parse");
        assert_eq!(config.api.page_size, 20);
        assert!(matches!(config.store, StoreConfig::Memory));
        assert_eq!(config.logging.format, "console");
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        let result = parse_config(
            r#"
version: "2.0.0"
api:
  base_url: "http://localhost:5000"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let result = parse_config(
            r#"
version: "1.0.0"
api:
  base_url: "http://localhost:5000"
  page_size: 0
"#,
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
