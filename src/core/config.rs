use crate::core::period::Period;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Deserialize, Serialize, Clone)]
pub struct HttpBackendConfig {
    pub base_url: String,
    pub token: Option<String>,
}

impl std::fmt::Debug for HttpBackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpBackendConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FileBackendConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct BackendConfig {
    pub http: Option<HttpBackendConfig>,
    pub file: Option<FileBackendConfig>,
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default)]
    pub default_period: Period,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "fintally", "fintally")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
backend:
  http:
    base_url: "http://localhost:8080/api"
    token: "secret"
currency_symbol: "$"
default_period: daily
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        let http = config.backend.http.expect("Expected an http backend");
        assert_eq!(http.base_url, "http://localhost:8080/api");
        assert_eq!(http.token.as_deref(), Some("secret"));
        assert!(config.backend.file.is_none());
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.default_period, Period::Daily);
    }

    #[test]
    fn test_debug_output_hides_token() {
        let config = AppConfig {
            backend: BackendConfig {
                http: Some(HttpBackendConfig {
                    base_url: "http://localhost:8080/api".to_string(),
                    token: Some("s3cr3t-token".to_string()),
                }),
                file: None,
            },
            currency_symbol: "$".to_string(),
            default_period: Period::Monthly,
        };

        let output = format!("{config:#?}");

        assert!(!output.contains("s3cr3t-token"));
        assert!(output.contains("<redacted>"));
        assert!(output.contains("http://localhost:8080/api"));
    }

    #[test]
    fn test_config_defaults() {
        let yaml_str = r#"
backend:
  file:
    path: "/tmp/entries.json"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(
            config.backend.file.map(|f| f.path),
            Some("/tmp/entries.json".to_string())
        );
        assert!(config.backend.http.is_none());
        assert_eq!(config.currency_symbol, "₹");
        assert_eq!(config.default_period, Period::Monthly);
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let result = AppConfig::load_from_path("/nonexistent/fintally/config.yaml");
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }
}
