pub mod file;
pub mod http;
pub mod util;

use crate::core::FinanceBackend;
use crate::core::config::BackendConfig;
use anyhow::{Result, bail};
use tracing::debug;

/// Builds the backend selected in the config. HTTP wins when both are set.
pub fn from_config(config: &BackendConfig) -> Result<Box<dyn FinanceBackend + Send + Sync>> {
    if let Some(http) = &config.http {
        debug!("Using HTTP backend at {}", http.base_url);
        return Ok(Box::new(http::HttpBackend::new(
            &http.base_url,
            http.token.clone(),
        )));
    }
    if let Some(file) = &config.file {
        debug!("Using file backend at {}", file.path);
        return Ok(Box::new(file::FileBackend::new(&file.path)));
    }
    bail!("No backend configured; set backend.http or backend.file in the config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{FileBackendConfig, HttpBackendConfig};

    #[test]
    fn test_requires_a_backend() {
        let err = from_config(&BackendConfig::default()).err().unwrap();
        assert!(err.to_string().contains("No backend configured"));
    }

    #[test]
    fn test_builds_configured_backend() {
        let config = BackendConfig {
            http: Some(HttpBackendConfig {
                base_url: "http://localhost:1".to_string(),
                token: None,
            }),
            file: Some(FileBackendConfig {
                path: "entries.json".to_string(),
            }),
        };
        assert!(from_config(&config).is_ok());

        let config = BackendConfig {
            http: None,
            file: Some(FileBackendConfig {
                path: "entries.json".to_string(),
            }),
        };
        assert!(from_config(&config).is_ok());
    }
}
