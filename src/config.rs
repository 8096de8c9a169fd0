//! API Configuration

use serde::{Deserialize, Serialize};

/// Environment variable naming the config file
pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";
/// Environment variable overriding the bind address
pub const BIND_ENV: &str = "VIBEPULSE_BIND";

pub const DEFAULT_CONFIG_PATH: &str = "vibepulse.json";

/// API configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Listen address
    pub bind_addr: String,
    /// Page size used when the request omits `pageSize`
    pub default_page_size: usize,
    /// Largest accepted `pageSize`
    pub max_page_size: usize,
    /// Load seed data into an empty store
    pub seed_on_request: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8787".into(),
            default_page_size: 10,
            max_page_size: 100,
            seed_on_request: true,
        }
    }
}

impl ApiConfig {
    /// Load from file
    pub fn load(path: &str) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Apply environment overrides on top of file values
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(bind) = std::env::var(BIND_ENV) {
            self.bind_addr = bind;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: ApiConfig = serde_json::from_str(r#"{"max_page_size": 25}"#).unwrap();
        assert_eq!(config.max_page_size, 25);
        assert_eq!(config.default_page_size, 10);
        assert!(config.seed_on_request);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("vibepulse-config-{}.json", std::process::id()));
        let path = path.to_string_lossy().to_string();
        let config = ApiConfig {
            bind_addr: "0.0.0.0:9000".into(),
            ..Default::default()
        };

        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
        assert_eq!(ApiConfig::load(&path).unwrap(), config);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file() {
        assert!(ApiConfig::load("/nonexistent/vibepulse.json").is_err());
    }
}
