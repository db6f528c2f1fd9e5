//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{DocprocError, Result};

/// Environment variable overriding [`DrugInfoConfig::base_url`].
pub const ENV_DRUG_API_URL: &str = "DOCPROC_DRUG_API_URL";

/// Environment variable overriding [`ServerConfig::bind`].
pub const ENV_BIND: &str = "DOCPROC_BIND";

/// Main configuration for the docproc pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocprocConfig {
    /// Batch dispatcher configuration.
    pub dispatcher: DispatcherConfig,

    /// Drug label lookup configuration.
    pub drug_info: DrugInfoConfig,

    /// HTTP server configuration.
    pub server: ServerConfig,
}

/// Batch dispatcher configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Number of extraction tasks allowed to run at once.
    pub workers: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self { workers: 4 }
    }
}

/// Drug label API configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrugInfoConfig {
    /// Perform network lookups. When disabled every prescription gets the sentinel.
    pub enabled: bool,

    /// Drug label endpoint; the drug name is sent as the `search` query parameter.
    pub base_url: String,

    /// Connect and read timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for DrugInfoConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://api.fda.gov/drug/label.json".to_string(),
            timeout_secs: 5,
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address.
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:5000".to_string(),
        }
    }
}

impl DocprocConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(mut self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok());
        self
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_DRUG_API_URL).filter(|v| !v.is_empty()) {
            self.drug_info.base_url = url;
        }
        if let Some(bind) = lookup(ENV_BIND).filter(|v| !v.is_empty()) {
            self.server.bind = bind;
        }
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.dispatcher.workers == 0 {
            return Err(DocprocError::Config(
                "dispatcher.workers must be at least 1".to_string(),
            ));
        }
        if self.drug_info.base_url.trim().is_empty() {
            return Err(DocprocError::Config(
                "drug_info.base_url must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = DocprocConfig::default();
        assert_eq!(config.dispatcher.workers, 4);
        assert_eq!(config.drug_info.timeout_secs, 5);
        assert!(config.drug_info.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: DocprocConfig =
            serde_json::from_str(r#"{"dispatcher": {"workers": 2}}"#).unwrap();
        assert_eq!(config.dispatcher.workers, 2);
        assert_eq!(config.drug_info, DrugInfoConfig::default());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = DocprocConfig::default();
        config.apply_overrides(|key| match key {
            ENV_DRUG_API_URL => Some("http://127.0.0.1:9000/label.json".to_string()),
            ENV_BIND => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.drug_info.base_url, "http://127.0.0.1:9000/label.json");
        assert_eq!(config.server.bind, "0.0.0.0:5000");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = DocprocConfig::default();
        config.dispatcher.workers = 8;
        config.save(&path).unwrap();

        assert_eq!(DocprocConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let mut config = DocprocConfig::default();
        config.dispatcher.workers = 0;
        assert!(matches!(config.validate(), Err(DocprocError::Config(_))));
    }
}
