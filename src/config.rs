//! Application configuration.
//!
//! Resolved as built-in defaults, then an optional JSON file, then
//! environment variables. `.env` is loaded by the binary before this runs.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the analysis backend (`{base}/analyze`).
    pub api_base_url: String,
    #[serde(skip_serializing)]
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    /// Listen address for the web adapter.
    pub bind_addr: String,
    /// Request body limit for uploads through the web adapter.
    pub max_upload_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl AppConfig {
    /// Defaults, optionally overlaid by `path`, then by the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {:?}", path))?;
        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {:?}", path))?;
        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Apply environment-style overrides from `lookup`. Empty values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get("API_BASE_URL") {
            self.api_base_url = url;
        }
        if let Some(key) = get("GEMINI_API_KEY").or_else(|| get("API_KEY")) {
            self.gemini_api_key = Some(key);
        }
        if let Some(model) = get("GEMINI_MODEL") {
            self.gemini_model = model;
        }
        if let Some(url) = get("GEMINI_BASE_URL") {
            self.gemini_base_url = url;
        }
        if let Some(addr) = get("WEB_BIND_ADDR") {
            self.bind_addr = addr;
        }
        if let Some(limit) = get("MAX_UPLOAD_BYTES") {
            self.max_upload_bytes = limit
                .trim()
                .parse()
                .with_context(|| format!("MAX_UPLOAD_BYTES is not a byte count: {}", limit))?;
        }

        debug!(
            "Config resolved: api_base_url={} gemini_model={} gemini_key_set={}",
            self.api_base_url,
            self.gemini_model,
            self.gemini_api_key.is_some()
        );
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::default().with_overrides(lookup(&[])).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:3000");
        assert_eq!(config.gemini_model, "gemini-2.5-flash");
        assert!(config.gemini_api_key.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::default()
            .with_overrides(lookup(&[
                ("API_BASE_URL", "https://api.example.com"),
                ("API_KEY", "legacy-key"),
                ("MAX_UPLOAD_BYTES", "1024"),
                ("GEMINI_MODEL", ""),
            ]))
            .unwrap();
        assert_eq!(config.api_base_url, "https://api.example.com");
        assert_eq!(config.gemini_api_key.as_deref(), Some("legacy-key"));
        assert_eq!(config.max_upload_bytes, 1024);
        assert_eq!(config.gemini_model, DEFAULT_GEMINI_MODEL);
    }

    #[test]
    fn test_gemini_key_preferred_over_api_key() {
        let config = AppConfig::default()
            .with_overrides(lookup(&[("API_KEY", "old"), ("GEMINI_API_KEY", "new")]))
            .unwrap();
        assert_eq!(config.gemini_api_key.as_deref(), Some("new"));
    }

    #[test]
    fn test_bad_upload_limit() {
        let result = AppConfig::default().with_overrides(lookup(&[("MAX_UPLOAD_BYTES", "lots")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_file_overlay_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"api_base_url": "http://analysis.internal:9000"}}"#).unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.api_base_url, "http://analysis.internal:9000");
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
    }
}
