//! Server Configuration
//!
//! Bind address, storage locations and upload limits. Loaded from a JSON
//! file in which every field is optional.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::media::DEFAULT_ALLOWED_EXTENSIONS;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config {0}: {1}")]
    Read(String, String),

    #[error("Invalid config JSON: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 5000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// JSON document holding every entry (default: "blogs.json")
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Directory for accepted uploads (default: "static/uploads")
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    /// Directory for static HTML snapshots (default: "sites")
    #[serde(default = "default_sites_dir")]
    pub sites_dir: PathBuf,

    /// Maximum request body size in bytes (default: 100 MiB)
    #[serde(default = "default_max_payload_bytes")]
    pub max_payload_bytes: usize,

    /// Upload extensions accepted, without the dot
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_data_file() -> PathBuf {
    PathBuf::from("blogs.json")
}

fn default_upload_dir() -> PathBuf {
    Path::new("static").join("uploads")
}

fn default_sites_dir() -> PathBuf {
    PathBuf::from("sites")
}

fn default_max_payload_bytes() -> usize {
    100 * 1024 * 1024
}

fn default_allowed_extensions() -> Vec<String> {
    DEFAULT_ALLOWED_EXTENSIONS.iter().map(|e| e.to_string()).collect()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_file: default_data_file(),
            upload_dir: default_upload_dir(),
            sites_dir: default_sites_dir(),
            max_payload_bytes: default_max_payload_bytes(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

impl ServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Default layout rooted at a base directory
    pub fn rooted_at(base: &Path) -> Self {
        Self {
            data_file: base.join(default_data_file()),
            upload_dir: base.join(default_upload_dir()),
            sites_dir: base.join(default_sites_dir()),
            ..Default::default()
        }
    }

    /// Load, normalize and validate a config file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.display().to_string(), e.to_string()))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let mut config: ServerConfig =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    fn normalize(&mut self) {
        for ext in &mut self.allowed_extensions {
            *ext = ext.trim().to_lowercase();
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_payload_bytes == 0 {
            return Err(ConfigError::Invalid("max_payload_bytes must be > 0".to_string()));
        }
        if self.allowed_extensions.is_empty() {
            return Err(ConfigError::Invalid(
                "allowed_extensions must not be empty".to_string(),
            ));
        }
        if let Some(bad) = self
            .allowed_extensions
            .iter()
            .find(|e| e.is_empty() || e.contains('.'))
        {
            return Err(ConfigError::Invalid(format!(
                "allowed_extensions entry '{}' must be a bare extension",
                bad
            )));
        }
        Ok(())
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.max_payload_bytes, 104_857_600);
        assert_eq!(config.allowed_extensions.len(), 7);
        assert_eq!(config.upload_dir, Path::new("static/uploads"));
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig::with_port(8080);
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = ServerConfig::from_json("{}").unwrap();
        assert_eq!(config.data_file, Path::new("blogs.json"));
        assert_eq!(config.sites_dir, Path::new("sites"));
    }

    #[test]
    fn test_extensions_normalized() {
        let config = ServerConfig::from_json(r#"{"allowed_extensions": [" PNG", "Webm"]}"#).unwrap();
        assert_eq!(config.allowed_extensions, vec!["png", "webm"]);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(matches!(
            ServerConfig::from_json(r#"{"max_payload_bytes": 0}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ServerConfig::from_json(r#"{"allowed_extensions": []}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ServerConfig::from_json(r#"{"allowed_extensions": [".png"]}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ServerConfig::from_json("{port: 1}"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = ServerConfig::load(&temp.path().join("absent.json"));
        assert!(matches!(result, Err(ConfigError::Read(_, _))));
    }

    #[test]
    fn test_rooted_at() {
        let config = ServerConfig::rooted_at(Path::new("/srv/blog"));
        assert_eq!(config.data_file, Path::new("/srv/blog/blogs.json"));
        assert_eq!(config.upload_dir, Path::new("/srv/blog/static/uploads"));
    }
}
