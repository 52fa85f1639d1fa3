//! # Client configuration: `catalog.toml`
//!
//! Defines the TOML file that tells the client where the catalog service
//! lives and which storage slot holds the session
//! (filename: [`CatalogConfig::filename`] = `"catalog.toml"`).
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8000"   # origin of the catalog service
//!
//! [session]
//! key = "session"                      # key-value slot for the session record
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`CatalogConfig`] | Top-level config. Builder helper (`with_base_url`), TOML (de)serialisation, file loading. |
//! | [`ApiConfig`] | Remote service section: `base_url`, default **`http://localhost:8000`**. |
//! | [`SessionConfig`] | Session section: slot `key`, default **`"session"`**. |
//!
//! All structs implement `Default`, so a missing or empty config file is
//! equivalent to the default configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::session::DEFAULT_SESSION_KEY;

/// Origin assumed when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Errors raised while loading `catalog.toml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration stored in `catalog.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Remote service configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Origin of the catalog service, without trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Session persistence configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_key")]
    pub key: String,
}

fn default_session_key() -> String {
    DEFAULT_SESSION_KEY.to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            key: default_session_key(),
        }
    }
}

impl CatalogConfig {
    /// Builder method to point the client at another origin.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "catalog.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load from `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Self::from_toml(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.display().to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = CatalogConfig::from_toml("").unwrap();
        assert_eq!(config, CatalogConfig::default());
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.session.key, "session");
    }

    #[test]
    fn test_partial_file() {
        let config =
            CatalogConfig::from_toml("[api]\nbase_url = \"https://catalog.example\"\n").unwrap();
        assert_eq!(config.api.base_url, "https://catalog.example");
        assert_eq!(config.session.key, "session");
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = CatalogConfig::default().with_base_url("http://10.0.0.2:9000/");
        assert_eq!(config.api.base_url, "http://10.0.0.2:9000");
        let parsed = CatalogConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("data_catalog_no_such_config.toml");
        let config = CatalogConfig::load(&path).unwrap();
        assert_eq!(config, CatalogConfig::default());
    }

    #[test]
    fn test_load_invalid_file() {
        let path = std::env::temp_dir().join(format!(
            "data_catalog_bad_config_{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[api\nbase_url = 1").unwrap();
        assert!(matches!(CatalogConfig::load(&path), Err(ConfigError::Parse(_))));
        let _ = std::fs::remove_file(&path);
    }
}
