//! Bazaar configuration
//!
//! Lookup order for the config file:
//!
//! 1. explicit path (`--config`)
//! 2. `$BAZAAR_CONFIG`
//! 3. `<config_dir>/bazaar/config.yaml`
//!
//! A missing file is not an error; defaults apply. `BAZAAR_HOST`,
//! `BAZAAR_PORT` and `BAZAAR_DATA_DIR` override whatever the file says.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Result type for bazaar-config operations
pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid value for {key}: {value}")]
    InvalidOverride { key: String, value: String },
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Where user-local state (favorites) lives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub favorites_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .map(|d| d.join("bazaar"))
            .unwrap_or_else(|| PathBuf::from(".bazaar"));
        Self {
            data_dir,
            favorites_file: "favorites.json".to_string(),
        }
    }
}

impl StorageConfig {
    pub fn favorites_path(&self) -> PathBuf {
        self.data_dir.join(&self.favorites_file)
    }
}

/// Keyword suggestion provider settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestConfig {
    pub endpoint: String,
    pub model: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.anthropic.com/v1/messages".to_string(),
            model: "claude-3-5-haiku-20241022".to_string(),
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            max_tokens: 512,
            timeout_secs: 30,
        }
    }
}

/// Catalog source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON array of listings; the built-in sample data is used when unset
    pub seed_path: Option<PathBuf>,
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BazaarConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub suggest: SuggestConfig,
    pub catalog: CatalogConfig,
}

impl BazaarConfig {
    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("bazaar").join("config.yaml"))
    }

    /// Resolve the file to read, load it, then apply environment overrides
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os("BAZAAR_CONFIG").map(PathBuf::from))
            .or_else(Self::default_path);

        let mut config = match path {
            Some(p) if p.exists() => Self::from_file(&p)?,
            Some(p) => {
                tracing::debug!("No config at {}, using defaults", p.display());
                Self::default()
            }
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply `BAZAAR_*` overrides read through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("BAZAAR_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("BAZAAR_PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidOverride {
                key: "BAZAAR_PORT".to_string(),
                value: port.clone(),
            })?;
        }
        if let Some(dir) = lookup("BAZAAR_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(dir);
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> std::result::Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}
