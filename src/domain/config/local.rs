use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{env_or, env_string, split_list, ConfigError};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LocalConfig {
    #[serde(rename = "serverName")]
    pub server_name: String,
    pub host: String,
    pub port: u16,
    #[serde(rename = "storageDir")]
    pub storage_dir: PathBuf,
    /// Empty means any origin is accepted.
    #[serde(rename = "corsAllowedOrigins")]
    pub cors_allowed_origins: Vec<String>,
}

impl LocalConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let storage_dir = env_string("STORAGE_DIR", &defaults.storage_dir.to_string_lossy());
        if storage_dir.trim().is_empty() {
            return Err(ConfigError::Empty { key: "STORAGE_DIR" });
        }

        Ok(Self {
            server_name: env_string("SERVER_NAME", &defaults.server_name),
            host: env_string("HOST", &defaults.host),
            port: env_or("PORT", defaults.port)?,
            storage_dir: PathBuf::from(storage_dir),
            cors_allowed_origins: split_list(&env_string("CORS_ALLOWED_ORIGINS", "")),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            server_name: "upload-service".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8000,
            storage_dir: PathBuf::from("uploads"),
            cors_allowed_origins: Vec::new(),
        }
    }
}
