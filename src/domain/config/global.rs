use std::{collections::BTreeSet, time::Duration};

use serde::{Deserialize, Serialize};

use super::{env_or, env_string, split_list, ConfigError};

const MIB: u64 = 1024 * 1024;

/// Upload policy shared by every request.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GlobalConfig {
    #[serde(rename = "chunkSize")]
    pub chunk_size: usize,
    /// Request body limit for the upload routes.
    #[serde(rename = "maxSize")]
    pub max_size: u64,
    #[serde(rename = "smallMaxSize")]
    pub small_max_size: u64,
    #[serde(rename = "smallUploadName")]
    pub small_upload_name: String,
    #[serde(rename = "imageExtensions")]
    pub image_extensions: BTreeSet<String>,
    #[serde(rename = "imagePrefix")]
    pub image_prefix: String,
    #[serde(rename = "demoTasks")]
    pub demo_tasks: usize,
    #[serde(rename = "demoTaskDelayMs")]
    pub demo_task_delay_ms: u64,
}

impl GlobalConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let chunk_size = env_or("UPLOAD_CHUNK_SIZE", defaults.chunk_size)?;
        if chunk_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "UPLOAD_CHUNK_SIZE",
                value: "0".to_string(),
            });
        }

        let image_extensions: BTreeSet<String> = match std::env::var("IMAGE_EXTENSIONS") {
            Ok(raw) => split_list(&raw)
                .into_iter()
                .map(|ext| ext.trim_start_matches('.').to_lowercase())
                .collect(),
            Err(_) => defaults.image_extensions.clone(),
        };
        if image_extensions.is_empty() {
            return Err(ConfigError::Empty {
                key: "IMAGE_EXTENSIONS",
            });
        }

        let small_upload_name = env_string("SMALL_UPLOAD_NAME", &defaults.small_upload_name);
        if small_upload_name.trim().is_empty() {
            return Err(ConfigError::Empty {
                key: "SMALL_UPLOAD_NAME",
            });
        }

        Ok(Self {
            chunk_size,
            max_size: env_or("MAX_UPLOAD_SIZE", defaults.max_size)?,
            small_max_size: env_or("SMALL_UPLOAD_MAX_SIZE", defaults.small_max_size)?,
            small_upload_name,
            image_extensions,
            image_prefix: env_string("IMAGE_PREFIX", &defaults.image_prefix),
            demo_tasks: env_or("DEMO_TASKS", defaults.demo_tasks)?,
            demo_task_delay_ms: env_or("DEMO_TASK_DELAY_MS", defaults.demo_task_delay_ms)?,
        })
    }

    pub fn demo_task_delay(&self) -> Duration {
        Duration::from_millis(self.demo_task_delay_ms)
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            chunk_size: MIB as usize,
            max_size: 4 * 1024 * MIB,
            small_max_size: 10 * MIB,
            small_upload_name: "quick_save.jpg".to_string(),
            image_extensions: ["jpg", "jpeg", "png", "gif"]
                .into_iter()
                .map(String::from)
                .collect(),
            image_prefix: "verified_".to_string(),
            demo_tasks: 5,
            demo_task_delay_ms: 1000,
        }
    }
}
