use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};
use sysinfo::System;
use tracing::info;

use crate::adapters::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(rename = "serverName")]
    pub server_name: String,
    #[serde(rename = "storageRoot")]
    pub storage_root: String,
    pub config: HealthConfigInfo,
    pub metrics: SystemMetrics,
}

#[derive(Debug, Serialize)]
pub struct SystemMetrics {
    #[serde(rename = "cpuUsagePercent")]
    pub cpu_usage_percent: f32,
    #[serde(rename = "memoryUsedBytes")]
    pub memory_used_bytes: u64,
    #[serde(rename = "memoryTotalBytes")]
    pub memory_total_bytes: u64,
    #[serde(rename = "memoryUsagePercent")]
    pub memory_usage_percent: f32,
}

#[derive(Debug, Serialize)]
pub struct HealthConfigInfo {
    #[serde(rename = "chunkSize")]
    pub chunk_size: usize,
    #[serde(rename = "maxSize")]
    pub max_size: u64,
    #[serde(rename = "smallMaxSize")]
    pub small_max_size: u64,
    #[serde(rename = "imageExtensions")]
    pub image_extensions: Vec<String>,
}

pub struct HealthController;

impl HealthController {
    /// GET /
    pub async fn hello_world() -> Json<Value> {
        Json(json!({ "Hello": "World" }))
    }

    /// GET /api/v1/health
    pub async fn health_check(State(app_state): State<AppState>) -> Json<HealthResponse> {
        info!("Health check requested");

        let global_config = &app_state.global_config;
        let config_info = HealthConfigInfo {
            chunk_size: global_config.chunk_size,
            max_size: global_config.max_size,
            small_max_size: global_config.small_max_size,
            image_extensions: global_config.image_extensions.iter().cloned().collect(),
        };

        // Only refresh what is reported.
        let mut sys = System::new();
        sys.refresh_cpu_usage();
        sys.refresh_memory();

        let memory_used = sys.used_memory();
        let memory_total = sys.total_memory();
        let memory_usage_percent = if memory_total > 0 {
            (memory_used as f32 / memory_total as f32) * 100.0
        } else {
            0.0
        };

        Json(HealthResponse {
            status: "healthy".to_string(),
            server_name: app_state.local_config.server_name.clone(),
            storage_root: app_state.storage_service.location(),
            config: config_info,
            metrics: SystemMetrics {
                cpu_usage_percent: sys.global_cpu_usage(),
                memory_used_bytes: memory_used,
                memory_total_bytes: memory_total,
                memory_usage_percent,
            },
        })
    }
}
