use std::sync::Arc;

use axum_test::TestServer;
use tempfile::TempDir;

use crate::{
    adapters::{routes::build_router, state::AppState},
    domain::config::{global::GlobalConfig, local::LocalConfig},
    services::create_storage_service,
};

pub fn create_test_config(storage_dir: &std::path::Path) -> (LocalConfig, GlobalConfig) {
    let local_config = LocalConfig {
        storage_dir: storage_dir.to_path_buf(),
        ..LocalConfig::default()
    };
    let global_config = GlobalConfig {
        chunk_size: 1024,
        max_size: 1024 * 1024,
        small_max_size: 64,
        demo_tasks: 3,
        demo_task_delay_ms: 100,
        ..GlobalConfig::default()
    };
    (local_config, global_config)
}

/// Router over a fresh temporary storage root. Keep the `TempDir` alive for
/// the duration of the test.
pub async fn create_test_app() -> (TestServer, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let (local_config, global_config) = create_test_config(dir.path());

    let storage_service = create_storage_service(&local_config.storage_dir)
        .await
        .unwrap();

    let app_state = AppState {
        local_config: Arc::new(local_config),
        global_config: Arc::new(global_config),
        storage_service,
    };

    let server = TestServer::new(build_router(app_state)).unwrap();
    (server, dir)
}
