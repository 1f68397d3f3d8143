mod adapters;
mod application;
mod domain;
mod services;

#[cfg(test)]
mod test_utils;

use std::sync::Arc;

use adapters::{routes::build_router, state::AppState};
use domain::config::{global::GlobalConfig, local::LocalConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "upload_service=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let local_config = LocalConfig::from_env().expect("ERROR: Invalid server configuration");
    let global_config = GlobalConfig::from_env().expect("ERROR: Invalid upload configuration");

    tracing::info!(
        "Starting {} (chunk size {} bytes, max upload {} bytes)",
        local_config.server_name,
        global_config.chunk_size,
        global_config.max_size
    );

    let storage_service = services::create_storage_service(&local_config.storage_dir)
        .await
        .expect("ERROR: Failed to prepare storage directory. Check STORAGE_DIR and permissions.");

    let bind_address = local_config.bind_address();

    let app_state = AppState {
        local_config: Arc::new(local_config),
        global_config: Arc::new(global_config),
        storage_service,
    };

    let router = build_router(app_state);

    // Start the server
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .expect("Failed to bind to port");

    tracing::info!("Server listening on {}", bind_address);

    axum::serve(listener, router)
        .await
        .expect("Failed to start server");
}
