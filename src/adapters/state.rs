use axum::extract::FromRef;
use std::sync::Arc;

use crate::{
    application::services::StorageService,
    domain::config::{global::GlobalConfig, local::LocalConfig},
};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub local_config: Arc<LocalConfig>,
    pub global_config: Arc<GlobalConfig>,
    pub storage_service: Arc<dyn StorageService>,
}
