mod error;
mod local_storage;

pub use error::StorageError;
pub use local_storage::LocalStorageService;

use std::{path::Path, sync::Arc};

use crate::application::services::StorageService;

/// Creates the storage root if needed and returns the service writing into it.
pub async fn create_storage_service(
    storage_dir: &Path,
) -> Result<Arc<dyn StorageService>, StorageError> {
    let service = LocalStorageService::open(storage_dir).await?;
    Ok(Arc::new(service))
}
