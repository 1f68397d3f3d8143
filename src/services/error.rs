use std::io;

use thiserror::Error;

use crate::application::error::ApplicationError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid file name: '{0}'")]
    InvalidName(String),

    #[error("Unsupported file format '{extension}', allowed: {allowed}")]
    UnsupportedFormat { extension: String, allowed: String },

    #[error("Transfer interrupted: {0}")]
    TransferInterrupted(#[source] io::Error),

    #[error("Storage root error: {0}")]
    Io(#[from] io::Error),
}

impl From<StorageError> for ApplicationError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::InvalidName(_) => ApplicationError::BadRequest(error.to_string()),
            StorageError::UnsupportedFormat { .. } => {
                ApplicationError::UnsupportedFormat(error.to_string())
            }
            StorageError::TransferInterrupted(_) => {
                ApplicationError::TransferInterrupted(error.to_string())
            }
            StorageError::Io(e) => ApplicationError::InternalError(format!("Storage error: {}", e)),
        }
    }
}
