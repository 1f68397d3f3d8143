use std::io;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

use crate::{
    domain::models::file::{StoreOptions, StoredFile},
    services::StorageError,
};

/// Lazily produced, single-use sequence of upload chunks.
pub type ByteStream<'a> = BoxStream<'a, Result<Bytes, io::Error>>;

#[async_trait]
pub trait StorageService: Send + Sync {
    /// Persists `stream` under the sanitized form of `name_hint`.
    ///
    /// Either the whole stream ends up in the stored file, or no file is left
    /// behind. Name and extension checks run before anything is written.
    async fn store(
        &self,
        name_hint: &str,
        stream: ByteStream<'_>,
        options: &StoreOptions,
    ) -> Result<StoredFile, StorageError>;

    /// Display form of the storage location.
    fn location(&self) -> String;
}
