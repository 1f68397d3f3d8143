use std::{
    io,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tokio::{
    fs::{self, File},
    io::{AsyncReadExt, AsyncWriteExt},
};
use tokio_util::io::StreamReader;
use tracing::{info, warn};

use crate::{
    application::services::{ByteStream, StorageService},
    domain::models::file::{FileName, StoreOptions, StoredFile},
    services::error::StorageError,
};

/// Stores uploads as flat files directly under a single root directory.
pub struct LocalStorageService {
    root: PathBuf,
}

impl LocalStorageService {
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        info!("Storage root ready at {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn write_stream(
        &self,
        destination: &Path,
        stream: ByteStream<'_>,
        chunk_size: usize,
    ) -> Result<u64, StorageError> {
        // Nothing exists yet if the open itself fails.
        let mut file = File::create(destination)
            .await
            .map_err(StorageError::TransferInterrupted)?;

        let written = match copy_chunks(&mut file, stream, chunk_size).await {
            Ok(()) => fs::metadata(destination).await.map(|m| m.len()),
            Err(e) => Err(e),
        };
        drop(file);

        match written {
            Ok(size) => Ok(size),
            Err(e) => {
                discard(destination).await;
                Err(StorageError::TransferInterrupted(e))
            }
        }
    }
}

/// Pulls up to `chunk_size` bytes at a time and appends them in order.
async fn copy_chunks(file: &mut File, stream: ByteStream<'_>, chunk_size: usize) -> io::Result<()> {
    let mut reader = StreamReader::new(stream);
    let mut buffer = vec![0u8; chunk_size.max(1)];

    loop {
        let read = reader.read(&mut buffer).await?;
        if read == 0 {
            break;
        }
        file.write_all(&buffer[..read]).await?;
    }

    file.flush().await
}

async fn discard(path: &Path) {
    match fs::remove_file(path).await {
        Ok(()) => info!("Removed partial upload {}", path.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to remove partial upload {}: {}", path.display(), e),
    }
}

#[async_trait]
impl StorageService for LocalStorageService {
    async fn store(
        &self,
        name_hint: &str,
        stream: ByteStream<'_>,
        options: &StoreOptions,
    ) -> Result<StoredFile, StorageError> {
        let name = FileName::sanitize(name_hint).ok_or_else(|| {
            warn!("Rejected unusable file name: {:?}", name_hint);
            StorageError::InvalidName(name_hint.to_string())
        })?;

        if !options.extension_allowed(&name) {
            let allowed = options
                .allowed_extensions
                .iter()
                .flatten()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ");
            warn!("Rejected {} : extension not in [{}]", name, allowed);
            return Err(StorageError::UnsupportedFormat {
                extension: name.extension().unwrap_or_default(),
                allowed,
            });
        }

        let stored_name = options.destination_name(&name);
        let destination = self.root.join(&stored_name);

        let size = match self
            .write_stream(&destination, stream, options.chunk_size)
            .await
        {
            Ok(size) => size,
            Err(e) => {
                warn!("Upload of {} aborted: {}", stored_name, e);
                return Err(e);
            }
        };

        info!("Stored {} ({} bytes)", stored_name, size);

        Ok(StoredFile {
            name: stored_name,
            size,
        })
    }

    fn location(&self) -> String {
        self.root().display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use bytes::Bytes;
    use futures::{stream, StreamExt};

    use super::*;
    use crate::domain::models::file::{BatchReport, UploadStatus};

    fn chunks(parts: &[&'static [u8]]) -> ByteStream<'static> {
        stream::iter(
            parts
                .iter()
                .map(|p| Ok(Bytes::from_static(*p)))
                .collect::<Vec<_>>(),
        )
        .boxed()
    }

    /// Yields `parts`, then fails as if the client disconnected.
    fn broken(parts: &[&'static [u8]]) -> ByteStream<'static> {
        let mut items: Vec<Result<Bytes, io::Error>> =
            parts.iter().map(|p| Ok(Bytes::from_static(*p))).collect();
        items.push(Err(io::Error::new(
            io::ErrorKind::ConnectionReset,
            "client went away",
        )));
        stream::iter(items).boxed()
    }

    async fn service() -> (tempfile::TempDir, LocalStorageService) {
        let dir = tempfile::tempdir().unwrap();
        let service = LocalStorageService::open(dir.path().join("uploads"))
            .await
            .unwrap();
        (dir, service)
    }

    #[tokio::test]
    async fn open_creates_root() {
        let (_dir, service) = service().await;
        assert!(service.root().is_dir());
    }

    #[tokio::test]
    async fn size_matches_sum_of_chunks() {
        let (_dir, service) = service().await;
        let options = StoreOptions::default().with_chunk_size(4);

        let stored = service
            .store("data.bin", chunks(&[b"hello", b"", b" ", b"world!"]), &options)
            .await
            .unwrap();

        assert_eq!(stored.name, "data.bin");
        assert_eq!(stored.size, 12);
        let content = fs::read(service.root().join("data.bin")).await.unwrap();
        assert_eq!(content, b"hello world!");
    }

    #[tokio::test]
    async fn traversal_stays_inside_root() {
        let (dir, service) = service().await;

        let stored = service
            .store("../../etc/passwd", chunks(&[b"root:x"]), &StoreOptions::default())
            .await
            .unwrap();

        assert_eq!(stored.name, "passwd");
        assert!(service.root().join("passwd").is_file());
        assert!(!dir.path().join("etc").exists());
    }

    #[tokio::test]
    async fn empty_name_is_rejected() {
        let (_dir, service) = service().await;
        let err = service
            .store("some/dir/", chunks(&[b"x"]), &StoreOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidName(_)));
    }

    #[tokio::test]
    async fn disallowed_extension_writes_nothing() {
        let (_dir, service) = service().await;
        let allowed: BTreeSet<String> = ["png".to_string()].into_iter().collect();
        let options = StoreOptions::default().with_allowed_extensions(allowed);

        let err = service
            .store("payload.exe", chunks(&[b"MZ"]), &options)
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::UnsupportedFormat { ref extension, .. } if extension == "exe"));
        assert!(!service.root().join("payload.exe").exists());
        let mut entries = fs::read_dir(service.root()).await.unwrap();
        assert!(entries.next_entry().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn prefix_is_applied() {
        let (_dir, service) = service().await;
        let options = StoreOptions::default().with_prefix("verified_");
        let stored = service
            .store("cat.png", chunks(&[b"png"]), &options)
            .await
            .unwrap();
        assert_eq!(stored.name, "verified_cat.png");
        assert!(service.root().join("verified_cat.png").is_file());
    }

    #[tokio::test]
    async fn interrupted_stream_leaves_no_file() {
        let (_dir, service) = service().await;

        let err = service
            .store("big.iso", broken(&[b"first", b"second"]), &StoreOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::TransferInterrupted(_)));
        assert!(err.to_string().contains("client went away"));
        assert!(!service.root().join("big.iso").exists());
    }

    #[tokio::test]
    async fn unwritable_destination_is_interrupted() {
        let (_dir, service) = service().await;
        fs::create_dir(service.root().join("taken")).await.unwrap();

        let err = service
            .store("taken", chunks(&[b"x"]), &StoreOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::TransferInterrupted(_)));
        assert!(service.root().join("taken").is_dir());
    }

    #[tokio::test]
    async fn reupload_overwrites() {
        let (_dir, service) = service().await;
        let options = StoreOptions::default();

        service
            .store("notes.txt", chunks(&[b"first version, longer"]), &options)
            .await
            .unwrap();
        let stored = service
            .store("notes.txt", chunks(&[b"second"]), &options)
            .await
            .unwrap();

        assert_eq!(stored.size, 6);
        let content = fs::read(service.root().join("notes.txt")).await.unwrap();
        assert_eq!(content, b"second");
    }

    #[tokio::test]
    async fn failed_reupload_removes_previous_file() {
        let (_dir, service) = service().await;
        let options = StoreOptions::default();

        service
            .store("notes.txt", chunks(&[b"complete"]), &options)
            .await
            .unwrap();
        service
            .store("notes.txt", broken(&[b"part"]), &options)
            .await
            .unwrap_err();

        assert!(!service.root().join("notes.txt").exists());
    }

    #[tokio::test]
    async fn batch_failure_does_not_stop_siblings() {
        let (_dir, service) = service().await;
        let options = StoreOptions::default().with_chunk_size(2);
        let uploads = vec![
            ("one.txt", chunks(&[b"aaa"])),
            ("two.txt", broken(&[b"bb"])),
            ("three.txt", chunks(&[b"cccc", b"c"])),
        ];

        let mut report = BatchReport::new();
        for (name, stream) in uploads {
            let outcome = service.store(name, stream, &options).await;
            report.record(name, outcome);
        }

        let results = report.results();
        assert_eq!(report.total(), 3);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(results[0].status, UploadStatus::Success);
        assert_eq!(results[0].size, Some(3));
        assert_eq!(results[1].status, UploadStatus::Failed);
        assert_eq!(results[1].filename, "two.txt");
        assert_eq!(results[2].status, UploadStatus::Success);
        assert_eq!(results[2].size, Some(5));

        assert_eq!(fs::metadata(service.root().join("one.txt")).await.unwrap().len(), 3);
        assert!(!service.root().join("two.txt").exists());
        assert_eq!(fs::metadata(service.root().join("three.txt")).await.unwrap().len(), 5);
    }
}
