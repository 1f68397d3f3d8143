use std::io;

use axum::{
    extract::{
        multipart::{Field, MultipartError},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use bytes::BytesMut;
use futures::{stream, StreamExt, TryStreamExt};
use tracing::{info, warn};

use crate::{
    adapters::{
        dto::file_dto::{
            BatchUploadResponse, ImageUploadResponse, SmallUploadResponse, UploadFileResponse,
        },
        state::AppState,
    },
    application::{error::ApplicationError, services::ByteStream},
    domain::models::file::{BatchReport, StoreOptions},
    services::StorageError,
};

pub struct FileController;

fn multipart_error(e: MultipartError) -> ApplicationError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        warn!("Multipart body exceeds limit: {}", e);
        return ApplicationError::PayloadTooLarge;
    }
    warn!("Invalid multipart data: {}", e);
    ApplicationError::BadRequest("Invalid multipart data".to_string())
}

fn missing_file_field() -> ApplicationError {
    warn!("Missing required 'file' field in upload");
    ApplicationError::BadRequest("Missing required 'file' field".to_string())
}

/// Exposes a multipart field as an upload stream; body read errors become I/O errors.
fn field_stream(field: Field<'_>) -> ByteStream<'_> {
    field.map_err(io::Error::other).boxed()
}

/// True when the stream failed because the request body limit was hit
/// while the field was being read.
fn exceeded_body_limit(error: &StorageError) -> bool {
    match error {
        StorageError::TransferInterrupted(cause) => cause
            .get_ref()
            .and_then(|inner| inner.downcast_ref::<MultipartError>())
            .is_some_and(|e| e.status() == StatusCode::PAYLOAD_TOO_LARGE),
        _ => false,
    }
}

fn upload_error(error: StorageError) -> ApplicationError {
    if exceeded_body_limit(&error) {
        warn!("Upload stream exceeds body limit: {}", error);
        return ApplicationError::PayloadTooLarge;
    }
    error.into()
}

fn streaming_options(app_state: &AppState) -> StoreOptions {
    StoreOptions::default().with_chunk_size(app_state.global_config.chunk_size)
}

impl FileController {
    /// Buffers the whole `file` field in memory and saves it under the
    /// configured fixed name.
    /// POST /upload/small
    pub async fn upload_small(
        State(app_state): State<AppState>,
        mut multipart: Multipart,
    ) -> Result<Json<SmallUploadResponse>, ApplicationError> {
        let max_size = app_state.global_config.small_max_size;

        while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
            if field.name() != Some("file") {
                continue;
            }

            let mut content = BytesMut::new();
            while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
                if (content.len() + chunk.len()) as u64 > max_size {
                    warn!("Small upload exceeds {} bytes", max_size);
                    return Err(ApplicationError::PayloadTooLarge);
                }
                content.extend_from_slice(&chunk);
            }

            let content = content.freeze();
            let single_chunk = stream::once(async move { Ok(content) }).boxed();
            let stored = app_state
                .storage_service
                .store(
                    &app_state.global_config.small_upload_name,
                    single_chunk,
                    &streaming_options(&app_state),
                )
                .await?;

            info!("Small upload saved as {} ({} bytes)", stored.name, stored.size);
            return Ok(Json(SmallUploadResponse {
                message: "Small file saved".to_string(),
            }));
        }

        Err(missing_file_field())
    }

    /// Streams the `file` field to disk chunk by chunk.
    /// POST /upload/large
    pub async fn upload_large(
        State(app_state): State<AppState>,
        mut multipart: Multipart,
    ) -> Result<Json<UploadFileResponse>, ApplicationError> {
        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            if field.name() != Some("file") {
                continue;
            }

            let name_hint = field.file_name().unwrap_or_default().to_string();
            info!("Streaming upload of {:?}", name_hint);

            let stored = app_state
                .storage_service
                .store(&name_hint, field_stream(field), &streaming_options(&app_state))
                .await
                .map_err(upload_error)?;

            return Ok(Json(UploadFileResponse::from(stored)));
        }

        Err(missing_file_field())
    }

    /// Streams every `files` field in order. A failed file is reported in its
    /// own entry and the remaining files are still processed.
    /// POST /batch-upload
    pub async fn batch_upload(
        State(app_state): State<AppState>,
        mut multipart: Multipart,
    ) -> Json<BatchUploadResponse> {
        let options = streaming_options(&app_state);
        let mut report = BatchReport::new();

        loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(e) => {
                    warn!("Stopped reading batch upload body: {}", e);
                    break;
                }
            };

            if !matches!(field.name(), Some("files") | Some("file")) {
                continue;
            }

            let name_hint = field.file_name().unwrap_or_default().to_string();
            let outcome = app_state
                .storage_service
                .store(&name_hint, field_stream(field), &options)
                .await;
            let outcome = outcome.map_err(|e| {
                warn!("Batch item {:?} failed: {}", name_hint, e);
                if exceeded_body_limit(&e) {
                    "File too large".to_string()
                } else {
                    e.to_string()
                }
            });
            report.record(&name_hint, outcome);
        }

        info!(
            "Batch upload finished: {} of {} files stored",
            report.succeeded(),
            report.total()
        );

        Json(BatchUploadResponse::from(report))
    }

    /// Like `upload_large`, but only for image extensions; accepted files get
    /// the verified prefix.
    /// POST /image-upload
    pub async fn image_upload(
        State(app_state): State<AppState>,
        mut multipart: Multipart,
    ) -> Result<Json<ImageUploadResponse>, ApplicationError> {
        let options = streaming_options(&app_state)
            .with_allowed_extensions(app_state.global_config.image_extensions.clone())
            .with_prefix(app_state.global_config.image_prefix.clone());

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            if field.name() != Some("file") {
                continue;
            }

            let name_hint = field.file_name().unwrap_or_default().to_string();
            let stored = app_state
                .storage_service
                .store(&name_hint, field_stream(field), &options)
                .await
                .map_err(upload_error)?;

            return Ok(Json(ImageUploadResponse {
                msg: "Image verified and saved".to_string(),
                filename: stored.name,
            }));
        }

        Err(missing_file_field())
    }
}
