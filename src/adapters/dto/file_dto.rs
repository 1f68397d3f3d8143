use serde::Serialize;

use crate::domain::models::file::{BatchReport, StoredFile, UploadResult};

#[derive(Debug, Serialize)]
pub struct SmallUploadResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct UploadFileResponse {
    pub filename: String,
    pub size: u64,
    pub msg: String,
}

impl From<StoredFile> for UploadFileResponse {
    fn from(stored: StoredFile) -> Self {
        Self {
            filename: stored.name,
            size: stored.size,
            msg: "Upload succeeded".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ImageUploadResponse {
    pub msg: String,
    pub filename: String,
}

#[derive(Debug, Serialize)]
pub struct BatchUploadResponse {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub details: Vec<UploadResult>,
}

impl From<BatchReport> for BatchUploadResponse {
    fn from(report: BatchReport) -> Self {
        Self {
            total: report.total(),
            succeeded: report.succeeded(),
            failed: report.failed(),
            details: report.into_results(),
        }
    }
}
