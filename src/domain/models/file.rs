use std::{
    collections::BTreeSet,
    fmt,
    path::{Component, Path},
};

use serde::Serialize;

pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// Basename of an untrusted client file name, safe to join onto the storage root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileName(String);

impl FileName {
    /// Strips every directory component (both `/` and `\` separators).
    /// Returns `None` when nothing usable is left.
    pub fn sanitize(hint: &str) -> Option<Self> {
        let basename = hint
            .rsplit(|c| c == '/' || c == '\\')
            .next()
            .unwrap_or("");

        if basename.trim().is_empty()
            || basename == "."
            || basename == ".."
            || basename.contains('\0')
        {
            return None;
        }

        // Must resolve to exactly one plain component under the root.
        let mut components = Path::new(basename).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Some(Self(basename.to_string())),
            _ => None,
        }
    }

    /// Lowercased suffix after the last `.`, if any.
    pub fn extension(&self) -> Option<String> {
        self.0
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub chunk_size: usize,
    pub allowed_extensions: Option<BTreeSet<String>>,
    pub prefix: Option<String>,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            allowed_extensions: None,
            prefix: None,
        }
    }
}

impl StoreOptions {
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn with_allowed_extensions(mut self, extensions: BTreeSet<String>) -> Self {
        self.allowed_extensions = Some(extensions);
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.prefix = (!prefix.is_empty()).then_some(prefix);
        self
    }

    pub fn extension_allowed(&self, name: &FileName) -> bool {
        match &self.allowed_extensions {
            None => true,
            Some(allowed) => name
                .extension()
                .is_some_and(|ext| allowed.contains(&ext)),
        }
    }

    /// Name the file is stored under: optional prefix followed by the basename.
    pub fn destination_name(&self, name: &FileName) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, name),
            None => name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub name: String,
    pub size: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Success,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadResult {
    pub filename: String,
    pub status: UploadStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UploadResult {
    pub fn success(stored: StoredFile) -> Self {
        Self {
            filename: stored.name,
            status: UploadStatus::Success,
            size: Some(stored.size),
            error: None,
        }
    }

    pub fn failure(filename: impl Into<String>, error: impl fmt::Display) -> Self {
        Self {
            filename: filename.into(),
            status: UploadStatus::Failed,
            size: None,
            error: Some(error.to_string()),
        }
    }
}

/// Ordered per-file outcomes of a batch upload.
#[derive(Debug, Default)]
pub struct BatchReport {
    results: Vec<UploadResult>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome for one file. Failures are reported under the
    /// sanitized name when there is one, else under the raw hint.
    pub fn record<E: fmt::Display>(&mut self, name_hint: &str, outcome: Result<StoredFile, E>) {
        let result = match outcome {
            Ok(stored) => UploadResult::success(stored),
            Err(e) => {
                let filename = FileName::sanitize(name_hint)
                    .map(|name| name.to_string())
                    .unwrap_or_else(|| name_hint.to_string());
                UploadResult::failure(filename, e)
            }
        };
        self.results.push(result);
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn succeeded(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.status == UploadStatus::Success)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.results()
            .iter()
            .filter(|r| r.status == UploadStatus::Failed)
            .count()
    }

    pub fn results(&self) -> &[UploadResult] {
        &self.results
    }

    pub fn into_results(self) -> Vec<UploadResult> {
        self.results
    }
}
