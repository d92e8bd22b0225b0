//! Append-only inbox for accepted submissions.
//!
//! The backing resource is a single JSON array in one file, read fully
//! and rewritten fully on each append. Appends within one process are
//! serialized through the store's mutex; there is no cross-process
//! locking.

use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::warn;

use crate::domain::submission::{StoredSubmission, Submission};

/// Errors from the inbox. These are reported to operators; the request
/// pipeline deliberately does not surface them to the caller.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to encode submissions: {0}")]
    Encode(#[from] serde_json::Error),
}

/// File-backed append-only store of submission records.
pub struct SubmissionStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl SubmissionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full collection.
    ///
    /// An absent or empty file is an empty collection. A file that does
    /// not parse is also treated as empty, after a warning: a damaged
    /// inbox must not block new submissions.
    pub async fn load(&self) -> Result<Vec<StoredSubmission>, StorageError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        match serde_json::from_slice(&bytes) {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "inbox file is not valid JSON, treating as empty"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Stamp the record with the current time and append it.
    ///
    /// Read-modify-write over the whole file; the store's mutex is held
    /// across both the read and the write so concurrent in-process
    /// appends cannot lose each other's records.
    pub async fn append(&self, submission: Submission) -> Result<StoredSubmission, StorageError> {
        let _guard = self.write_lock.lock().await;

        let record = StoredSubmission::from_submission(submission, Utc::now());

        let mut records = self.load().await?;
        records.push(record.clone());

        let encoded = serde_json::to_vec_pretty(&records)?;
        tokio::fs::write(&self.path, encoded)
            .await
            .map_err(|e| StorageError::Write {
                path: self.path.clone(),
                source: e,
            })?;

        Ok(record)
    }

    /// Number of records currently persisted.
    pub async fn count(&self) -> Result<usize, StorageError> {
        Ok(self.load().await?.len())
    }
}
