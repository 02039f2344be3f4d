//! Persisted reading history.
//!
//! Append-only log of saved readings, newest first, backed by a JSON file.
//! Individual entries are never updated or deleted; the only mutations are
//! append and full clear.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::Reading;

/// Errors from the reading log.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// Reading or writing the backing file failed
    #[error("history file error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file held invalid JSON
    #[error("history parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// File-backed reading log.
///
/// The full list is held in memory behind a lock; every mutation rewrites
/// the file, which stays small (one dashboard's worth of readings).
#[derive(Clone)]
pub struct ReadingLog {
    inner: Arc<RwLock<Vec<Reading>>>,
    path: PathBuf,
}

impl ReadingLog {
    /// Open a log at the given path, loading existing readings if the file
    /// exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, HistoryError> {
        let path = path.into();

        let readings = if path.exists() {
            let json = std::fs::read_to_string(&path)?;
            serde_json::from_str(&json)?
        } else {
            Vec::new()
        };

        Ok(Self {
            inner: Arc::new(RwLock::new(readings)),
            path,
        })
    }

    /// Append a reading at the head of the log and persist.
    pub async fn append(&self, reading: Reading) -> Result<Reading, HistoryError> {
        let mut guard = self.inner.write().await;
        guard.insert(0, reading.clone());
        persist(&self.path, &guard)?;
        Ok(reading)
    }

    /// All readings, newest first.
    pub async fn all(&self) -> Vec<Reading> {
        self.inner.read().await.clone()
    }

    /// Number of stored readings.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Whether the log is empty.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Remove every reading and persist the empty log.
    pub async fn clear(&self) -> Result<(), HistoryError> {
        let mut guard = self.inner.write().await;
        guard.clear();
        persist(&self.path, &guard)?;
        Ok(())
    }
}

/// Write the full list to disk, creating parent directories on first use.
fn persist(path: &Path, readings: &[Reading]) -> Result<(), HistoryError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(readings)?;
    std::fs::write(path, json)?;
    Ok(())
}
