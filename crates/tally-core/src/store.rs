//! Flat-file store — two JSON array files mirrored in memory.
//!
//! Both sequences are loaded fully at [`FileStore::open`] and rewritten in
//! full on every [`FileStore::save_all`]; there is no append format, no file
//! locking, and no atomic rename. A crash mid-write can corrupt a file; the
//! corruption surfaces as a logged parse failure and an empty sequence on
//! the next load. The caller is responsible for serializing mutations (the
//! HTTP layer holds one mutex around every read-append-save cycle).

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::types::{ProcessedRecord, ReceivedEntry};

/// File holding the raw received envelopes.
pub const RECEIVED_DATA_FILE: &str = "received_data.json";
/// File holding the processed records.
pub const PROCESSED_RECORDS_FILE: &str = "processed_records.json";

/// Failures the store reports instead of swallowing. Load-side problems
/// (missing file, unparseable contents) are not errors; they yield empty
/// sequences.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to create storage dir {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to serialize store contents: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Existence, size, and mtime of one backing file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileStats {
    pub exists: bool,
    pub size: u64,
    pub modified_at: Option<DateTime<Utc>>,
}

/// Per-file stats for both backing files.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreStats {
    pub received_data: FileStats,
    pub processed_records: FileStats,
}

/// The pair of in-memory sequences backed by two on-disk JSON files.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    received: Vec<ReceivedEntry>,
    processed: Vec<ProcessedRecord>,
}

impl FileStore {
    /// Open (and create if needed) the storage directory, loading whatever
    /// both files currently hold.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| StoreError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        let received = load_array(&dir.join(RECEIVED_DATA_FILE));
        let processed = load_array(&dir.join(PROCESSED_RECORDS_FILE));
        Ok(Self {
            dir,
            received,
            processed,
        })
    }

    pub fn received(&self) -> &[ReceivedEntry] {
        &self.received
    }

    pub fn processed(&self) -> &[ProcessedRecord] {
        &self.processed
    }

    /// Append a raw envelope to the in-memory sequence. Not persisted until
    /// [`FileStore::save_all`].
    pub fn append_received(&mut self, entry: ReceivedEntry) {
        self.received.push(entry);
    }

    /// Append a processed record to the in-memory sequence. Not persisted
    /// until [`FileStore::save_all`].
    pub fn append_processed(&mut self, record: ProcessedRecord) {
        self.processed.push(record);
    }

    /// Rewrite both files in full from the in-memory sequences.
    pub fn save_all(&self) -> Result<(), StoreError> {
        write_array(&self.received_path(), &self.received)?;
        write_array(&self.processed_path(), &self.processed)?;
        Ok(())
    }

    /// Drop everything: both in-memory sequences and both files.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.received.clear();
        self.processed.clear();
        for path in [self.received_path(), self.processed_path()] {
            match std::fs::remove_file(&path) {
                Ok(()) => {}
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(source) => return Err(StoreError::Remove { path, source }),
            }
        }
        Ok(())
    }

    /// Report both backing files. A missing file is `exists: false, size: 0,
    /// modified_at: null`, never a failure.
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            received_data: file_stats(&self.received_path()),
            processed_records: file_stats(&self.processed_path()),
        }
    }

    fn received_path(&self) -> PathBuf {
        self.dir.join(RECEIVED_DATA_FILE)
    }

    fn processed_path(&self) -> PathBuf {
        self.dir.join(PROCESSED_RECORDS_FILE)
    }
}

fn load_array<T: serde::de::DeserializeOwned>(path: &Path) -> Vec<T> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "failed to read store file, starting empty");
            return Vec::new();
        }
    };
    match serde_json::from_slice(&bytes) {
        Ok(items) => items,
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "failed to parse store file, starting empty");
            Vec::new()
        }
    }
}

fn write_array<T: Serialize>(path: &Path, items: &[T]) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(items)?;
    std::fs::write(path, json).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn file_stats(path: &Path) -> FileStats {
    match std::fs::metadata(path) {
        Ok(meta) => FileStats {
            exists: true,
            size: meta.len(),
            modified_at: meta.modified().ok().map(DateTime::<Utc>::from),
        },
        Err(_) => FileStats {
            exists: false,
            size: 0,
            modified_at: None,
        },
    }
}
