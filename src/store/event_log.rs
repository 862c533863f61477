use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::types::EventRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("event log io: {0}")]
    Io(#[from] std::io::Error),
    #[error("event log line {line} is not a valid record: {source}")]
    Corrupt {
        line: usize,
        source: serde_json::Error,
    },
    #[error("failed to encode event record: {0}")]
    Encode(serde_json::Error),
}

/// Append-only event log, one JSON record per line.
///
/// The receiver process is the sole writer; readers only ever see records
/// whose write completed.
pub struct EventLog {
    path: PathBuf,
    append_gate: Mutex<()>,
}

impl EventLog {
    /// Opens the log at `path`, creating the parent directory if needed.
    /// The file itself appears on the first append.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }
        Ok(Self {
            path,
            append_gate: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Durably appends one record. Returns only after the line has been
    /// flushed to disk; overlapping appends are serialized by the gate.
    pub async fn append(&self, record: &EventRecord) -> Result<(), StoreError> {
        let mut line = serde_json::to_string(record).map_err(StoreError::Encode)?;
        line.push('\n');

        let _gate = self.append_gate.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.sync_all().await?;
        Ok(())
    }

    /// Every record in arrival order. A missing file is an empty log, not
    /// an error; an unparseable line is.
    pub async fn read_all(&self) -> Result<Vec<EventRecord>, StoreError> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(StoreError::Io(err)),
        };

        let mut records = Vec::new();
        for (idx, raw) in contents.lines().enumerate() {
            if raw.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(raw).map_err(|source| StoreError::Corrupt {
                line: idx + 1,
                source,
            })?;
            records.push(record);
        }
        Ok(records)
    }
}
