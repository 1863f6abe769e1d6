//! Append-only run log.
//!
//! Every completed task request produces one [`RunLogEntry`]. Sinks implement
//! [`RunLog`] and are injected where entries are produced:
//! - [`JsonlRunLog`] appends one JSON object per line to a file
//! - [`MemoryRunLog`] keeps entries in memory (testing)

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;

use crate::error::RunLogError;
use crate::executor::ExecutionResult;

/// Result type for run log operations.
pub type RunLogResult<T> = std::result::Result<T, RunLogError>;

/// One completed task request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunLogEntry {
    pub timestamp: DateTime<Utc>,
    pub task: String,
    pub agent: String,
    pub output: String,
    pub success: bool,
    pub returncode: i32,
}

impl RunLogEntry {
    /// Build an entry for `task`, stamped now.
    pub fn new(task: &str, agent: &str, result: &ExecutionResult) -> Self {
        Self {
            timestamp: Utc::now(),
            task: task.to_string(),
            agent: agent.to_string(),
            output: result.output.clone(),
            success: result.success,
            returncode: result.returncode,
        }
    }
}

/// Append-only sink for run log entries.
#[async_trait]
pub trait RunLog: Send + Sync {
    /// Append one entry.
    async fn append(&self, entry: &RunLogEntry) -> RunLogResult<()>;
}

// ---------------------------------------------------------------------------
// JsonlRunLog
// ---------------------------------------------------------------------------

/// File-backed run log: one JSON object per line, opened in append mode.
#[derive(Debug)]
pub struct JsonlRunLog {
    path: PathBuf,
    file: tokio::sync::Mutex<tokio::fs::File>,
}

impl JsonlRunLog {
    /// Open (creating if needed) the log file at `path`.
    pub async fn open(path: impl AsRef<Path>) -> RunLogResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        Ok(Self {
            path,
            file: tokio::sync::Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RunLog for JsonlRunLog {
    async fn append(&self, entry: &RunLogEntry) -> RunLogResult<()> {
        let mut line = serde_json::to_vec(entry)?;
        line.push(b'\n');

        let mut file = self.file.lock().await;
        file.write_all(&line).await?;
        file.flush().await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MemoryRunLog
// ---------------------------------------------------------------------------

/// In-memory run log backed by a `Vec`.
#[derive(Debug, Default)]
pub struct MemoryRunLog {
    entries: Mutex<Vec<RunLogEntry>>,
}

impl MemoryRunLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all entries appended so far, oldest first.
    pub fn entries(&self) -> Vec<RunLogEntry> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl RunLog for MemoryRunLog {
    async fn append(&self, entry: &RunLogEntry) -> RunLogResult<()> {
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }
}
