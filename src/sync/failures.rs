use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{OpenOptions, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};

/// One persisted per-file failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FailureRecord {
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub path: PathBuf,
    pub message: String,
}

/// Persists structured failures for videos that could not be synced.
pub trait FailureRecorder {
    fn record(&mut self, source: &str, path: &Path, message: &str) -> Result<()>;
}

/// Appends failures as JSON lines to `failed.jsonl` in the output directory.
#[derive(Debug, Clone)]
pub struct JsonlFailureRecorder {
    log_path: PathBuf,
}

impl JsonlFailureRecorder {
    pub const FILE_NAME: &'static str = "failed.jsonl";

    pub fn new(output_dir: &Path) -> Self {
        Self {
            log_path: output_dir.join(Self::FILE_NAME),
        }
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}

impl FailureRecorder for JsonlFailureRecorder {
    fn record(&mut self, source: &str, path: &Path, message: &str) -> Result<()> {
        if let Some(parent) = self.log_path.parent() {
            create_dir_all(parent)
                .with_context(|| format!("creating failure log directory {}", parent.display()))?;
        }

        let entry = FailureRecord {
            timestamp: Utc::now(),
            source: source.to_string(),
            path: path.to_path_buf(),
            message: message.to_string(),
        };
        let line = serde_json::to_string(&entry).context("serializing failure record")?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("opening failure log {}", self.log_path.display()))?;
        writeln!(file, "{line}")
            .with_context(|| format!("writing failure log {}", self.log_path.display()))?;

        Ok(())
    }
}
