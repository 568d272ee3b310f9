//! Video discovery.
//!
//! Turns command-line paths into the ordered batches a sync run walks over.

use serde_json::json;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use crate::ui::prelude::{Level, emit};

const VIDEO_EXTENSIONS: &[&str] = &[
    "mkv", "mp4", "m4v", "avi", "mov", "webm", "ts", "m2ts", "wmv", "flv",
];

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("{0} does not exist")]
    NotFound(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFile {
    pub path: PathBuf,
}

/// A group of related media files; only the first one is synced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoBatch {
    pub files: Vec<VideoFile>,
}

impl VideoBatch {
    pub fn single(path: impl Into<PathBuf>) -> Self {
        Self {
            files: vec![VideoFile { path: path.into() }],
        }
    }

    pub fn primary(&self) -> Option<&Path> {
        self.files.first().map(|f| f.path.as_path())
    }
}

pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            VIDEO_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Expand files and directories into one batch per video.
///
/// Files are kept in the order given, whatever their extension. Directories
/// are walked recursively and contribute their video files sorted by path.
/// Entries that cannot be read during the walk (unreadable directories,
/// symlink loops) are reported and skipped; only a missing input is an error.
pub fn discover_videos(inputs: &[PathBuf]) -> Result<Vec<VideoBatch>, SourceError> {
    let mut batches = Vec::new();

    for input in inputs {
        if !input.exists() {
            return Err(SourceError::NotFound(input.clone()));
        }

        if input.is_file() {
            batches.push(VideoBatch::single(input.clone()));
            continue;
        }

        let mut found = Vec::new();
        for entry in WalkDir::new(input).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let skipped = err.path().unwrap_or(input.as_path());
                    emit(
                        Level::Warn,
                        "sync.scan.skipped",
                        &format!("Skipping {} while scanning: {err}", skipped.display()),
                        Some(json!({ "path": skipped.display().to_string() })),
                    );
                    continue;
                }
            };
            if entry.file_type().is_file() && is_video_file(entry.path()) {
                found.push(entry.into_path());
            }
        }
        found.sort();
        batches.extend(found.into_iter().map(VideoBatch::single));
    }

    Ok(batches)
}
