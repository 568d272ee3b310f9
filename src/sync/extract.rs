use duct::cmd;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::ui::prelude::{Level, emit};

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to run ffmpeg: {source}\nCommand: {command}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to extract subtitles (exit code {}): {stderr}\nCommand: {command}", super::display_code(.exit_code))]
    Tool {
        command: String,
        stderr: String,
        exit_code: Option<i32>,
    },
}

/// Pulls an embedded subtitle stream out of a video container.
pub trait SubtitleExtractor {
    fn extract(&self, video: &Path, destination: &Path) -> Result<PathBuf, ExtractError>;
}

/// Extracts the first subtitle stream with ffmpeg, converted to SubRip.
#[derive(Debug, Clone)]
pub struct FfmpegExtractor {
    program: PathBuf,
}

impl FfmpegExtractor {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn arguments(video: &Path, destination: &Path) -> Vec<OsString> {
        vec![
            OsString::from("-hide_banner"),
            OsString::from("-loglevel"),
            OsString::from("error"),
            OsString::from("-y"),
            OsString::from("-i"),
            video.as_os_str().to_os_string(),
            OsString::from("-map"),
            OsString::from("0:s:0"),
            OsString::from("-c:s"),
            OsString::from("srt"),
            destination.as_os_str().to_os_string(),
        ]
    }
}

impl SubtitleExtractor for FfmpegExtractor {
    fn extract(&self, video: &Path, destination: &Path) -> Result<PathBuf, ExtractError> {
        let args = Self::arguments(video, destination);
        let command = super::command_line(&self.program, &args);
        emit(
            Level::Debug,
            "sync.extract.command",
            &format!("Running: {command}"),
            None,
        );

        let output = cmd(&self.program, &args)
            .stdout_null()
            .stderr_capture()
            .unchecked()
            .run()
            .map_err(|source| ExtractError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ExtractError::Tool {
                command,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                exit_code: output.status.code(),
            });
        }

        Ok(destination.to_path_buf())
    }
}
