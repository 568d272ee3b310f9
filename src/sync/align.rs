use duct::cmd;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::ui::prelude::{Level, emit};

#[derive(Error, Debug)]
pub enum AlignError {
    #[error("Failed to run alass: {source}\nCommand: {command}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Alass command failed with exit code {}: {stderr}\nCommand: {command}", super::display_code(.exit_code))]
    Tool {
        command: String,
        stderr: String,
        exit_code: Option<i32>,
    },
}

/// Produces a correctly timed subtitle from a reference and a mistimed one.
pub trait SubtitleAligner {
    fn align(&self, reference: &Path, incorrect: &Path, target: &Path) -> Result<(), AlignError>;
}

/// Runs the alass binary with three positional paths and no flags.
#[derive(Debug, Clone)]
pub struct AlassAligner {
    program: PathBuf,
}

impl AlassAligner {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl SubtitleAligner for AlassAligner {
    fn align(&self, reference: &Path, incorrect: &Path, target: &Path) -> Result<(), AlignError> {
        let args: Vec<OsString> = vec![
            reference.as_os_str().to_os_string(),
            incorrect.as_os_str().to_os_string(),
            target.as_os_str().to_os_string(),
        ];
        let command = super::command_line(&self.program, &args);
        emit(
            Level::Debug,
            "sync.align.command",
            &format!("Running: {command}"),
            None,
        );

        let output = cmd(&self.program, &args)
            .stdout_null()
            .stderr_capture()
            .unchecked()
            .run()
            .map_err(|source| AlignError::Spawn {
                command: command.clone(),
                source,
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(AlignError::Tool {
                command,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                exit_code: output.status.code(),
            })
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    fn script(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("alass");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    #[serial]
    fn passes_paths_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let args_file = dir.path().join("args.txt");
        let program = script(
            dir.path(),
            &format!("printf '%s\\n' \"$@\" > '{}'", args_file.display()),
        );

        AlassAligner::new(&program)
            .align(Path::new("a.ja.srt"), Path::new("a.en.bad.srt"), Path::new("a.en.srt"))
            .unwrap();

        let args = fs::read_to_string(&args_file).unwrap();
        assert_eq!(args, "a.ja.srt\na.en.bad.srt\na.en.srt\n");
    }

    #[test]
    #[serial]
    fn nonzero_exit_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let program = script(dir.path(), "echo 'no subtitles found' >&2\nexit 3");

        let err = AlassAligner::new(&program)
            .align(Path::new("a.ja.srt"), Path::new("a.en.bad.srt"), Path::new("a.en.srt"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            format!(
                "Alass command failed with exit code 3: no subtitles found\nCommand: {} a.ja.srt a.en.bad.srt a.en.srt",
                program.display()
            )
        );
    }
}
