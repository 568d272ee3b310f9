use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::common::TestEnvironment;

pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

/// Run the subalign binary inside the test environment.
///
/// The config file always points into the scratch directory so the user's
/// real configuration is never read.
pub fn run_subalign(env: &TestEnvironment, args: &[&str]) -> Result<CommandOutput> {
    let output = Command::new(env!("CARGO_BIN_EXE_subalign"))
        .arg("--no-color")
        .args(args)
        .current_dir(env.path())
        .output()?;

    Ok(CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code().unwrap_or(-1),
    })
}

/// `sync` arguments wired to the stub tools and the scratch config
pub fn sync_args(env: &TestEnvironment) -> Vec<String> {
    vec![
        "sync".to_string(),
        "--config".to_string(),
        env.config_path().display().to_string(),
        "--ffmpeg".to_string(),
        env.ffmpeg().display().to_string(),
        "--alass".to_string(),
        env.alass().display().to_string(),
    ]
}

pub fn create_video(env: &TestEnvironment, name: &str, embedded_subs: bool) -> Result<PathBuf> {
    let path = env.library().join(name);
    let contents = if embedded_subs {
        super::common::EMBEDDED_SUBS_MARKER
    } else {
        "video-only"
    };
    fs::write(&path, contents)?;
    Ok(path)
}

pub fn create_subtitle(env: &TestEnvironment, name: &str) -> Result<PathBuf> {
    let path = env.library().join(name);
    fs::write(&path, "1\n00:00:05,000 --> 00:00:06,000\nhello\n")?;
    Ok(path)
}

pub fn file_exists(path: &Path) -> bool {
    path.exists()
}

pub fn read_file(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}
