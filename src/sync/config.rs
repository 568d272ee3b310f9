use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::naming::LanguageExtensions;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SyncConfig {
    /// Token of the correctly timed subtitle, extracted from the video if missing
    pub lang_ext_original: Option<String>,
    /// Token written on the aligned output subtitle
    pub lang_ext: Option<String>,
    /// Token of the existing subtitle with incorrect timing
    pub lang_ext_incorrect: Option<String>,
    /// alass executable, a path or a name looked up in PATH
    pub alass_path: PathBuf,
    /// ffmpeg executable, a path or a name looked up in PATH
    pub ffmpeg_path: PathBuf,
    /// Directory for run artifacts such as the failure log
    pub output_dir: PathBuf,
    /// Also record a failure when the mistimed subtitle is missing
    pub record_missing_incorrect: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            lang_ext_original: None,
            lang_ext: None,
            lang_ext_incorrect: None,
            alass_path: PathBuf::from(Self::DEFAULT_ALASS),
            ffmpeg_path: PathBuf::from(Self::DEFAULT_FFMPEG),
            output_dir: PathBuf::from(Self::DEFAULT_OUTPUT_DIR),
            record_missing_incorrect: false,
        }
    }
}

/// Values given on the command line; `None` leaves the config value alone.
#[derive(Debug, Clone, Default)]
pub struct SyncOverrides {
    pub lang_ext_original: Option<String>,
    pub lang_ext: Option<String>,
    pub lang_ext_incorrect: Option<String>,
    pub alass_path: Option<PathBuf>,
    pub ffmpeg_path: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub record_missing_incorrect: Option<bool>,
}

impl SyncConfig {
    pub const DEFAULT_ALASS: &'static str = "alass";
    pub const DEFAULT_FFMPEG: &'static str = "ffmpeg";
    pub const DEFAULT_OUTPUT_DIR: &'static str = "output";

    /// Load the config, falling back to defaults when the file is absent.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading sync config from {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("parsing sync config {}", path.display()))
    }

    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating config directory {}", parent.display()))?;
        }

        let toml = self.to_toml()?;
        fs::write(path, toml)
            .with_context(|| format!("writing sync config to {}", path.display()))?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("serializing sync config")
    }

    pub fn apply(mut self, overrides: SyncOverrides) -> Self {
        if overrides.lang_ext_original.is_some() {
            self.lang_ext_original = overrides.lang_ext_original;
        }
        if overrides.lang_ext.is_some() {
            self.lang_ext = overrides.lang_ext;
        }
        if overrides.lang_ext_incorrect.is_some() {
            self.lang_ext_incorrect = overrides.lang_ext_incorrect;
        }
        if let Some(alass) = overrides.alass_path {
            self.alass_path = alass;
        }
        if let Some(ffmpeg) = overrides.ffmpeg_path {
            self.ffmpeg_path = ffmpeg;
        }
        if let Some(dir) = overrides.output_dir {
            self.output_dir = dir;
        }
        if let Some(record) = overrides.record_missing_incorrect {
            self.record_missing_incorrect = record;
        }
        self
    }

    pub fn language_extensions(&self) -> LanguageExtensions {
        LanguageExtensions {
            original: self.lang_ext_original.clone(),
            target: self.lang_ext.clone(),
            incorrect: self.lang_ext_incorrect.clone(),
        }
    }
}

/// Config file to use: the `--config` flag, else the per-user default
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => crate::common::paths::default_config_path(),
    }
}
