//! External tool requirements.
//!
//! A configured program is either an explicit path, which must exist, or a
//! bare name that is resolved through `PATH`.

use anyhow::{Result, bail};
use std::path::PathBuf;

/// A program subalign shells out to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolRequirement {
    /// Human-readable tool name used in diagnostics.
    pub name: &'static str,
    /// Configured program, a path or a bare command name.
    pub program: PathBuf,
}

impl ToolRequirement {
    pub fn new(name: &'static str, program: impl Into<PathBuf>) -> Self {
        Self {
            name,
            program: program.into(),
        }
    }

    fn is_explicit_path(&self) -> bool {
        self.program.components().count() > 1 || self.program.is_absolute()
    }

    /// Locate the program, returning the path that will be executed.
    pub fn resolve(&self) -> Result<PathBuf> {
        if self.is_explicit_path() {
            if self.program.is_file() {
                return Ok(self.program.clone());
            }
            bail!(
                "{} not found at {}",
                self.name,
                self.program.display()
            );
        }

        match which::which(&self.program) {
            Ok(path) => Ok(path),
            Err(_) => bail!(
                "{} ({}) was not found in PATH",
                self.name,
                self.program.display()
            ),
        }
    }
}
