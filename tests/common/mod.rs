use anyhow::Result;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Marker a fake video must contain for the stub ffmpeg to "find" a subtitle stream.
pub const EMBEDDED_SUBS_MARKER: &str = "embedded-subtitles";

/// Scratch library directory with stub ffmpeg and alass executables.
pub struct TestEnvironment {
    temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let env = Self { temp_dir };
        fs::create_dir_all(env.bin_dir())?;
        fs::create_dir_all(env.library())?;

        env.write_executable(
            "ffmpeg",
            &format!(
                r#"#!/bin/sh
input=""
prev=""
for arg; do
  if [ "$prev" = "-i" ]; then input="$arg"; fi
  prev="$arg"
  last="$arg"
done
if grep -q {EMBEDDED_SUBS_MARKER} "$input"; then
  printf '1\n00:00:01,000 --> 00:00:02,000\nreference\n' > "$last"
fi
exit 0
"#
            ),
        )?;

        let alass_log = env.alass_log();
        env.write_executable(
            "alass",
            &format!(
                "#!/bin/sh\nprintf '%s|%s|%s\\n' \"$1\" \"$2\" \"$3\" >> '{}'\ncp \"$2\" \"$3\"\n",
                alass_log.display()
            ),
        )?;

        Ok(env)
    }

    /// Root of the scratch directory; subalign runs with this as its cwd
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.path().join("bin")
    }

    pub fn library(&self) -> PathBuf {
        self.path().join("library")
    }

    pub fn ffmpeg(&self) -> PathBuf {
        self.bin_dir().join("ffmpeg")
    }

    pub fn alass(&self) -> PathBuf {
        self.bin_dir().join("alass")
    }

    /// Every alass invocation is appended here as `reference|incorrect|target`
    pub fn alass_log(&self) -> PathBuf {
        self.path().join("alass-calls.log")
    }

    pub fn config_path(&self) -> PathBuf {
        self.path().join("config.toml")
    }

    pub fn alass_calls(&self) -> Result<Vec<String>> {
        if !self.alass_log().exists() {
            return Ok(Vec::new());
        }
        Ok(fs::read_to_string(self.alass_log())?
            .lines()
            .map(str::to_string)
            .collect())
    }

    fn write_executable(&self, name: &str, script: &str) -> Result<()> {
        let path = self.bin_dir().join(name);
        fs::write(&path, script)?;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
        Ok(())
    }
}
