pub mod cli;
pub mod commands;
mod align;
mod config;
mod extract;
mod failures;
mod naming;
mod orchestrator;
mod report;
mod source;

pub use cli::{CheckArgs, ConfigCommands, SyncArgs};
pub use commands::{handle_check, handle_config, handle_sync};

use std::ffi::OsString;
use std::path::Path;

fn display_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| c.to_string())
}

/// Shell-quoted command line, used in debug output and error messages.
fn command_line(program: &Path, args: &[OsString]) -> String {
    let words = std::iter::once(program.as_os_str())
        .chain(args.iter().map(OsString::as_os_str))
        .map(|word| word.to_string_lossy().into_owned());
    shell_words::join(words)
}
