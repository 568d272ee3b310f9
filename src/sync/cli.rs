use clap::{Args, Subcommand, ValueHint};
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct SyncArgs {
    /// Video files or directories to sync
    #[arg(required = true, value_hint = ValueHint::AnyPath)]
    pub paths: Vec<PathBuf>,

    /// Language extension of the correctly timed subtitle (extracted from the video if missing)
    #[arg(long, value_name = "EXT")]
    pub lang_ext_original: Option<String>,

    /// Language extension for the aligned output subtitle
    #[arg(long, value_name = "EXT")]
    pub lang_ext: Option<String>,

    /// Language extension of the subtitle with incorrect timing
    #[arg(long, value_name = "EXT")]
    pub lang_ext_incorrect: Option<String>,

    /// alass executable to use
    #[arg(long, value_hint = ValueHint::ExecutablePath)]
    pub alass: Option<PathBuf>,

    /// ffmpeg executable to use
    #[arg(long, value_hint = ValueHint::ExecutablePath)]
    pub ffmpeg: Option<PathBuf>,

    /// Directory for run artifacts such as the failure log
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub output_dir: Option<PathBuf>,

    /// Record a failure when the incorrectly timed subtitle is missing
    #[arg(long, overrides_with = "no_record_missing_incorrect")]
    pub record_missing_incorrect: bool,

    /// Only warn when the incorrectly timed subtitle is missing, even if the config says to record it
    #[arg(long, overrides_with = "record_missing_incorrect")]
    pub no_record_missing_incorrect: bool,

    /// Config file to read instead of the default location
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
}

impl SyncArgs {
    /// The recording flag given on the command line, if any; the last one wins.
    pub fn record_missing_incorrect_override(&self) -> Option<bool> {
        match (self.record_missing_incorrect, self.no_record_missing_incorrect) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Config file to read instead of the default location
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Print the config file location
    Path {
        #[arg(long, value_hint = ValueHint::FilePath)]
        config: Option<PathBuf>,
    },
    /// Print the effective configuration
    Show {
        #[arg(long, value_hint = ValueHint::FilePath)]
        config: Option<PathBuf>,
    },
    /// Write a config file with default values
    Init {
        #[arg(long, value_hint = ValueHint::FilePath)]
        config: Option<PathBuf>,
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}
