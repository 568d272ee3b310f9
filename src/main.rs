mod common;
mod completions;
mod sync;
mod ui;

use clap::{CommandFactory, Parser, Subcommand};

use crate::completions::CompletionCommands;
use crate::sync::{CheckArgs, ConfigCommands, SyncArgs};
use crate::ui::prelude::{Level, OutputFormat, emit};

/// Align mistimed subtitles against the subtitle track embedded in a video
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Show executed commands and other debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Output format for messages
    #[arg(long, value_enum, default_value = "text", global = true)]
    output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract reference subtitles and align mistimed ones with alass
    Sync(SyncArgs),
    /// Verify that ffmpeg and alass can be found
    Check(CheckArgs),
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Shell completion scripts
    Completions {
        #[command(subcommand)]
        command: CompletionCommands,
    },
}

pub(crate) fn cli_command() -> clap::Command {
    Cli::command()
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    match cli.command {
        Commands::Sync(args) => {
            let report = sync::handle_sync(args)?;
            Ok(report.failed() == 0)
        }
        Commands::Check(args) => sync::handle_check(args),
        Commands::Config { command } => sync::handle_config(command).map(|_| true),
        Commands::Completions { command } => {
            completions::handle_completions(command).map(|_| true)
        }
    }
}

fn main() {
    let cli = Cli::parse();

    ui::init(cli.output, !cli.no_color);
    ui::set_debug_mode(cli.debug);

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            emit(Level::Error, "error", &format!("Error: {err:#}"), None);
            std::process::exit(1);
        }
    }
}
