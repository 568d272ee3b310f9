use anyhow::{Result, bail};
use serde_json::json;
use std::path::Path;

use super::align::AlassAligner;
use super::cli::{CheckArgs, ConfigCommands, SyncArgs};
use super::config::{SyncConfig, SyncOverrides, resolve_config_path};
use super::extract::FfmpegExtractor;
use super::failures::JsonlFailureRecorder;
use super::orchestrator::{Orchestrator, SyncOptions};
use super::report::SyncReport;
use super::source::discover_videos;
use crate::common::progress::{create_video_bar, finish_video_bar};
use crate::common::requirements::ToolRequirement;
use crate::ui::prelude::{Level, OutputFormat, emit, get_output_format};

pub fn handle_sync(args: SyncArgs) -> Result<SyncReport> {
    let record_missing_incorrect = args.record_missing_incorrect_override();
    let config_path = resolve_config_path(args.config.as_deref())?;
    let config = SyncConfig::load_from_path(&config_path)?.apply(SyncOverrides {
        lang_ext_original: args.lang_ext_original,
        lang_ext: args.lang_ext,
        lang_ext_incorrect: args.lang_ext_incorrect,
        alass_path: args.alass,
        ffmpeg_path: args.ffmpeg,
        output_dir: args.output_dir,
        record_missing_incorrect,
    });

    let alass = ToolRequirement::new("alass", &config.alass_path).resolve()?;
    // Only needed when a reference subtitle is missing; failures surface per video
    let ffmpeg = match ToolRequirement::new("ffmpeg", &config.ffmpeg_path).resolve() {
        Ok(path) => path,
        Err(err) => {
            emit(
                Level::Warn,
                "sync.ffmpeg.unavailable",
                &format!("{err}; reference subtitles cannot be extracted"),
                None,
            );
            config.ffmpeg_path.clone()
        }
    };

    let batches = discover_videos(&args.paths)?;
    if batches.is_empty() {
        emit(
            Level::Warn,
            "sync.no_videos",
            "No video files found in the given paths",
            None,
        );
    } else {
        emit(
            Level::Info,
            "sync.start",
            &format!("Syncing subtitles for {} video(s)", batches.len()),
            Some(json!({ "videos": batches.len() })),
        );
    }

    let extractor = FfmpegExtractor::new(ffmpeg);
    let aligner = AlassAligner::new(alass);
    let mut recorder = JsonlFailureRecorder::new(&config.output_dir);
    let options = SyncOptions {
        extensions: config.language_extensions(),
        output_dir: config.output_dir.clone(),
        record_missing_incorrect: config.record_missing_incorrect,
    };

    let bar = create_video_bar(batches.len() as u64);
    let result = Orchestrator::new(&extractor, &aligner, &mut recorder, options).run(&batches, &bar);
    finish_video_bar(&bar);
    let report = result?;

    print_summary(&report, recorder.log_path());
    Ok(report)
}

fn print_summary(report: &SyncReport, failure_log: &Path) {
    let counts = format!(
        "{} aligned, {} skipped, {} failed",
        report.aligned(),
        report.skipped(),
        report.failed()
    );

    // JSON consumers read the table's rows from the summary event data
    if get_output_format() == OutputFormat::Text && !report.results.is_empty() {
        emit(
            Level::Info,
            "sync.summary.table",
            &report.summary_table().to_string(),
            None,
        );
    }

    // Summary stays on stdout in both output modes
    let level = if report.failed() > 0 {
        Level::Info
    } else {
        Level::Success
    };
    emit(
        level,
        "sync.summary",
        &counts,
        serde_json::to_value(report).ok(),
    );

    if failure_log.exists() && report.failed() > 0 {
        emit(
            Level::Info,
            "sync.failure_log",
            &format!("Failure records appended to {}", failure_log.display()),
            Some(json!({ "path": failure_log.display().to_string() })),
        );
    }
}

/// Report whether the external tools can be found. Returns false when any is missing.
pub fn handle_check(args: CheckArgs) -> Result<bool> {
    let config_path = resolve_config_path(args.config.as_deref())?;
    let config = SyncConfig::load_from_path(&config_path)?;

    let requirements = [
        ToolRequirement::new("ffmpeg", &config.ffmpeg_path),
        ToolRequirement::new("alass", &config.alass_path),
    ];

    let mut all_found = true;
    for requirement in &requirements {
        match requirement.resolve() {
            Ok(path) => emit(
                Level::Success,
                "check.tool.found",
                &format!("✓ {}: {}", requirement.name, path.display()),
                Some(json!({ "tool": requirement.name, "path": path.display().to_string() })),
            ),
            Err(err) => {
                all_found = false;
                emit(
                    Level::Error,
                    "check.tool.missing",
                    &format!("✗ {err}"),
                    Some(json!({ "tool": requirement.name })),
                );
            }
        }
    }

    Ok(all_found)
}

pub fn handle_config(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Path { config } => {
            let path = resolve_config_path(config.as_deref())?;
            emit(
                Level::Info,
                "config.path",
                &path.display().to_string(),
                Some(json!({ "path": path.display().to_string() })),
            );
        }
        ConfigCommands::Show { config } => {
            let path = resolve_config_path(config.as_deref())?;
            let loaded = SyncConfig::load_from_path(&path)?;
            emit(
                Level::Info,
                "config.show",
                loaded.to_toml()?.trim_end(),
                serde_json::to_value(&loaded).ok(),
            );
        }
        ConfigCommands::Init { config, force } => {
            let path = resolve_config_path(config.as_deref())?;
            if path.exists() && !force {
                bail!(
                    "{} already exists, pass --force to overwrite",
                    path.display()
                );
            }
            SyncConfig::default().save_to_path(&path)?;
            emit(
                Level::Success,
                "config.init",
                &format!("Wrote default config to {}", path.display()),
                Some(json!({ "path": path.display().to_string() })),
            );
        }
    }
    Ok(())
}
