//! Per-video sync decision tree.
//!
//! For every video: compute the subtitle paths, refuse names that would
//! collide, make sure the reference subtitle exists (extracting it from the
//! container when needed), make sure the mistimed subtitle exists, then hand
//! both to the aligner. A problem with one video never stops the run; only
//! failing to create the output directory does.

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

use super::align::SubtitleAligner;
use super::extract::SubtitleExtractor;
use super::failures::FailureRecorder;
use super::naming::{LanguageExtensions, SubtitlePaths};
use super::report::{SyncReport, VideoOutcome};
use super::source::VideoBatch;
use crate::ui::prelude::{Level, emit};

/// Source name stored with every failure record.
pub const SYNC_SOURCE: &str = "alass";

#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub extensions: LanguageExtensions,
    pub output_dir: PathBuf,
    pub record_missing_incorrect: bool,
}

pub struct Orchestrator<'a> {
    extractor: &'a dyn SubtitleExtractor,
    aligner: &'a dyn SubtitleAligner,
    recorder: &'a mut dyn FailureRecorder,
    options: SyncOptions,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        extractor: &'a dyn SubtitleExtractor,
        aligner: &'a dyn SubtitleAligner,
        recorder: &'a mut dyn FailureRecorder,
        options: SyncOptions,
    ) -> Self {
        Self {
            extractor,
            aligner,
            recorder,
            options,
        }
    }

    pub fn run(&mut self, batches: &[VideoBatch], bar: &ProgressBar) -> Result<SyncReport> {
        fs::create_dir_all(&self.options.output_dir).with_context(|| {
            format!(
                "Failed to create output directory {}",
                self.options.output_dir.display()
            )
        })?;

        let mut report = SyncReport::default();
        for batch in batches {
            let Some(video) = batch.primary() else {
                bar.inc(1);
                continue;
            };

            if let Some(name) = video.file_name() {
                bar.set_message(name.to_string_lossy().into_owned());
            }
            let outcome = self.sync_video(video, bar);
            report.push(video, outcome);
            bar.inc(1);
        }

        Ok(report)
    }

    fn sync_video(&mut self, video: &Path, bar: &ProgressBar) -> VideoOutcome {
        let paths = SubtitlePaths::for_video(video, &self.options.extensions);

        if self.options.extensions.lacks_reference() {
            let reason = format!(
                "Skipping syncing {} since --lang-ext-original and --lang-ext-incorrect were empty",
                paths.original.display()
            );
            log(bar, Level::Warn, "sync.skip.no_reference", &reason, video);
            return VideoOutcome::Skipped { reason };
        }

        if paths.collides() {
            let reason = format!(
                "Skipping syncing {} since the name matches the incorrect timed subtitle",
                paths.original.display()
            );
            log(bar, Level::Warn, "sync.skip.collision", &reason, video);
            return VideoOutcome::Skipped { reason };
        }

        if paths.target_overwrites_input() {
            let reason = format!(
                "Skipping syncing {} since the aligned subtitle would overwrite one of its inputs",
                paths.target.display()
            );
            log(bar, Level::Warn, "sync.skip.target_collision", &reason, video);
            return VideoOutcome::Skipped { reason };
        }

        if !paths.original.exists() {
            log(
                bar,
                Level::Info,
                "sync.extract.start",
                &format!(
                    "Extracting subtitles from {} to {}",
                    video.display(),
                    paths.original.display()
                ),
                video,
            );

            if let Err(err) = self.extractor.extract(video, &paths.original) {
                let message = format!("Failed to extract subtitles from {}: {err}", video.display());
                return self.fail(bar, "sync.extract.failed", video, &paths.original, message);
            }

            // ffmpeg can exit cleanly without writing anything
            if !paths.original.exists() {
                let message = format!(
                    "Failed to extract subtitles; file not found: {}",
                    paths.original.display()
                );
                return self.fail(bar, "sync.extract.missing", video, &paths.original, message);
            }
        }

        if !paths.incorrect.exists() {
            let reason = format!(
                "Subtitle with incorrect timing not found: {}",
                paths.incorrect.display()
            );
            if self.options.record_missing_incorrect {
                return self.fail(bar, "sync.incorrect.missing", video, &paths.incorrect, reason);
            }
            log(bar, Level::Warn, "sync.incorrect.missing", &reason, video);
            return VideoOutcome::Skipped { reason };
        }

        log(
            bar,
            Level::Info,
            "sync.align.start",
            &format!(
                "Aligning {} based on {}",
                paths.incorrect.display(),
                paths.original.display()
            ),
            video,
        );

        match self
            .aligner
            .align(&paths.original, &paths.incorrect, &paths.target)
        {
            Ok(()) => {
                log(
                    bar,
                    Level::Success,
                    "sync.align.success",
                    &format!("Aligned subtitle written to {}", paths.target.display()),
                    video,
                );
                VideoOutcome::Aligned {
                    target: paths.target,
                }
            }
            Err(err) => {
                let reason = err.to_string();
                log(bar, Level::Error, "sync.align.failed", &reason, video);
                VideoOutcome::Failed { reason }
            }
        }
    }

    /// Report and persist a per-video failure.
    fn fail(
        &mut self,
        bar: &ProgressBar,
        code: &str,
        video: &Path,
        subtitle: &Path,
        message: String,
    ) -> VideoOutcome {
        log(bar, Level::Error, code, &message, video);

        if let Err(err) = self.recorder.record(SYNC_SOURCE, subtitle, &message) {
            log(
                bar,
                Level::Warn,
                "sync.failure_log.write_failed",
                &format!("Failed to record failure for {}: {err:#}", subtitle.display()),
                video,
            );
        }

        VideoOutcome::Failed { reason: message }
    }
}

fn log(bar: &ProgressBar, level: Level, code: &str, message: &str, video: &Path) {
    bar.suspend(|| {
        emit(
            level,
            code,
            message,
            Some(json!({ "video": video.display().to_string() })),
        )
    });
}
