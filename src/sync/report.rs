use comfy_table::{Cell, ContentArrangement, Table, presets::UTF8_FULL};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VideoOutcome {
    Aligned { target: PathBuf },
    Skipped { reason: String },
    Failed { reason: String },
}

impl VideoOutcome {
    fn label(&self) -> &'static str {
        match self {
            VideoOutcome::Aligned { .. } => "aligned",
            VideoOutcome::Skipped { .. } => "skipped",
            VideoOutcome::Failed { .. } => "failed",
        }
    }

    fn detail(&self) -> String {
        match self {
            VideoOutcome::Aligned { target } => target.display().to_string(),
            VideoOutcome::Skipped { reason } | VideoOutcome::Failed { reason } => reason.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoResult {
    pub video: PathBuf,
    #[serde(flatten)]
    pub outcome: VideoOutcome,
}

/// Per-video results of one sync run, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub results: Vec<VideoResult>,
}

impl SyncReport {
    pub fn push(&mut self, video: &Path, outcome: VideoOutcome) {
        self.results.push(VideoResult {
            video: video.to_path_buf(),
            outcome,
        });
    }

    /// At least one alignment succeeded during the run.
    pub fn written(&self) -> bool {
        self.aligned() > 0
    }

    pub fn aligned(&self) -> usize {
        self.count(|o| matches!(o, VideoOutcome::Aligned { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, VideoOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, VideoOutcome::Failed { .. }))
    }

    #[cfg(test)]
    pub fn outcome_for(&self, video: &Path) -> Option<&VideoOutcome> {
        self.results
            .iter()
            .find(|r| r.video == video)
            .map(|r| &r.outcome)
    }

    fn count(&self, pred: impl Fn(&VideoOutcome) -> bool) -> usize {
        self.results.iter().filter(|r| pred(&r.outcome)).count()
    }

    pub fn summary_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Video", "Status", "Detail"]);

        for result in &self.results {
            let name = result
                .video
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| result.video.display().to_string());
            table.add_row(vec![
                Cell::new(name),
                Cell::new(result.outcome.label()),
                Cell::new(result.outcome.detail()),
            ]);
        }

        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn written_tracks_any_alignment() {
        let mut report = SyncReport::default();
        report.push(
            Path::new("/v/a.mkv"),
            VideoOutcome::Skipped {
                reason: "missing".into(),
            },
        );
        assert!(!report.written());

        report.push(
            Path::new("/v/b.mkv"),
            VideoOutcome::Aligned {
                target: PathBuf::from("/v/b.en.srt"),
            },
        );
        assert!(report.written());
        assert_eq!((report.aligned(), report.skipped(), report.failed()), (1, 1, 0));
    }

    #[test]
    fn results_serialize_with_status_tag() {
        let mut report = SyncReport::default();
        report.push(
            Path::new("/v/a.mkv"),
            VideoOutcome::Failed {
                reason: "boom".into(),
            },
        );
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["results"][0]["video"], "/v/a.mkv");
        assert_eq!(value["results"][0]["status"], "failed");
        assert_eq!(value["results"][0]["reason"], "boom");
    }

    #[test]
    fn summary_table_lists_each_video() {
        let mut report = SyncReport::default();
        report.push(
            Path::new("/v/a.mkv"),
            VideoOutcome::Aligned {
                target: PathBuf::from("/v/a.en.srt"),
            },
        );
        let rendered = report.summary_table().to_string();
        assert!(rendered.contains("a.mkv"));
        assert!(rendered.contains("aligned"));
    }
}
