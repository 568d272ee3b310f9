use indicatif::{ProgressBar, ProgressStyle};

use crate::ui::prelude::{OutputFormat, get_output_format};

/// Progress bar over the videos of a sync run.
///
/// Hidden in JSON mode so machine-readable output stays one event per line.
pub fn create_video_bar(total: u64) -> ProgressBar {
    if get_output_format() == OutputFormat::Json {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner} [{bar:30}] {pos}/{len} {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    pb.set_style(style);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Clear the bar entirely so the summary prints on a clean line
pub fn finish_video_bar(pb: &ProgressBar) {
    pb.finish_and_clear();
}
