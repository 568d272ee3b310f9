//! Subtitle file naming.
//!
//! Subtitles live next to their video as `<stem>[.<token>].srt`, where the
//! language-extension token tells the variants apart.

use std::path::{Path, PathBuf};

/// The three language-extension tokens a sync run is configured with.
///
/// An empty string is treated the same as an unset token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageExtensions {
    /// Token of the correctly timed reference subtitle.
    pub original: Option<String>,
    /// Token of the aligned output subtitle.
    pub target: Option<String>,
    /// Token of the mistimed input subtitle.
    pub incorrect: Option<String>,
}

impl LanguageExtensions {
    /// True when neither the reference nor the mistimed token is usable.
    pub fn lacks_reference(&self) -> bool {
        token(&self.original).is_none() && token(&self.incorrect).is_none()
    }
}

fn token(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|t| !t.is_empty())
}

/// Path of the subtitle for `video` carrying `lang_ext`.
pub fn subtitle_path(video: &Path, lang_ext: Option<&str>) -> PathBuf {
    // Stay in OsString so non-UTF-8 stems survive unchanged
    let mut file_name = video
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_default();
    if let Some(ext) = lang_ext.filter(|t| !t.is_empty()) {
        file_name.push(".");
        file_name.push(ext);
    }
    file_name.push(".srt");

    match video.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Reference, mistimed and output subtitle paths for one video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitlePaths {
    pub original: PathBuf,
    pub incorrect: PathBuf,
    pub target: PathBuf,
}

impl SubtitlePaths {
    pub fn for_video(video: &Path, exts: &LanguageExtensions) -> Self {
        Self {
            original: subtitle_path(video, token(&exts.original)),
            incorrect: subtitle_path(video, token(&exts.incorrect)),
            target: subtitle_path(video, token(&exts.target)),
        }
    }

    /// The reference and the mistimed subtitle resolve to the same file.
    pub fn collides(&self) -> bool {
        self.original == self.incorrect
    }

    /// Writing the aligned subtitle would clobber one of the aligner's inputs.
    pub fn target_overwrites_input(&self) -> bool {
        self.target == self.original || self.target == self.incorrect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exts(original: &str, target: &str, incorrect: &str) -> LanguageExtensions {
        let some = |s: &str| Some(s.to_string());
        LanguageExtensions {
            original: some(original),
            target: some(target),
            incorrect: some(incorrect),
        }
    }

    #[test]
    fn token_is_inserted_before_srt() {
        let path = subtitle_path(Path::new("/media/show/ep01.mkv"), Some("ja"));
        assert_eq!(path, PathBuf::from("/media/show/ep01.ja.srt"));
    }

    #[test]
    fn dotted_token_is_kept_whole() {
        let path = subtitle_path(Path::new("/media/show/ep01.mkv"), Some("en.bad"));
        assert_eq!(path, PathBuf::from("/media/show/ep01.en.bad.srt"));
    }

    #[test]
    fn empty_or_missing_token_drops_segment() {
        let video = Path::new("/media/show/ep01.mkv");
        assert_eq!(subtitle_path(video, Some("")), PathBuf::from("/media/show/ep01.srt"));
        assert_eq!(subtitle_path(video, None), PathBuf::from("/media/show/ep01.srt"));
    }

    #[test]
    fn only_last_extension_is_stripped() {
        let path = subtitle_path(Path::new("movie.2019.1080p.mkv"), Some("en"));
        assert_eq!(path, PathBuf::from("movie.2019.1080p.en.srt"));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_stem_is_preserved_byte_for_byte() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let video = Path::new(OsStr::from_bytes(b"/lib/ep\xFF01.mkv"));
        let path = subtitle_path(video, Some("ja"));
        assert_eq!(path.as_os_str().as_bytes(), b"/lib/ep\xFF01.ja.srt");
        assert_eq!(subtitle_path(video, None).as_os_str().as_bytes(), b"/lib/ep\xFF01.srt");
    }

    #[test]
    fn paths_for_video_use_each_token() {
        let paths = SubtitlePaths::for_video(Path::new("/v/a.mkv"), &exts("ja", "en", "en.bad"));
        assert_eq!(paths.original, PathBuf::from("/v/a.ja.srt"));
        assert_eq!(paths.target, PathBuf::from("/v/a.en.srt"));
        assert_eq!(paths.incorrect, PathBuf::from("/v/a.en.bad.srt"));
        assert!(!paths.collides());
        assert!(!paths.target_overwrites_input());
    }

    #[test]
    fn target_sharing_an_input_token_overwrites_it() {
        let video = Path::new("/v/a.mkv");
        assert!(SubtitlePaths::for_video(video, &exts("ja", "en", "en")).target_overwrites_input());
        assert!(SubtitlePaths::for_video(video, &exts("ja", "ja", "en.bad")).target_overwrites_input());
        assert!(SubtitlePaths::for_video(video, &exts("ja", "", "")).target_overwrites_input());
    }

    #[test]
    fn same_token_collides() {
        let paths = SubtitlePaths::for_video(Path::new("/v/a.mkv"), &exts("en", "en", "en"));
        assert!(paths.collides());
    }

    #[test]
    fn empty_tokens_lack_reference() {
        let mut e = exts("", "en", "");
        assert!(e.lacks_reference());
        e.incorrect = Some("en.bad".into());
        assert!(!e.lacks_reference());
        assert!(LanguageExtensions::default().lacks_reference());
    }
}
